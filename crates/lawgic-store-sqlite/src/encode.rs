//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored in the fixed-width [`timestamp::FORMAT`]. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use lawgic_core::{
  case::{Case, CaseDetails, CaseField, CasePatch, CaseStatus},
  schedule::{Schedule, ScheduleDetails},
  timestamp,
  user::{User, UserDetails},
};
use rusqlite::{Row, types::Value};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { timestamp::format(dt) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

pub fn decode_status(s: &str) -> Result<CaseStatus> {
  CaseStatus::from_name(s).ok_or_else(|| Error::UnknownStatus(s.to_owned()))
}

/// Escape `%`, `_` and the escape character itself so `needle` matches
/// literally inside a `LIKE ... ESCAPE '\'` pattern.
pub fn like_contains(needle: &str) -> String {
  let mut out = String::with_capacity(needle.len() + 2);
  out.push('%');
  for c in needle.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('%');
  out
}

pub fn field_column(field: CaseField) -> &'static str {
  match field {
    CaseField::DefendantName => "defendant_name",
    CaseField::CrimeType => "crime_type",
    CaseField::ArrestOfficer => "arrest_officer",
    CaseField::JudgeName => "judge_name",
    CaseField::ProsecutorName => "prosecutor_name",
    CaseField::LawyerName => "lawyer_name",
    CaseField::CourtName => "court_name",
  }
}

fn text(v: Option<String>) -> Value { v.map_or(Value::Null, Value::Text) }

fn date(v: Option<DateTime<Utc>>) -> Value { text(v.map(encode_dt)) }

// ─── Cases ───────────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` on `cases`; order matches
/// [`RawCase::from_row`].
pub const CASE_COLUMNS: &str = "case_id, defendant_name, defendant_address, crime_type, \
   crime_date, crime_location, arrest_officer, arrest_date, start_date, \
   expected_completion, status, judge_name, prosecutor_name, lawyer_name, \
   court_name, created_at, updated_at";

/// Values for an `INSERT` in [`CASE_COLUMNS`] order.
pub fn case_values(case: &Case) -> Vec<Value> {
  let d = &case.details;
  vec![
    Value::Text(encode_uuid(case.case_id)),
    Value::Text(d.defendant_name.clone()),
    text(d.defendant_address.clone()),
    text(d.crime_type.clone()),
    date(d.crime_date),
    text(d.crime_location.clone()),
    text(d.arrest_officer.clone()),
    date(d.arrest_date),
    date(d.start_date),
    date(d.expected_completion),
    Value::Text(d.status.as_str().to_owned()),
    text(d.judge_name.clone()),
    text(d.prosecutor_name.clone()),
    text(d.lawyer_name.clone()),
    text(d.court_name.clone()),
    Value::Text(encode_dt(case.created_at)),
    Value::Text(encode_dt(case.updated_at)),
  ]
}

/// `(column, value)` assignments for the fields a patch touches.
pub fn case_patch_assignments(patch: CasePatch) -> Vec<(&'static str, Value)> {
  let mut out: Vec<(&'static str, Value)> = Vec::new();
  let mut set = |column: &'static str, value: Option<Value>| {
    if let Some(v) = value {
      out.push((column, v));
    }
  };

  set("defendant_name", patch.defendant_name.map(Value::Text));
  set("defendant_address", patch.defendant_address.map(text));
  set("crime_type", patch.crime_type.map(text));
  set("crime_date", patch.crime_date.map(date));
  set("crime_location", patch.crime_location.map(text));
  set("arrest_officer", patch.arrest_officer.map(text));
  set("arrest_date", patch.arrest_date.map(date));
  set("start_date", patch.start_date.map(date));
  set("expected_completion", patch.expected_completion.map(date));
  set("status", patch.status.map(|s| Value::Text(s.as_str().to_owned())));
  set("judge_name", patch.judge_name.map(text));
  set("prosecutor_name", patch.prosecutor_name.map(text));
  set("lawyer_name", patch.lawyer_name.map(text));
  set("court_name", patch.court_name.map(text));

  out
}

/// Raw strings read directly from a `cases` row.
pub struct RawCase {
  pub case_id:             String,
  pub defendant_name:      String,
  pub defendant_address:   Option<String>,
  pub crime_type:          Option<String>,
  pub crime_date:          Option<String>,
  pub crime_location:      Option<String>,
  pub arrest_officer:      Option<String>,
  pub arrest_date:         Option<String>,
  pub start_date:          Option<String>,
  pub expected_completion: Option<String>,
  pub status:              String,
  pub judge_name:          Option<String>,
  pub prosecutor_name:     Option<String>,
  pub lawyer_name:         Option<String>,
  pub court_name:          Option<String>,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawCase {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawCase {
      case_id:             row.get(0)?,
      defendant_name:      row.get(1)?,
      defendant_address:   row.get(2)?,
      crime_type:          row.get(3)?,
      crime_date:          row.get(4)?,
      crime_location:      row.get(5)?,
      arrest_officer:      row.get(6)?,
      arrest_date:         row.get(7)?,
      start_date:          row.get(8)?,
      expected_completion: row.get(9)?,
      status:              row.get(10)?,
      judge_name:          row.get(11)?,
      prosecutor_name:     row.get(12)?,
      lawyer_name:         row.get(13)?,
      court_name:          row.get(14)?,
      created_at:          row.get(15)?,
      updated_at:          row.get(16)?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_id:    decode_uuid(&self.case_id)?,
      details:    CaseDetails {
        defendant_name:      self.defendant_name,
        defendant_address:   self.defendant_address,
        crime_type:          self.crime_type,
        crime_date:          decode_opt_dt(self.crime_date)?,
        crime_location:      self.crime_location,
        arrest_officer:      self.arrest_officer,
        arrest_date:         decode_opt_dt(self.arrest_date)?,
        start_date:          decode_opt_dt(self.start_date)?,
        expected_completion: decode_opt_dt(self.expected_completion)?,
        status:              decode_status(&self.status)?,
        judge_name:          self.judge_name,
        prosecutor_name:     self.prosecutor_name,
        lawyer_name:         self.lawyer_name,
        court_name:          self.court_name,
      },
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Schedules ───────────────────────────────────────────────────────────────

pub const SCHEDULE_COLUMNS: &str = "schedule_id, case_id, hearing_date, adjourn_reason, \
   proceeding_summary, next_hearing_date, created_at, updated_at";

pub fn schedule_values(schedule: &Schedule) -> Vec<Value> {
  let d = &schedule.details;
  vec![
    Value::Text(encode_uuid(schedule.schedule_id)),
    Value::Text(encode_uuid(d.case_id)),
    date(d.hearing_date),
    text(d.adjourn_reason.clone()),
    text(d.proceeding_summary.clone()),
    date(d.next_hearing_date),
    Value::Text(encode_dt(schedule.created_at)),
    Value::Text(encode_dt(schedule.updated_at)),
  ]
}

/// Raw strings read directly from a `schedules` row.
pub struct RawSchedule {
  pub schedule_id:        String,
  pub case_id:            String,
  pub hearing_date:       Option<String>,
  pub adjourn_reason:     Option<String>,
  pub proceeding_summary: Option<String>,
  pub next_hearing_date:  Option<String>,
  pub created_at:         String,
  pub updated_at:         String,
}

impl RawSchedule {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawSchedule {
      schedule_id:        row.get(0)?,
      case_id:            row.get(1)?,
      hearing_date:       row.get(2)?,
      adjourn_reason:     row.get(3)?,
      proceeding_summary: row.get(4)?,
      next_hearing_date:  row.get(5)?,
      created_at:         row.get(6)?,
      updated_at:         row.get(7)?,
    })
  }

  pub fn into_schedule(self) -> Result<Schedule> {
    Ok(Schedule {
      schedule_id: decode_uuid(&self.schedule_id)?,
      details:     ScheduleDetails {
        case_id:            decode_uuid(&self.case_id)?,
        hearing_date:       decode_opt_dt(self.hearing_date)?,
        adjourn_reason:     self.adjourn_reason,
        proceeding_summary: self.proceeding_summary,
        next_hearing_date:  decode_opt_dt(self.next_hearing_date)?,
      },
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "user_id, first_name, last_name, username, password, \
   dob, email, phone, role, created_at, updated_at";

pub fn user_values(user: &User) -> Vec<Value> {
  let d = &user.details;
  vec![
    Value::Text(encode_uuid(user.user_id)),
    Value::Text(d.first_name.clone()),
    Value::Text(d.last_name.clone()),
    Value::Text(d.username.clone()),
    Value::Text(d.password.clone()),
    text(d.dob.clone()),
    text(d.email.clone()),
    text(d.phone.clone()),
    Value::Text(d.role.clone()),
    Value::Text(encode_dt(user.created_at)),
    Value::Text(encode_dt(user.updated_at)),
  ]
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:    String,
  pub first_name: String,
  pub last_name:  String,
  pub username:   String,
  pub password:   String,
  pub dob:        Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub role:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawUser {
      user_id:    row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      username:   row.get(3)?,
      password:   row.get(4)?,
      dob:        row.get(5)?,
      email:      row.get(6)?,
      phone:      row.get(7)?,
      role:       row.get(8)?,
      created_at: row.get(9)?,
      updated_at: row.get(10)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      details:    UserDetails {
        first_name: self.first_name,
        last_name:  self.last_name,
        username:   self.username,
        password:   self.password,
        dob:        self.dob,
        email:      self.email,
        phone:      self.phone,
        role:       self.role,
      },
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
