//! Case records, one legal proceeding each.
//!
//! A case is created on intake, mutated by partial updates, and never
//! deleted. Hearings refer to cases by id; a case does not know about its
//! hearings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{
  timestamp,
  validation::{Checker, Problem, ValidationError},
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a case is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseStatus {
  #[default]
  Pending,
  Ongoing,
  Resolved,
}

/// Sort order used when listing cases of one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
  /// `createdAt` descending.
  NewestFirst,
  /// `updatedAt` descending.
  RecentlyUpdatedFirst,
}

impl CaseStatus {
  pub const ALL: [CaseStatus; 3] = [Self::Pending, Self::Ongoing, Self::Resolved];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "Pending",
      Self::Ongoing => "Ongoing",
      Self::Resolved => "Resolved",
    }
  }

  /// Exact, case-sensitive lookup by wire name.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.as_str() == name)
  }

  /// Pending cases are a work queue (newest intake first); everything else
  /// is listed by most recent activity.
  pub fn listing_order(self) -> ListingOrder {
    match self {
      Self::Pending => ListingOrder::NewestFirst,
      Self::Ongoing | Self::Resolved => ListingOrder::RecentlyUpdatedFirst,
    }
  }
}

impl fmt::Display for CaseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Searchable fields ───────────────────────────────────────────────────────

/// Free-text case fields that filters can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseField {
  DefendantName,
  CrimeType,
  ArrestOfficer,
  JudgeName,
  ProsecutorName,
  LawyerName,
  CourtName,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Everything about a case that the client controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
  pub defendant_name:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub defendant_address:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub crime_type:          Option<String>,
  #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
  pub crime_date:          Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub crime_location:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub arrest_officer:      Option<String>,
  #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
  pub arrest_date:         Option<DateTime<Utc>>,
  #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
  pub start_date:          Option<DateTime<Utc>>,
  #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
  pub expected_completion: Option<DateTime<Utc>>,
  #[serde(default)]
  pub status:              CaseStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub judge_name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prosecutor_name:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lawyer_name:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub court_name:          Option<String>,
}

impl CaseDetails {
  /// A pending case with only the defendant filled in.
  pub fn new(defendant_name: impl Into<String>) -> Self {
    Self {
      defendant_name:      defendant_name.into(),
      defendant_address:   None,
      crime_type:          None,
      crime_date:          None,
      crime_location:      None,
      arrest_officer:      None,
      arrest_date:         None,
      start_date:          None,
      expected_completion: None,
      status:              CaseStatus::Pending,
      judge_name:          None,
      prosecutor_name:     None,
      lawyer_name:         None,
      court_name:          None,
    }
  }
}

/// A persisted case. Timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
  #[serde(rename = "_id")]
  pub case_id:    Uuid,
  #[serde(flatten)]
  pub details:    CaseDetails,
  #[serde(with = "timestamp::millis")]
  pub created_at: DateTime<Utc>,
  #[serde(with = "timestamp::millis")]
  pub updated_at: DateTime<Utc>,
}

// ─── Intake ──────────────────────────────────────────────────────────────────

/// A case as submitted for intake, before validation. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
  pub defendant_name:      Option<String>,
  pub defendant_address:   Option<String>,
  pub crime_type:          Option<String>,
  #[serde(default, with = "timestamp::option")]
  pub crime_date:          Option<DateTime<Utc>>,
  pub crime_location:      Option<String>,
  pub arrest_officer:      Option<String>,
  #[serde(default, with = "timestamp::option")]
  pub arrest_date:         Option<DateTime<Utc>>,
  #[serde(default, with = "timestamp::option")]
  pub start_date:          Option<DateTime<Utc>>,
  #[serde(default, with = "timestamp::option")]
  pub expected_completion: Option<DateTime<Utc>>,
  pub status:              Option<String>,
  pub judge_name:          Option<String>,
  pub prosecutor_name:     Option<String>,
  pub lawyer_name:         Option<String>,
  pub court_name:          Option<String>,
}

impl NewCase {
  pub fn validate(self) -> Result<CaseDetails, ValidationError> {
    let mut check = Checker::new("Case");
    let defendant_name = check.required("defendantName", self.defendant_name);
    let status = match self.status {
      None => CaseStatus::default(),
      Some(name) => check_status(&mut check, name),
    };

    check.finish(CaseDetails {
      defendant_name,
      defendant_address: self.defendant_address,
      crime_type: self.crime_type,
      crime_date: self.crime_date,
      crime_location: self.crime_location,
      arrest_officer: self.arrest_officer,
      arrest_date: self.arrest_date,
      start_date: self.start_date,
      expected_completion: self.expected_completion,
      status,
      judge_name: self.judge_name,
      prosecutor_name: self.prosecutor_name,
      lawyer_name: self.lawyer_name,
      court_name: self.court_name,
    })
  }
}

fn check_status(check: &mut Checker, name: String) -> CaseStatus {
  CaseStatus::from_name(&name).unwrap_or_else(|| {
    check.push("status", Problem::NotInEnum(name));
    CaseStatus::default()
  })
}

// ─── Updates ─────────────────────────────────────────────────────────────────

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
fn nullable<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(d).map(Some)
}

/// A partial update as submitted, before validation.
///
/// Absent fields are left alone, `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseChanges {
  #[serde(default, deserialize_with = "nullable")]
  pub defendant_name:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub defendant_address:   Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub crime_type:          Option<Option<String>>,
  #[serde(default, deserialize_with = "timestamp::patch::deserialize")]
  pub crime_date:          Option<Option<DateTime<Utc>>>,
  #[serde(default, deserialize_with = "nullable")]
  pub crime_location:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub arrest_officer:      Option<Option<String>>,
  #[serde(default, deserialize_with = "timestamp::patch::deserialize")]
  pub arrest_date:         Option<Option<DateTime<Utc>>>,
  #[serde(default, deserialize_with = "timestamp::patch::deserialize")]
  pub start_date:          Option<Option<DateTime<Utc>>>,
  #[serde(default, deserialize_with = "timestamp::patch::deserialize")]
  pub expected_completion: Option<Option<DateTime<Utc>>>,
  #[serde(default, deserialize_with = "nullable")]
  pub status:              Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub judge_name:          Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub prosecutor_name:     Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub lawyer_name:         Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub court_name:          Option<Option<String>>,
}

/// A validated partial update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasePatch {
  pub defendant_name:      Option<String>,
  pub defendant_address:   Option<Option<String>>,
  pub crime_type:          Option<Option<String>>,
  pub crime_date:          Option<Option<DateTime<Utc>>>,
  pub crime_location:      Option<Option<String>>,
  pub arrest_officer:      Option<Option<String>>,
  pub arrest_date:         Option<Option<DateTime<Utc>>>,
  pub start_date:          Option<Option<DateTime<Utc>>>,
  pub expected_completion: Option<Option<DateTime<Utc>>>,
  pub status:              Option<CaseStatus>,
  pub judge_name:          Option<Option<String>>,
  pub prosecutor_name:     Option<Option<String>>,
  pub lawyer_name:         Option<Option<String>>,
  pub court_name:          Option<Option<String>>,
}

impl CaseChanges {
  /// Checking the changes alone is enough: every stored case is already
  /// valid, and only the fields present here get overwritten.
  pub fn validate(self) -> Result<CasePatch, ValidationError> {
    let mut check = Checker::new("Case");

    let defendant_name = self
      .defendant_name
      .map(|v| check.required("defendantName", v));

    let status = match self.status {
      None => None,
      Some(None) => {
        check.push("status", Problem::Required);
        None
      }
      Some(Some(name)) => Some(check_status(&mut check, name)),
    };

    check.finish(CasePatch {
      defendant_name,
      defendant_address: self.defendant_address,
      crime_type: self.crime_type,
      crime_date: self.crime_date,
      crime_location: self.crime_location,
      arrest_officer: self.arrest_officer,
      arrest_date: self.arrest_date,
      start_date: self.start_date,
      expected_completion: self.expected_completion,
      status,
      judge_name: self.judge_name,
      prosecutor_name: self.prosecutor_name,
      lawyer_name: self.lawyer_name,
      court_name: self.court_name,
    })
  }
}
