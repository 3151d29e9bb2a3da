//! [`SqliteStore`], the SQLite implementation of [`DocketStore`].

use std::path::Path;

use lawgic_core::{
  case::{Case, CaseDetails, CasePatch, CaseStatus, ListingOrder},
  schedule::{Schedule, ScheduleDetails},
  store::{CaseFilter, DocketStore},
  timestamp::{self, DayWindow},
  user::{User, UserDetails},
};
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    CASE_COLUMNS, RawCase, RawSchedule, RawUser, SCHEDULE_COLUMNS, USER_COLUMNS,
    case_patch_assignments, case_values, encode_dt, encode_uuid, field_column,
    like_contains, schedule_values, user_values,
  },
  schema::{FOLD, SCHEMA, install_functions},
};

/// `?1, ?2, …, ?n`
fn placeholders(n: usize) -> String {
  (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

fn is_constraint_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lawgic store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        install_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert one row; `values` must follow the order of `columns`.
  async fn insert(
    &self,
    table:   &'static str,
    columns: &'static str,
    values:  Vec<Value>,
  ) -> Result<()> {
    let sql = format!(
      "INSERT INTO {table} ({columns}) VALUES ({})",
      placeholders(values.len())
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT {CASE_COLUMNS} …` statement and decode every row.
  async fn select_cases(&self, sql: String, params: Vec<Value>) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params.iter()), RawCase::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn select_user(&self, sql: String, params: Vec<Value>) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, params_from_iter(params.iter()), RawUser::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}

// ─── DocketStore impl ────────────────────────────────────────────────────────

impl DocketStore for SqliteStore {
  type Error = Error;

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn create_case(&self, details: CaseDetails) -> Result<Case> {
    let now = timestamp::now();
    let case = Case {
      case_id: Uuid::new_v4(),
      details,
      created_at: now,
      updated_at: now,
    };

    self.insert("cases", CASE_COLUMNS, case_values(&case)).await?;
    Ok(case)
  }

  async fn update_case(&self, id: Uuid, patch: CasePatch) -> Result<Option<Case>> {
    let assignments = case_patch_assignments(patch);
    let id_str      = encode_uuid(id);
    let now_str     = encode_dt(timestamp::now());

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        let n = assignments.len();
        let mut sets: Vec<String> = assignments
          .iter()
          .enumerate()
          .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
          .collect();
        sets.push(format!("updated_at = ?{}", n + 1));
        let sql = format!(
          "UPDATE cases SET {} WHERE case_id = ?{}",
          sets.join(", "),
          n + 2
        );

        let mut values: Vec<Value> = assignments.into_iter().map(|(_, v)| v).collect();
        values.push(Value::Text(now_str));
        values.push(Value::Text(id_str.clone()));

        let tx = conn.transaction()?;
        let changed = tx.execute(&sql, params_from_iter(values.iter()))?;
        let raw = if changed == 0 {
          None
        } else {
          tx.query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
            rusqlite::params![id_str],
            RawCase::from_row,
          )
          .optional()?
        };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn get_case(&self, id: Uuid) -> Result<Option<Case>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
              rusqlite::params![id_str],
              RawCase::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn cases_by_status(&self, status: CaseStatus) -> Result<Vec<Case>> {
    let order = match status.listing_order() {
      ListingOrder::NewestFirst => "created_at DESC, rowid DESC",
      ListingOrder::RecentlyUpdatedFirst => "updated_at DESC, rowid DESC",
    };
    let sql = format!("SELECT {CASE_COLUMNS} FROM cases WHERE status = ?1 ORDER BY {order}");

    self
      .select_cases(sql, vec![Value::Text(status.as_str().to_owned())])
      .await
  }

  async fn search_cases(&self, filter: CaseFilter) -> Result<Vec<Case>> {
    // Both sides are folded, so the match ignores case beyond ASCII.
    let conds = filter
      .fields()
      .iter()
      .map(|f| format!("{FOLD}({}) LIKE ?1 ESCAPE '\\'", field_column(*f)))
      .collect::<Vec<_>>()
      .join(" OR ");
    let sql = format!("SELECT {CASE_COLUMNS} FROM cases WHERE {conds} ORDER BY rowid");
    let pattern = like_contains(&filter.needle().to_lowercase());

    self.select_cases(sql, vec![Value::Text(pattern)]).await
  }

  async fn cases_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Case>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let sql = format!(
      "SELECT {CASE_COLUMNS} FROM cases WHERE case_id IN ({}) ORDER BY rowid",
      placeholders(ids.len())
    );
    let params = ids.into_iter().map(|id| Value::Text(encode_uuid(id))).collect();

    self.select_cases(sql, params).await
  }

  // ── Schedules ─────────────────────────────────────────────────────────────

  async fn create_schedule(&self, details: ScheduleDetails) -> Result<Schedule> {
    let now = timestamp::now();
    let schedule = Schedule {
      schedule_id: Uuid::new_v4(),
      details,
      created_at: now,
      updated_at: now,
    };

    self
      .insert("schedules", SCHEDULE_COLUMNS, schedule_values(&schedule))
      .await?;
    Ok(schedule)
  }

  async fn schedules_within(&self, window: DayWindow) -> Result<Vec<Schedule>> {
    let start_str = encode_dt(window.start);
    let end_str   = encode_dt(window.end);

    let raws: Vec<RawSchedule> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SCHEDULE_COLUMNS} FROM schedules
           WHERE hearing_date >= ?1 AND hearing_date <= ?2
           ORDER BY hearing_date, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![start_str, end_str], RawSchedule::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSchedule::into_schedule).collect()
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, details: UserDetails) -> Result<User> {
    let now = timestamp::now();
    let user = User {
      user_id: Uuid::new_v4(),
      details,
      created_at: now,
      updated_at: now,
    };

    match self.insert("users", USER_COLUMNS, user_values(&user)).await {
      Ok(()) => Ok(user),
      // `username` carries the only constraint an insert can violate.
      Err(Error::Database(e)) if is_constraint_violation(&e) => {
        Err(lawgic_core::Error::UsernameTaken(user.details.username).into())
      }
      Err(e) => Err(e),
    }
  }

  async fn get_user(&self, username: String) -> Result<Option<User>> {
    self
      .select_user(
        format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
        vec![Value::Text(username)],
      )
      .await
  }

  async fn find_user_by_credentials(
    &self,
    username: String,
    password: String,
  ) -> Result<Option<User>> {
    self
      .select_user(
        format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1 AND password = ?2"),
        vec![Value::Text(username), Value::Text(password)],
      )
      .await
  }
}
