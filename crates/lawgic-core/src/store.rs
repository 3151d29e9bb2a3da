//! The `DocketStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `lawgic-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  case::{Case, CaseDetails, CaseField, CasePatch, CaseStatus},
  schedule::{Schedule, ScheduleDetails},
  timestamp::DayWindow,
  user::{User, UserDetails},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// A case-insensitive substring filter over one or more text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseFilter {
  /// Matches any of the name/type/court fields.
  Keyword(String),
  Court(String),
  Officer(String),
  Lawyer(String),
}

impl CaseFilter {
  const KEYWORD_FIELDS: &'static [CaseField] = &[
    CaseField::DefendantName,
    CaseField::CrimeType,
    CaseField::JudgeName,
    CaseField::LawyerName,
    CaseField::CourtName,
    CaseField::ProsecutorName,
  ];

  /// The text to look for.
  pub fn needle(&self) -> &str {
    match self {
      Self::Keyword(s) | Self::Court(s) | Self::Officer(s) | Self::Lawyer(s) => s,
    }
  }

  /// A case matches if any of these fields contains the needle.
  pub fn fields(&self) -> &'static [CaseField] {
    match self {
      Self::Keyword(_) => Self::KEYWORD_FIELDS,
      Self::Court(_) => &[CaseField::CourtName],
      Self::Officer(_) => &[CaseField::ArrestOfficer],
      Self::Lawyer(_) => &[CaseField::LawyerName],
    }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Implemented by backend error types so callers can pick out domain-level
/// failures from an otherwise opaque error.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn domain(&self) -> Option<&crate::Error>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Lawgic store backend holding three independent
/// collections: cases, schedules and users.
///
/// Every method is a single atomic store operation. Timestamps and
/// identifiers are assigned by the store.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocketStore: Send + Sync {
  type Error: StoreError;

  // ── Cases ─────────────────────────────────────────────────────────────

  /// Persist a new case and return it with its id and timestamps.
  fn create_case(
    &self,
    details: CaseDetails,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Apply `patch` to the case with `id` and bump its `updated_at`.
  /// Returns the updated case, or `None` if there is no such case.
  fn update_case(
    &self,
    id: Uuid,
    patch: CasePatch,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Retrieve a case by id. Returns `None` if not found.
  fn get_case(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// All cases with exactly this status, in the status's
  /// [`ListingOrder`](crate::case::ListingOrder).
  fn cases_by_status(
    &self,
    status: CaseStatus,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// All cases matching `filter`.
  fn search_cases(
    &self,
    filter: CaseFilter,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// The cases whose ids appear in `ids`. Each case is returned at most once
  /// even if its id is repeated; unknown ids are skipped.
  fn cases_by_ids(
    &self,
    ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  // ── Schedules ─────────────────────────────────────────────────────────

  /// Persist a new schedule. The referenced case is not checked.
  fn create_schedule(
    &self,
    details: ScheduleDetails,
  ) -> impl Future<Output = Result<Schedule, Self::Error>> + Send + '_;

  /// Schedules whose hearing date lies inside `window` (inclusive).
  fn schedules_within(
    &self,
    window: DayWindow,
  ) -> impl Future<Output = Result<Vec<Schedule>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. Fails with [`Error::UsernameTaken`](crate::Error)
  /// (reachable via [`StoreError::domain`]) if the username is in use.
  fn create_user(
    &self,
    details: UserDetails,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Exact-match lookup by username.
  fn get_user(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// The user matching both `username` and `password` exactly, in one
  /// combined filter.
  fn find_user_by_credentials(
    &self,
    username: String,
    password: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
