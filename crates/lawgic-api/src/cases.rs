//! Handlers for `/cases` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/cases` | Body: a case; `defendantName` required |
//! | `GET`  | `/cases/{id}` | 404 if not found |
//! | `PUT`  | `/cases/{id}` | Partial body; `null` clears a field |
//! | `GET`  | `/cases/status/{status}` | `Pending`, `Ongoing` or `Resolved` |
//! | `GET`  | `/cases/search/{keyword}` | Substring match over names, type, court |
//! | `GET`  | `/cases/court/{court_name}` | |
//! | `GET`  | `/cases/officer/{name}` | Matches `arrestOfficer` |
//! | `GET`  | `/cases/lawyer/{name}` | |
//!
//! Every list endpoint answers 404 rather than an empty array.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lawgic_core::{
  case::{Case, CaseChanges, CaseStatus, NewCase},
  store::{CaseFilter, DocketStore},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
  error::{ApiError, Result},
  extract::JsonBody,
};

const CASE_NOT_FOUND: &str = "Case not found";

fn parse_id(raw: &str) -> Result<Uuid> {
  Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("invalid case id: {raw:?}")))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /cases`
pub async fn create<S: DocketStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewCase>,
) -> Result<impl IntoResponse> {
  let details = body.validate()?;
  let case = store.create_case(details).await.map_err(ApiError::write)?;
  tracing::info!(case_id = %case.case_id, "case added");

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Case added successfully", "data": case })),
  ))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /cases/{id}`
pub async fn update<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<CaseChanges>,
) -> Result<impl IntoResponse> {
  let id = parse_id(&id)?;
  let patch = body.validate()?;

  let case = store
    .update_case(id, patch)
    .await
    .map_err(ApiError::write)?
    .ok_or_else(|| ApiError::NotFound(CASE_NOT_FOUND.into()))?;

  Ok(Json(json!({ "message": "Case updated successfully", "data": case })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /cases/{id}`
pub async fn get_one<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Case>> {
  let id = parse_id(&id)?;
  let case = store
    .get_case(id)
    .await
    .map_err(ApiError::read)?
    .ok_or_else(|| ApiError::NotFound(CASE_NOT_FOUND.into()))?;
  Ok(Json(case))
}

// ─── Listings ─────────────────────────────────────────────────────────────────

/// `GET /cases/status/{status}`
pub async fn by_status<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(status): Path<String>,
) -> Result<Json<Vec<Case>>> {
  let status = CaseStatus::from_name(&status)
    .ok_or_else(|| ApiError::BadRequest(format!("`{status}` is not a valid case status")))?;

  let cases = store.cases_by_status(status).await.map_err(ApiError::read)?;
  non_empty(cases, || format!("No {status} cases found"))
}

/// `GET /cases/search/{keyword}`
pub async fn search<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(keyword): Path<String>,
) -> Result<Json<Vec<Case>>> {
  matching(&*store, CaseFilter::Keyword(keyword), "No matching cases found").await
}

/// `GET /cases/court/{court_name}`
pub async fn by_court<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(court_name): Path<String>,
) -> Result<Json<Vec<Case>>> {
  matching(&*store, CaseFilter::Court(court_name), "No cases found for this court").await
}

/// `GET /cases/officer/{name}`
pub async fn by_officer<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Case>>> {
  matching(&*store, CaseFilter::Officer(name), "No cases found for this officer").await
}

/// `GET /cases/lawyer/{name}`
pub async fn by_lawyer<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Case>>> {
  matching(&*store, CaseFilter::Lawyer(name), "No cases found for this lawyer").await
}

async fn matching<S: DocketStore>(
  store:  &S,
  filter: CaseFilter,
  empty:  &'static str,
) -> Result<Json<Vec<Case>>> {
  let cases = store.search_cases(filter).await.map_err(ApiError::read)?;
  non_empty(cases, || empty.to_owned())
}

fn non_empty(cases: Vec<Case>, empty: impl FnOnce() -> String) -> Result<Json<Vec<Case>>> {
  if cases.is_empty() {
    return Err(ApiError::NotFound(empty()));
  }
  Ok(Json(cases))
}
