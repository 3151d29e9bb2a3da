//! Hearing schedules: `POST /schedule` and `GET /cases/hearing/{hearing_date}`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Local;
use lawgic_core::{
  case::Case,
  schedule::NewSchedule,
  store::DocketStore,
  timestamp::{self, DayWindow},
};
use serde_json::json;

use crate::{
  error::{ApiError, Result},
  extract::JsonBody,
};

/// `POST /schedule`
///
/// The referenced case is not required to exist.
pub async fn create<S: DocketStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewSchedule>,
) -> Result<impl IntoResponse> {
  let details = body.validate()?;
  let schedule = store.create_schedule(details).await.map_err(ApiError::write)?;
  tracing::info!(
    schedule_id = %schedule.schedule_id,
    case_id = %schedule.details.case_id,
    "hearing scheduled"
  );

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Case scheduled successfully", "data": schedule })),
  ))
}

/// `GET /cases/hearing/{hearing_date}`
///
/// The cases with a hearing on that calendar day, in the server's local
/// time zone. A full date-time in the path is first moved to local time and
/// then cut to its date. A schedule pointing at a missing case contributes
/// nothing, so the list can be empty even when hearings exist.
pub async fn cases_on<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(hearing_date): Path<String>,
) -> Result<Json<Vec<Case>>> {
  let invalid = || ApiError::BadRequest(format!("invalid hearing date: {hearing_date:?}"));
  let date = timestamp::parse_calendar_date(&hearing_date, &Local).ok_or_else(invalid)?;
  let window = DayWindow::of(date, &Local).ok_or_else(invalid)?;

  let schedules = store.schedules_within(window).await.map_err(ApiError::read)?;
  if schedules.is_empty() {
    return Err(ApiError::NotFound("No hearings found on this date".into()));
  }

  let ids = schedules.into_iter().map(|s| s.details.case_id).collect();
  let cases = store.cases_by_ids(ids).await.map_err(ApiError::read)?;
  Ok(Json(cases))
}
