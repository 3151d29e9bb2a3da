//! Handlers for user accounts.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | 400 on a missing field or a taken username |
//! | `GET`  | `/users/{username}` | Exact match; 404 if not found |
//! | `POST` | `/login` | Body: `{"username":…,"password":…}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lawgic_core::{
  store::DocketStore,
  user::{NewUser, User},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  error::{ApiError, Result},
  extract::JsonBody,
};

const BAD_CREDENTIALS: &str = "Invalid username or password";

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /users`
pub async fn create<S: DocketStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewUser>,
) -> Result<impl IntoResponse> {
  let details = body.validate()?;
  let user = store.create_user(details).await.map_err(ApiError::write)?;
  tracing::info!(username = %user.details.username, "user account created");

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "User account created successfully", "user": user })),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/{username}`
pub async fn get_one<S: DocketStore>(
  State(store): State<Arc<S>>,
  Path(username): Path<String>,
) -> Result<Json<User>> {
  let user = store
    .get_user(username)
    .await
    .map_err(ApiError::read)?
    .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
  Ok(Json(user))
}

// ─── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: Option<String>,
  pub password: Option<String>,
}

/// `POST /login`
pub async fn login<S: DocketStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<LoginBody>,
) -> Result<impl IntoResponse> {
  let (Some(username), Some(password)) = (body.username, body.password) else {
    return Err(ApiError::Unauthorized(BAD_CREDENTIALS.into()));
  };

  let user = store
    .find_user_by_credentials(username, password)
    .await
    .map_err(ApiError::read)?
    .ok_or_else(|| ApiError::Unauthorized(BAD_CREDENTIALS.into()))?;

  Ok(Json(json!({ "message": "Login successful", "user": user })))
}
