//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lawgic_core::{ValidationError, store::StoreError};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
///
/// Every variant renders as `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Unauthorized(String),

  /// A store failure while writing. Reported to the client as a bad request.
  #[error("{0}")]
  WriteFailed(#[source] BoxError),

  /// A store failure while reading.
  #[error("{0}")]
  Store(#[source] BoxError),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

impl ApiError {
  /// Map a store error raised by a read-only operation.
  pub fn read<E: StoreError>(e: E) -> Self { Self::Store(Box::new(e)) }

  /// Map a store error raised while persisting a record. Domain failures
  /// (e.g. a taken username) keep their own message.
  pub fn write<E: StoreError>(e: E) -> Self {
    match e.domain() {
      Some(domain) => Self::BadRequest(domain.to_string()),
      None => Self::WriteFailed(Box::new(e)),
    }
  }

  fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::WriteFailed(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = self.to_string();

    match &self {
      ApiError::Store(_) | ApiError::WriteFailed(_) => {
        tracing::error!(%status, error = %message, "store operation failed");
      }
      _ => tracing::debug!(%status, error = %message, "request rejected"),
    }

    (status, Json(json!({ "error": message }))).into_response()
  }
}
