//! JSON REST API for Lawgic.
//!
//! Exposes an axum [`Router`] backed by any [`lawgic_core::store::DocketStore`].
//! CORS, tracing and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lawgic_api::api_router(store.clone()))
//! ```

pub mod cases;
pub mod error;
pub mod extract;
pub mod schedule;
pub mod users;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lawgic_core::store::DocketStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DocketStore + 'static,
{
  Router::new()
    // Cases
    .route("/cases", post(cases::create::<S>))
    .route("/cases/{id}", get(cases::get_one::<S>).put(cases::update::<S>))
    .route("/cases/status/{status}", get(cases::by_status::<S>))
    .route("/cases/search/{keyword}", get(cases::search::<S>))
    .route("/cases/court/{court_name}", get(cases::by_court::<S>))
    .route("/cases/officer/{name}", get(cases::by_officer::<S>))
    .route("/cases/lawyer/{name}", get(cases::by_lawyer::<S>))
    // Schedules
    .route("/schedule", post(schedule::create::<S>))
    .route("/cases/hearing/{hearing_date}", get(schedule::cases_on::<S>))
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/{username}", get(users::get_one::<S>))
    .route("/login", post(users::login::<S>))
    .with_state(store)
}
