//! HTTP surface for Lawgic: configuration, CORS and request tracing around
//! the JSON API, which is mounted under `/api`.

pub mod error;

pub use error::{Error, Result};

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, Method, header},
};
use config::{Config, Environment, File};
use lawgic_core::store::DocketStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const DEFAULT_CORS_ORIGIN: &str = "https://lawgic-4.onrender.com";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  pub cors_origin: String,
}

impl ServerConfig {
  /// Layer, lowest first: built-in defaults, the TOML file at `path` (if it
  /// exists), `env`, then `port_override`.
  pub fn load(
    path:          PathBuf,
    env:           Environment,
    port_override: Option<String>,
  ) -> Result<Self> {
    let cfg = Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5000_i64)?
      .set_default("store_path", "lawgic.db")?
      .set_default("cors_origin", DEFAULT_CORS_ORIGIN)?
      .add_source(File::from(path).required(false))
      .add_source(env)
      .set_override_option("port", port_override)?
      .build()?
      .try_deserialize()?;
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Allow exactly `origin`, for the methods and header the API uses.
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
  let origin =
    HeaderValue::from_str(origin).map_err(|_| Error::CorsOrigin(origin.to_owned()))?;

  Ok(
    CorsLayer::new()
      .allow_origin(origin)
      .allow_methods([Method::GET, Method::POST, Method::PUT])
      .allow_headers([header::CONTENT_TYPE]),
  )
}

/// The complete application: the API under `/api`, wrapped in CORS and
/// tracing layers.
pub fn app<S>(store: Arc<S>, cors: CorsLayer) -> Router
where
  S: DocketStore + 'static,
{
  Router::new()
    .nest("/api", lawgic_api::api_router(store))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}
