//! Startup errors for the Lawgic server.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("invalid cors_origin {0:?}")]
  CorsOrigin(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
