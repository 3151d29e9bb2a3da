//! Error types for `lawgic-core`.

use thiserror::Error;

/// Domain-level failures a store backend can report.
#[derive(Debug, Error)]
pub enum Error {
  #[error("username already exists: {0}")]
  UsernameTaken(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
