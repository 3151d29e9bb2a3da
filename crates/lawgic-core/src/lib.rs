//! Core types and trait definitions for the Lawgic case-management backend.
//!
//! This crate has no HTTP or database dependencies. The store backends and
//! the API layer depend on it, never the other way round.

pub mod case;
pub mod error;
pub mod schedule;
pub mod store;
pub mod timestamp;
pub mod user;
pub mod validation;

pub use error::{Error, Result};
pub use validation::ValidationError;
