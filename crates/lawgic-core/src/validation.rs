//! Field-level validation results shared by every record type.

use thiserror::Error;

/// What is wrong with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
  /// The field is absent, `null`, or an empty string.
  Required,
  /// The field holds a value outside its allowed set.
  NotInEnum(String),
  /// The field could not be interpreted (e.g. a malformed identifier).
  Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {}", describe(.field, .problem))]
pub struct FieldProblem {
  /// The camelCase wire name of the field.
  pub field:   &'static str,
  pub problem: Problem,
}

fn describe(field: &str, problem: &Problem) -> String {
  match problem {
    Problem::Required => format!("Path `{field}` is required."),
    Problem::NotInEnum(v) => format!("`{v}` is not a valid enum value for path `{field}`."),
    Problem::Malformed(v) => format!("Cast failed for value {v:?} at path `{field}`."),
  }
}

/// A record failed validation. Carries every problem found, not just the
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} validation failed: {}", join(.problems))]
pub struct ValidationError {
  /// Record type name, e.g. `"Case"`.
  pub entity:   &'static str,
  pub problems: Vec<FieldProblem>,
}

fn join(problems: &[FieldProblem]) -> String {
  problems
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

impl ValidationError {
  pub fn has(&self, field: &str) -> bool {
    self.problems.iter().any(|p| p.field == field)
  }
}

/// Accumulates problems while a record is being checked.
pub(crate) struct Checker {
  entity:   &'static str,
  problems: Vec<FieldProblem>,
}

impl Checker {
  pub(crate) fn new(entity: &'static str) -> Self {
    Self { entity, problems: Vec::new() }
  }

  pub(crate) fn push(&mut self, field: &'static str, problem: Problem) {
    self.problems.push(FieldProblem { field, problem });
  }

  /// Take a required string, recording a problem if it is missing or blank.
  pub(crate) fn required(&mut self, field: &'static str, value: Option<String>) -> String {
    match value {
      Some(v) if !v.trim().is_empty() => v,
      _ => {
        self.push(field, Problem::Required);
        String::new()
      }
    }
  }

  /// `Ok(value)` if nothing was recorded, otherwise the collected error.
  pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
    if self.problems.is_empty() {
      Ok(value)
    } else {
      Err(ValidationError { entity: self.entity, problems: self.problems })
    }
  }
}
