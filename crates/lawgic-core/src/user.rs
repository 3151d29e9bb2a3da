//! User accounts.
//!
//! Passwords are stored and returned as plaintext and roles are free text;
//! nothing in this workspace enforces authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  timestamp,
  validation::{Checker, ValidationError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
  pub first_name: String,
  pub last_name:  String,
  /// Unique across all users.
  pub username:   String,
  pub password:   String,
  /// Free-text date of birth, stored as given.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dob:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:      Option<String>,
  pub role:       String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub user_id:    Uuid,
  #[serde(flatten)]
  pub details:    UserDetails,
  #[serde(with = "timestamp::millis")]
  pub created_at: DateTime<Utc>,
  #[serde(with = "timestamp::millis")]
  pub updated_at: DateTime<Utc>,
}

/// An account as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub username:   Option<String>,
  pub password:   Option<String>,
  pub dob:        Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub role:       Option<String>,
}

impl NewUser {
  pub fn validate(self) -> Result<UserDetails, ValidationError> {
    let mut check = Checker::new("User");
    let details = UserDetails {
      first_name: check.required("firstName", self.first_name),
      last_name:  check.required("lastName", self.last_name),
      username:   check.required("username", self.username),
      password:   check.required("password", self.password),
      dob:        self.dob,
      email:      self.email,
      phone:      self.phone,
      role:       check.required("role", self.role),
    };
    check.finish(details)
  }
}
