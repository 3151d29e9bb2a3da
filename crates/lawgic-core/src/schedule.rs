//! Hearing schedules. Each scheduling event is its own record; schedules are
//! never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  timestamp,
  validation::{Checker, Problem, ValidationError},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetails {
  /// The case this hearing belongs to. Not checked for existence.
  pub case_id:            Uuid,
  #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
  pub hearing_date:       Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub adjourn_reason:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub proceeding_summary: Option<String>,
  #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
  pub next_hearing_date:  Option<DateTime<Utc>>,
}

impl ScheduleDetails {
  pub fn new(case_id: Uuid, hearing_date: Option<DateTime<Utc>>) -> Self {
    Self {
      case_id,
      hearing_date,
      adjourn_reason: None,
      proceeding_summary: None,
      next_hearing_date: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
  #[serde(rename = "_id")]
  pub schedule_id: Uuid,
  #[serde(flatten)]
  pub details:     ScheduleDetails,
  #[serde(with = "timestamp::millis")]
  pub created_at:  DateTime<Utc>,
  #[serde(with = "timestamp::millis")]
  pub updated_at:  DateTime<Utc>,
}

/// A schedule as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
  pub case_id:            Option<String>,
  #[serde(default, with = "timestamp::option")]
  pub hearing_date:       Option<DateTime<Utc>>,
  pub adjourn_reason:     Option<String>,
  pub proceeding_summary: Option<String>,
  #[serde(default, with = "timestamp::option")]
  pub next_hearing_date:  Option<DateTime<Utc>>,
}

impl NewSchedule {
  pub fn validate(self) -> Result<ScheduleDetails, ValidationError> {
    let mut check = Checker::new("Schedule");
    let raw_id = check.required("caseId", self.case_id);
    let case_id = if raw_id.is_empty() {
      Uuid::nil()
    } else {
      Uuid::parse_str(raw_id.trim()).unwrap_or_else(|_| {
        check.push("caseId", Problem::Malformed(raw_id.clone()));
        Uuid::nil()
      })
    };

    check.finish(ScheduleDetails {
      case_id,
      hearing_date: self.hearing_date,
      adjourn_reason: self.adjourn_reason,
      proceeding_summary: self.proceeding_summary,
      next_hearing_date: self.next_hearing_date,
    })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn new_schedule(value: serde_json::Value) -> NewSchedule {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn case_id_is_required() {
    let err = new_schedule(json!({ "hearingDate": "2024-05-01" }))
      .validate()
      .unwrap_err();
    assert_eq!(err.entity, "Schedule");
    assert!(err.has("caseId"));
  }

  #[test]
  fn malformed_case_id_is_rejected() {
    let err = new_schedule(json!({ "caseId": "65f1c0ffee" })).validate().unwrap_err();
    assert!(err.to_string().contains("Cast failed"));
  }

  #[test]
  fn any_well_formed_case_id_is_accepted() {
    let id = Uuid::new_v4();
    let details = new_schedule(json!({
      "caseId": id,
      "hearingDate": "2024-05-01T10:00:00Z",
      "adjournReason": "witness unavailable",
    }))
    .validate()
    .unwrap();
    assert_eq!(details.case_id, id);
    assert_eq!(
      details.hearing_date.map(timestamp::format).as_deref(),
      Some("2024-05-01T10:00:00.000Z")
    );
    assert_eq!(details.adjourn_reason.as_deref(), Some("witness unavailable"));
  }
}
