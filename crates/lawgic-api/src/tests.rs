//! End-to-end tests driving [`api_router`] over an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use lawgic_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();

  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn create_case(app: &Router, body: Value) -> Value {
  let (status, resp) = send(app, "POST", "/cases", Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "{resp}");
  resp["data"].clone()
}

fn user_body(username: &str, password: &str) -> Value {
  json!({
    "firstName": "Asha",
    "lastName": "Rao",
    "username": username,
    "password": password,
    "role": "lawyer",
  })
}

fn ids(list: &Value) -> Vec<&str> {
  list
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["_id"].as_str().unwrap())
    .collect()
}

// ── Cases ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_fetch_case() {
  let app = app().await;

  let (status, resp) = send(&app, "POST", "/cases", Some(json!({ "defendantName": "J. Doe" }))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(resp["message"], "Case added successfully");
  assert_eq!(resp["data"]["status"], "Pending");
  assert_eq!(resp["data"]["createdAt"], resp["data"]["updatedAt"]);

  let id = resp["data"]["_id"].as_str().unwrap();
  let (status, case) = send(&app, "GET", &format!("/cases/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(case["defendantName"], "J. Doe");
  assert_eq!(case["_id"], id);
  assert!(case.get("lawyerName").is_none());
}

#[tokio::test]
async fn create_case_without_defendant_is_400() {
  let app = app().await;

  for body in [
    json!({}),
    json!({ "defendantName": null }),
    json!({ "defendantName": "" }),
    json!({ "crimeType": "Theft", "status": "Ongoing" }),
  ] {
    let (status, resp) = send(&app, "POST", "/cases", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(
      resp["error"],
      "Case validation failed: defendantName: Path `defendantName` is required."
    );
  }
}

#[tokio::test]
async fn create_case_with_unknown_status_is_400() {
  let app = app().await;
  let (status, resp) = send(
    &app,
    "POST",
    "/cases",
    Some(json!({ "defendantName": "A", "status": "Closed" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    resp["error"],
    "Case validation failed: status: `Closed` is not a valid enum value for path `status`."
  );
}

#[tokio::test]
async fn create_case_with_bad_date_is_400() {
  let app = app().await;
  let (status, resp) = send(
    &app,
    "POST",
    "/cases",
    Some(json!({ "defendantName": "A", "crimeDate": "last tuesday" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(resp["error"].is_string());
}

#[tokio::test]
async fn out_of_range_years_are_rejected_and_listing_survives() {
  let app = app().await;
  let good = create_case(&app, json!({ "defendantName": "Good" })).await;

  for body in [
    json!({ "defendantName": "Far", "crimeDate": "+10000-01-01" }),
    json!({ "defendantName": "Far", "arrestDate": "-0001-01-01T00:00:00Z" }),
    json!({ "defendantName": "Far", "startDate": "9999-12-31T23:00:00-05:00" }),
  ] {
    let (status, _) = send(&app, "POST", "/cases", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
  }

  let uri = format!("/cases/{}", good["_id"].as_str().unwrap());
  let (status, _) = send(&app, "PUT", &uri, Some(json!({ "crimeDate": "+10000-01-01" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(
    &app,
    "POST",
    "/schedule",
    Some(json!({ "caseId": Uuid::new_v4(), "hearingDate": "+10000-01-01" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, list) = send(&app, "GET", "/cases/status/Pending", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![good["_id"].as_str().unwrap()]);
}

#[tokio::test]
async fn malformed_json_is_400() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/cases")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{ not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_case_errors() {
  let app = app().await;

  let (status, resp) = send(&app, "GET", &format!("/cases/{}", Uuid::new_v4()), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(resp["error"], "Case not found");

  let (status, _) = send(&app, "GET", "/cases/not-an-id", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_case_merges_fields() {
  let app = app().await;
  let case = create_case(
    &app,
    json!({ "defendantName": "J. Doe", "lawyerName": "John Smith", "judgeName": "Hon. Patel" }),
  )
  .await;
  let id = case["_id"].as_str().unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(3)).await;

  let (status, resp) = send(
    &app,
    "PUT",
    &format!("/cases/{id}"),
    Some(json!({ "status": "Resolved", "lawyerName": null })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{resp}");
  assert_eq!(resp["message"], "Case updated successfully");

  let updated = &resp["data"];
  assert_eq!(updated["status"], "Resolved");
  assert!(updated.get("lawyerName").is_none());
  assert_eq!(updated["judgeName"], "Hon. Patel");
  assert_eq!(updated["createdAt"], case["createdAt"]);
  assert_ne!(updated["updatedAt"], case["updatedAt"]);
}

#[tokio::test]
async fn update_missing_case_is_404() {
  let app = app().await;
  let (status, resp) = send(
    &app,
    "PUT",
    &format!("/cases/{}", Uuid::new_v4()),
    Some(json!({ "status": "Resolved" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(resp["error"], "Case not found");
}

#[tokio::test]
async fn update_rejects_invalid_changes() {
  let app = app().await;
  let case = create_case(&app, json!({ "defendantName": "J. Doe" })).await;
  let uri = format!("/cases/{}", case["_id"].as_str().unwrap());

  for body in [
    json!({ "status": "Closed" }),
    json!({ "defendantName": "" }),
    json!({ "defendantName": null }),
  ] {
    let (status, _) = send(&app, "PUT", &uri, Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
  }

  let (_, unchanged) = send(&app, "GET", &uri, None).await;
  assert_eq!(unchanged["defendantName"], "J. Doe");
  assert_eq!(unchanged["status"], "Pending");
}

// ── Listings ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn resolved_listing_is_most_recently_modified_first() {
  let app = app().await;
  let pause = || tokio::time::sleep(std::time::Duration::from_millis(3));

  let a = create_case(&app, json!({ "defendantName": "A", "status": "Resolved" })).await;
  pause().await;
  let b = create_case(&app, json!({ "defendantName": "B", "status": "Resolved" })).await;
  pause().await;
  create_case(&app, json!({ "defendantName": "C" })).await;
  pause().await;

  let a_id = a["_id"].as_str().unwrap();
  let (status, _) = send(
    &app,
    "PUT",
    &format!("/cases/{a_id}"),
    Some(json!({ "courtName": "District Court" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, list) = send(&app, "GET", "/cases/status/Resolved", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![a_id, b["_id"].as_str().unwrap()]);
  assert!(list.as_array().unwrap().iter().all(|c| c["status"] == "Resolved"));
}

#[tokio::test]
async fn pending_listing_is_newest_first() {
  let app = app().await;
  let first = create_case(&app, json!({ "defendantName": "first" })).await;
  tokio::time::sleep(std::time::Duration::from_millis(3)).await;
  let second = create_case(&app, json!({ "defendantName": "second" })).await;

  let (status, list) = send(&app, "GET", "/cases/status/Pending", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    ids(&list),
    vec![second["_id"].as_str().unwrap(), first["_id"].as_str().unwrap()]
  );
}

#[tokio::test]
async fn empty_or_unknown_status_listing() {
  let app = app().await;

  let (status, resp) = send(&app, "GET", "/cases/status/Pending", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(resp["error"], "No Pending cases found");

  let (status, _) = send(&app, "GET", "/cases/status/Closed", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn keyword_search_is_case_insensitive() {
  let app = app().await;
  let smith = create_case(&app, json!({ "defendantName": "R. Roe", "lawyerName": "John Smith" })).await;
  create_case(&app, json!({ "defendantName": "Q. Public", "lawyerName": "Jane Doe" })).await;

  let (status, list) = send(&app, "GET", "/cases/search/smith", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![smith["_id"].as_str().unwrap()]);

  let (status, list) = send(&app, "GET", "/cases/search/SMITH", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);

  let (status, resp) = send(&app, "GET", "/cases/search/nobody", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(resp["error"], "No matching cases found");
}

#[tokio::test]
async fn search_ignores_case_of_accented_letters() {
  let app = app().await;
  let case = create_case(&app, json!({ "defendantName": "JOSÉ Ñúñez" })).await;

  let (status, list) = send(&app, "GET", "/cases/search/jos%C3%A9", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![case["_id"].as_str().unwrap()]);
}

#[tokio::test]
async fn court_officer_and_lawyer_filters() {
  let app = app().await;
  let case = create_case(
    &app,
    json!({
      "defendantName": "A",
      "courtName": "Madras High Court",
      "arrestOfficer": "Inspector Kumar",
      "lawyerName": "K. Iyer",
    }),
  )
  .await;
  let id = case["_id"].as_str().unwrap();

  for uri in ["/cases/court/high%20court", "/cases/officer/kumar", "/cases/lawyer/IYER"] {
    let (status, list) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    assert_eq!(ids(&list), vec![id], "{uri}");
  }

  for (uri, message) in [
    ("/cases/court/supreme", "No cases found for this court"),
    ("/cases/officer/singh", "No cases found for this officer"),
    ("/cases/lawyer/patel", "No cases found for this lawyer"),
  ] {
    let (status, resp) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    assert_eq!(resp["error"], message);
  }
}

// ── Schedules ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn hearing_lookup_returns_scheduled_case() {
  let app = app().await;
  let case = create_case(&app, json!({ "defendantName": "J. Doe" })).await;
  let case_id = case["_id"].as_str().unwrap();

  // Two hearings for the same case on the same day still list it once.
  for at in ["2024-05-01T10:00:00Z", "2024-05-01T11:30:00Z"] {
    let (status, resp) = send(
      &app,
      "POST",
      "/schedule",
      Some(json!({ "caseId": case_id, "hearingDate": at })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{resp}");
    assert_eq!(resp["message"], "Case scheduled successfully");
    assert_eq!(resp["data"]["caseId"], case_id);
  }

  let (status, list) = send(&app, "GET", "/cases/hearing/2024-05-01", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![case_id]);
}

#[tokio::test]
async fn hearing_lookup_errors() {
  let app = app().await;

  let (status, resp) = send(&app, "GET", "/cases/hearing/2099-01-01", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(resp["error"], "No hearings found on this date");

  for date in ["someday", "+262142-12-31", "10000-01-01"] {
    let (status, resp) = send(&app, "GET", &format!("/cases/hearing/{date}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{date}");
    assert!(resp["error"].as_str().unwrap().starts_with("invalid hearing date"));
  }
}

#[tokio::test]
async fn dangling_schedule_yields_empty_list() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    "/schedule",
    Some(json!({ "caseId": Uuid::new_v4(), "hearingDate": "2024-06-10T09:00:00Z" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, list) = send(&app, "GET", "/cases/hearing/2024-06-10", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn schedule_requires_well_formed_case_id() {
  let app = app().await;

  let (status, resp) = send(&app, "POST", "/schedule", Some(json!({ "hearingDate": "2024-05-01" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    resp["error"],
    "Schedule validation failed: caseId: Path `caseId` is required."
  );

  let (status, _) = send(&app, "POST", "/schedule", Some(json!({ "caseId": "42" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Users ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_fetch_user() {
  let app = app().await;

  let (status, resp) = send(&app, "POST", "/users", Some(user_body("arao", "hunter2"))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(resp["message"], "User account created successfully");
  assert_eq!(resp["user"]["username"], "arao");
  assert_eq!(resp["user"]["password"], "hunter2");

  let (status, user) = send(&app, "GET", "/users/arao", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(user["_id"], resp["user"]["_id"]);

  let (status, resp) = send(&app, "GET", "/users/nobody", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(resp["error"], "User not found");
}

#[tokio::test]
async fn duplicate_username_is_400() {
  let app = app().await;
  let (status, _) = send(&app, "POST", "/users", Some(user_body("arao", "one"))).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, resp) = send(&app, "POST", "/users", Some(user_body("arao", "two"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(resp["error"], "username already exists: arao");
}

#[tokio::test]
async fn create_user_missing_fields_is_400() {
  let app = app().await;
  let (status, resp) = send(&app, "POST", "/users", Some(json!({ "username": "arao" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let message = resp["error"].as_str().unwrap();
  assert!(message.starts_with("User validation failed: "), "{message}");
  assert!(message.contains("password: Path `password` is required."), "{message}");
}

#[tokio::test]
async fn login_checks_both_fields() {
  let app = app().await;
  send(&app, "POST", "/users", Some(user_body("arao", "hunter2"))).await;

  let (status, resp) = send(
    &app,
    "POST",
    "/login",
    Some(json!({ "username": "arao", "password": "hunter2" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(resp["message"], "Login successful");
  assert_eq!(resp["user"]["username"], "arao");

  for body in [
    json!({ "username": "arao", "password": "wrong" }),
    json!({ "username": "nobody", "password": "hunter2" }),
    json!({ "username": "arao" }),
  ] {
    let (status, resp) = send(&app, "POST", "/login", Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");
    assert_eq!(resp["error"], "Invalid username or password");
  }
}
