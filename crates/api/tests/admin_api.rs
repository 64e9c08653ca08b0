//! HTTP-level tests for alerts, analytics and administration.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json_auth, put_json_auth, StubDetector};
use officehub_core::compliance::CompliancePolicy;
use officehub_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER};

/// Check in at `desk_id` without a mask and return the alert id.
async fn violate(app: &axum::Router, token: &str, desk_id: i64) -> i64 {
    let body = serde_json::json!({ "desk_id": desk_id, "image": "data:image/png;base64,AAAA" });
    let response = post_json_auth(app.clone(), "/api/v1/attendance/check-in", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["alert"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn employees_see_only_their_alerts() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app_with(
        pool.clone(),
        Some(StubDetector::not_wearing(0.6)),
        CompliancePolicy::FailOpen,
    );
    let alice = common::user_token(&pool, &app, "alice@test.com", ROLE_EMPLOYEE).await;
    let bob = common::user_token(&pool, &app, "bob@test.com", ROLE_EMPLOYEE).await;
    let manager = common::user_token(&pool, &app, "m@test.com", ROLE_MANAGER).await;
    violate(&app, &alice, 1).await;
    violate(&app, &bob, 2).await;

    let mine = body_json(get_auth(app.clone(), "/api/v1/alerts", &alice).await).await;
    let mine = mine["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["severity"], "medium");

    // An employee cannot widen the filter to someone else.
    let bob_id = body_json(get_auth(app.clone(), "/api/v1/auth/me", &bob).await).await["data"]["id"].clone();
    let sneaky = body_json(get_auth(app.clone(), &format!("/api/v1/alerts?user_id={bob_id}"), &alice).await).await;
    assert_eq!(sneaky["data"].as_array().unwrap().len(), 1);
    assert_ne!(sneaky["data"][0]["user_id"], bob_id);

    let all = body_json(get_auth(app, "/api/v1/alerts", &manager).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn manager_resolves_alert_once() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app_with(
        pool.clone(),
        Some(StubDetector::not_wearing(0.95)),
        CompliancePolicy::FailOpen,
    );
    let employee = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    let manager = common::user_token(&pool, &app, "m@test.com", ROLE_MANAGER).await;
    let alert_id = violate(&app, &employee, 1).await;
    let uri = format!("/api/v1/alerts/{alert_id}/resolve");

    let denied = post_auth(app.clone(), &uri, &employee).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let resolved = post_auth(app.clone(), &uri, &manager).await;
    assert_eq!(resolved.status(), StatusCode::OK);
    let json = body_json(resolved).await;
    assert_eq!(json["data"]["resolved"], true);
    assert!(json["data"]["resolved_at"].is_string());

    let again = post_auth(app.clone(), &uri, &manager).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let open = body_json(get_auth(app, "/api/v1/alerts?resolved=false", &manager).await).await;
    assert!(open["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn overview_counts_occupancy_and_compliance() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app_with(
        pool.clone(),
        Some(StubDetector::not_wearing(0.9)),
        CompliancePolicy::FailOpen,
    );
    let employee = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    let manager = common::user_token(&pool, &app, "m@test.com", ROLE_MANAGER).await;
    violate(&app, &employee, 1).await;

    let denied = get_auth(app.clone(), "/api/v1/analytics/overview", &employee).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/v1/analytics/overview", &manager).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["desks"]["total"], 8);
    assert_eq!(data["desks"]["occupied"], 1);
    assert_eq!(data["active_presence"], 1);
    assert_eq!(data["compliance"]["non_compliant"], 1);
    assert_eq!(data["compliance"]["compliance_rate"], 0.0);
    assert_eq!(data["open_alerts"], 1);

    let offices = body_json(get_auth(app.clone(), "/api/v1/analytics/offices", &manager).await).await;
    assert_eq!(offices["data"][0]["office_name"], "Test Office");
    assert_eq!(offices["data"][0]["desks"]["occupied"], 1);

    let me = body_json(get_auth(app, "/api/v1/analytics/me", &employee).await).await;
    assert_eq!(me["data"]["check_ins"], 1);
}

#[tokio::test]
async fn overview_rejects_inverted_window() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let manager = common::user_token(&pool, &app, "m@test.com", ROLE_MANAGER).await;

    let response = get_auth(
        app,
        "/api/v1/analytics/overview?from=2030-01-02T00:00:00Z&to=2030-01-01T00:00:00Z",
        &manager,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_changes_roles() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let admin = common::user_token(&pool, &app, "a@test.com", ROLE_ADMIN).await;
    let employee = common::create_user(&pool, "e@test.com", ROLE_EMPLOYEE).await;
    let uri = format!("/api/v1/admin/users/{}/role", employee.id);

    let bogus = put_json_auth(app.clone(), &uri, serde_json::json!({ "role": "overlord" }), &admin).await;
    assert_eq!(bogus.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bogus).await["code"], "VALIDATION_ERROR");

    let promoted = put_json_auth(app.clone(), &uri, serde_json::json!({ "role": "manager" }), &admin).await;
    assert_eq!(promoted.status(), StatusCode::OK);
    assert_eq!(body_json(promoted).await["data"]["role"], "manager");

    // The new role applies from the next login.
    let token = common::login(&app, "e@test.com").await;
    let overview = get_auth(app.clone(), "/api/v1/analytics/overview", &token).await;
    assert_eq!(overview.status(), StatusCode::OK);

    let users = body_json(get_auth(app.clone(), "/api/v1/admin/users", &admin).await).await;
    assert_eq!(users["data"].as_array().unwrap().len(), 2);

    let missing = put_json_auth(app, "/api/v1/admin/users/999/role", serde_json::json!({ "role": "manager" }), &admin).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn occupied_desk_cannot_go_into_maintenance() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let admin = common::user_token(&pool, &app, "a@test.com", ROLE_ADMIN).await;
    let employee = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    let body = serde_json::json!({ "desk_id": 3, "image": null });
    post_json_auth(app.clone(), "/api/v1/attendance/check-in", body, &employee).await;

    let maintenance = serde_json::json!({ "status": "maintenance" });
    let response = put_json_auth(app.clone(), "/api/v1/admin/desks/3/status", maintenance.clone(), &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let occupied = serde_json::json!({ "status": "occupied" });
    let response = put_json_auth(app.clone(), "/api/v1/admin/desks/4/status", occupied, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app, "/api/v1/admin/rooms/2/status", maintenance, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "maintenance");
}

#[tokio::test]
async fn rooms_can_be_filtered_by_status() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let admin = common::user_token(&pool, &app, "a@test.com", ROLE_ADMIN).await;

    let maintenance = serde_json::json!({ "status": "maintenance" });
    let response = put_json_auth(app.clone(), "/api/v1/admin/rooms/2/status", maintenance, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), "/api/v1/floors/1/rooms?status=maintenance", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rooms = body_json(response).await["data"].as_array().cloned().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], 2);

    let response = get_auth(app.clone(), "/api/v1/floors/1/rooms?status=available", &admin).await;
    let rooms = body_json(response).await["data"].as_array().cloned().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], 1);

    let response = get_auth(app, "/api/v1/floors/1/rooms", &admin).await;
    assert_eq!(body_json(response).await["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn managers_cannot_use_admin_routes() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let manager = common::user_token(&pool, &app, "m@test.com", ROLE_MANAGER).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/admin/rooms/1/status",
        serde_json::json!({ "status": "maintenance" }),
        &manager,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/admin/events", &manager).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
