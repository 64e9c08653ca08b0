//! HTTP-level tests for desk and meeting-room bookings.

mod common;

use axum::http::StatusCode;
use common::{body_json, from_now, get_auth, post_auth, post_json_auth, rfc3339};
use officehub_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER};

fn desk(desk_id: i64, start_h: i64, end_h: i64) -> serde_json::Value {
    serde_json::json!({
        "desk_id": desk_id,
        "start_date": rfc3339(from_now(start_h)),
        "end_date": rfc3339(from_now(end_h)),
    })
}

#[tokio::test]
async fn desk_booking_is_confirmed_and_notifies() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;

    let response = post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(1, 24, 32), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["booking_type"], "desk");
    assert_eq!(json["data"]["resource_id"], 1);
    assert_eq!(json["data"]["status"], "confirmed");

    let notifications = body_json(get_auth(app, "/api/v1/notifications", &token).await).await;
    let list = notifications["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["kind"], "booking");
    assert_eq!(list[0]["title"], "Booking confirmed");
}

#[tokio::test]
async fn overlapping_desk_booking_conflicts() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let alice = common::user_token(&pool, &app, "alice@test.com", ROLE_EMPLOYEE).await;
    let bob = common::user_token(&pool, &app, "bob@test.com", ROLE_EMPLOYEE).await;

    let first = post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(2, 24, 28), &alice).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let clash = post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(2, 27, 30), &bob).await;
    assert_eq!(clash.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(clash).await["code"], "CONFLICT");

    // Back-to-back is fine.
    let adjacent = post_json_auth(app, "/api/v1/bookings/desk", desk(2, 28, 30), &bob).await;
    assert_eq!(adjacent.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn booking_window_is_validated() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;

    let inverted = post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(1, 30, 24), &token).await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(inverted).await["code"], "VALIDATION_ERROR");

    let past = post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(1, -5, -2), &token).await;
    assert_eq!(past.status(), StatusCode::BAD_REQUEST);

    let too_long = post_json_auth(app, "/api/v1/bookings/desk", desk(1, 24, 24 * 9), &token).await;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn room_booking_checks_title_and_capacity() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    let room = |title: &str, attendees: usize| {
        serde_json::json!({
            "room_id": 1,
            "start_date": rfc3339(from_now(24)),
            "end_date": rfc3339(from_now(25)),
            "title": title,
            "attendees": (0..attendees).map(|i| format!("p{i}@test.com")).collect::<Vec<_>>(),
        })
    };

    let blank = post_json_auth(app.clone(), "/api/v1/bookings/room", room("  ", 2), &token).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    // Room 1 seats four.
    let crowded = post_json_auth(app.clone(), "/api/v1/bookings/room", room("All hands", 5), &token).await;
    assert_eq!(crowded.status(), StatusCode::BAD_REQUEST);

    let ok = post_json_auth(app, "/api/v1/bookings/room", room("Sprint review", 4), &token).await;
    assert_eq!(ok.status(), StatusCode::CREATED);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["booking_type"], "meeting");
    assert_eq!(json["data"]["title"], "Sprint review");
}

#[tokio::test]
async fn cancel_twice_is_invalid_state() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    let created = body_json(post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(3, 24, 26), &token).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let first = post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &token).await;
    assert_eq!(first.status(), StatusCode::OK);
    let json = body_json(first).await;
    assert_eq!(json["data"]["status"], "cancelled");

    let second = post_auth(app, &format!("/api/v1/bookings/{id}/cancel"), &token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "INVALID_STATE");
}

#[tokio::test]
async fn only_owner_or_elevated_may_cancel_or_view() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let owner = common::user_token(&pool, &app, "owner@test.com", ROLE_EMPLOYEE).await;
    let other = common::user_token(&pool, &app, "other@test.com", ROLE_EMPLOYEE).await;
    let manager = common::user_token(&pool, &app, "m@test.com", ROLE_MANAGER).await;
    let created = body_json(post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(4, 24, 26), &owner).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let peek = get_auth(app.clone(), &format!("/api/v1/bookings/{id}"), &other).await;
    assert_eq!(peek.status(), StatusCode::FORBIDDEN);
    let view = get_auth(app.clone(), &format!("/api/v1/bookings/{id}"), &manager).await;
    assert_eq!(view.status(), StatusCode::OK);

    let denied = post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &other).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let allowed = post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &manager).await;
    assert_eq!(allowed.status(), StatusCode::OK);

    // The owner learns who cancelled.
    let notifications = body_json(get_auth(app, "/api/v1/notifications", &owner).await).await;
    assert!(notifications["data"][0]["message"]
        .as_str()
        .unwrap()
        .ends_with("by an administrator"));
}

#[tokio::test]
async fn unknown_booking_is_404() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "a@test.com", ROLE_ADMIN).await;

    let response = post_auth(app, "/api/v1/bookings/4242/cancel", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_type_and_status() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(1, 24, 26), &token).await;
    let second = body_json(post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(2, 48, 50), &token).await).await;
    let id = second["data"]["id"].as_i64().unwrap();
    post_auth(app.clone(), &format!("/api/v1/bookings/{id}/cancel"), &token).await;

    let all = body_json(get_auth(app.clone(), "/api/v1/bookings", &token).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let confirmed = body_json(get_auth(app.clone(), "/api/v1/bookings?status=confirmed&type=desk", &token).await).await;
    let confirmed = confirmed["data"].as_array().unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0]["resource_id"], 1);

    let meetings = body_json(get_auth(app, "/api/v1/bookings?type=meeting", &token).await).await;
    assert!(meetings["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn desk_schedule_lists_confirmed_bookings_in_window() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;
    post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(5, 24, 26), &token).await;
    post_json_auth(app.clone(), "/api/v1/bookings/desk", desk(5, 100, 102), &token).await;

    let uri = format!(
        "/api/v1/desks/5/bookings?from={}&to={}",
        rfc3339(from_now(0)),
        rfc3339(from_now(48))
    );
    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn desk_under_maintenance_cannot_be_booked() {
    let pool = common::seeded_pool().await;
    let app = common::build_test_app(pool.clone());
    let admin = common::user_token(&pool, &app, "a@test.com", ROLE_ADMIN).await;
    let token = common::user_token(&pool, &app, "e@test.com", ROLE_EMPLOYEE).await;

    let body = serde_json::json!({ "status": "maintenance" });
    let response = common::put_json_auth(app.clone(), "/api/v1/admin/desks/6/status", body, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(app, "/api/v1/bookings/desk", desk(6, 24, 26), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
