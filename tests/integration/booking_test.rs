//! Integration tests for the booking reservation flow.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use chrono::TimeDelta;

use carhub_cache::keys;
use carhub_core::config::RegistryBackend;
use carhub_core::traits::cache::CacheProvider;

use helpers::{TestApp, tomorrow_at};

#[tokio::test]
async fn test_reserve_then_summary() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);
    let end = start + TimeDelta::hours(2);

    let response = app
        .request("POST", "/api/bookings", Some(app.booking_body(start, end)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body.get("invoiceId").is_some());
    assert!(response.body.get("expiresAt").is_some());
    let token = response.body["bookingToken"].as_str().expect("token").to_string();

    let summary = app
        .request("GET", &format!("/api/bookings/{token}/summary"), None)
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    let data = &summary.body["data"];
    assert_eq!(data["token"], token.as_str());
    assert_eq!(data["modelName"], "Compact Hatchback");
    assert_eq!(data["stationName"], "Central Station");
    assert_eq!(data["renterName"], "Alex Morgan");
    assert_eq!(data["totalCost"], 20_000);
    assert_eq!(data["vehicleId"], app.fixture.vehicle.to_string());
    assert_eq!(data["terms"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn test_cost_for_partial_hours() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);
    let token = app.reserve(start, start + TimeDelta::minutes(150)).await;

    let hold = app.request("GET", &format!("/api/bookings/{token}"), None).await;
    assert_eq!(hold.status, StatusCode::OK);
    assert_eq!(hold.body["data"]["totalCost"], 25_000);
    assert!(hold.body["data"].get("lockOwner").is_none());
}

#[tokio::test]
async fn test_unavailable_model_is_422() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);
    let mut body = app.booking_body(start, start + TimeDelta::hours(1));
    body["modelId"] = serde_json::json!(app.fixture.unstocked_model);

    let response = app.request("POST", "/api/bookings", Some(body)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);
    assert_eq!(
        response.body["message"],
        "Model not available. Choose another time, station, or model."
    );
    assert!(response.body.get("bookingToken").is_none());
}

#[tokio::test]
async fn test_held_vehicle_is_not_offered() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);
    app.reserve(start, start + TimeDelta::hours(2)).await;

    let later = start + TimeDelta::minutes(30);
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(later, later + TimeDelta::hours(1))),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);

    // Back-to-back windows do not overlap.
    let after = start + TimeDelta::hours(2);
    app.reserve(after, after + TimeDelta::hours(1)).await;
}

#[tokio::test]
async fn test_contended_lock_is_409() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);

    // Another instance is mid-booking for the same vehicle and slot.
    let lock_key = keys::booking_lock(app.fixture.vehicle, start);
    assert!(
        app.cache
            .set_nx(&lock_key, "other-instance", Duration::from_secs(60))
            .await
            .unwrap()
    );

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(start, start + TimeDelta::hours(2))),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["success"], false);
    assert_eq!(
        response.body["message"],
        "Please try again. Someone is booking this vehicle."
    );
    assert!(response.body.get("bookingToken").is_none());

    // The other instance's lock is left alone.
    assert_eq!(
        app.cache.get(&lock_key).await.unwrap(),
        Some("other-instance".to_string())
    );

    // Once it lets go, the slot can be booked.
    app.cache.delete(&lock_key).await.unwrap();
    app.reserve(start, start + TimeDelta::hours(2)).await;
}

#[tokio::test]
async fn test_inverted_window_is_400() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);

    let response = app
        .request("POST", "/api/bookings", Some(app.booking_body(start, start)))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_token_is_404() {
    let app = TestApp::new().await;
    let token = uuid::Uuid::new_v4();

    let summary = app
        .request("GET", &format!("/api/bookings/{token}/summary"), None)
        .await;
    assert_eq!(summary.status, StatusCode::NOT_FOUND);
    assert_eq!(summary.body["message"], "Booking not found or expired");

    let confirm = app
        .request("POST", &format!("/api/bookings/{token}/confirm"), None)
        .await;
    assert_eq!(confirm.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_token_is_400() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/bookings/not-a-token", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirm_releases_hold() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);
    let token = app.reserve(start, start + TimeDelta::hours(2)).await;

    let confirm = app
        .request("POST", &format!("/api/bookings/{token}/confirm"), None)
        .await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert_eq!(confirm.body["data"]["token"], token.as_str());

    let summary = app
        .request("GET", &format!("/api/bookings/{token}/summary"), None)
        .await;
    assert_eq!(summary.status, StatusCode::NOT_FOUND);

    // Lock and hold are both gone, so the same slot can be booked again.
    app.reserve(start, start + TimeDelta::hours(2)).await;
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = TestApp::new().await;
    let start = tomorrow_at(9);
    let token = app.reserve(start, start + TimeDelta::hours(2)).await;

    let first = app.request("DELETE", &format!("/api/bookings/{token}"), None).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    let second = app.request("DELETE", &format!("/api/bookings/{token}"), None).await;
    assert_eq!(second.status, StatusCode::NO_CONTENT);

    let hold = app.request("GET", &format!("/api/bookings/{token}"), None).await;
    assert_eq!(hold.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cache_backed_registry() {
    let app = TestApp::with_config(|config| {
        config.booking.registry = RegistryBackend::Cache;
    })
    .await;
    let start = tomorrow_at(14);
    let token = app.reserve(start, start + TimeDelta::hours(3)).await;

    let summary = app
        .request("GET", &format!("/api/bookings/{token}/summary"), None)
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.body["data"]["totalCost"], 30_000);

    let overlapping = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.booking_body(start + TimeDelta::hours(1), start + TimeDelta::hours(4))),
        )
        .await;
    assert_eq!(overlapping.body["success"], false);
}
