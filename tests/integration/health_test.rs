//! Integration tests for the health endpoint.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_health_reports_cache() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["cache"], "connected");
    assert_eq!(response.body["data"]["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/vehicles", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
