//! Route definitions for the CarHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(booking_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Reservation, summary, confirmation, and cancellation
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route(
            "/bookings/{token}",
            get(handlers::booking::get_booking).delete(handlers::booking::remove_booking),
        )
        .route("/bookings/{token}/summary", get(handlers::booking::get_summary))
        .route("/bookings/{token}/confirm", post(handlers::booking::confirm_booking))
}

/// Liveness and cache status
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
