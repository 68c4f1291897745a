//! # carhub-api
//!
//! HTTP API layer for CarHub built on Axum.
//!
//! Provides the booking endpoints, middleware (CORS, request logging),
//! path extractors, DTOs, error mapping, and the wiring that assembles the
//! reservation workflow from configuration.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
