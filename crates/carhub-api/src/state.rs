//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use carhub_booking::{ReservationManager, SummaryAssembler};
use carhub_cache::CacheManager;
use carhub_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Cache manager (Redis or in-memory), backing the lock
    pub cache: Arc<CacheManager>,

    // ── Booking ──────────────────────────────────────────────
    /// Reservation workflow
    pub reservations: Arc<ReservationManager>,
    /// Confirmation summaries
    pub summaries: Arc<SummaryAssembler>,
}
