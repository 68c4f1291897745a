//! Application builder: wires configuration into state, and state plus
//! middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use carhub_booking::{
    DistributedLock, HoldRegistry, HoldRegistryDispatch, ReservationManager, SummaryAssembler,
};
use carhub_cache::CacheManager;
use carhub_catalog::{InMemoryFleet, InMemoryInvoiceLedger, InMemoryRenterDirectory};
use carhub_core::config::AppConfig;
use carhub_core::result::AppResult;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Assembles the reservation workflow and its collaborators from `config`.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    // ── Step 1: Key-value store ──────────────────────────────────
    info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 2: Hold registry and lock ───────────────────────────
    let registry: Arc<dyn HoldRegistry> = Arc::new(HoldRegistryDispatch::new(
        config.booking.registry,
        Arc::clone(&cache),
    ));
    let lock = DistributedLock::new(Arc::clone(&cache));

    // ── Step 3: Catalog collaborators ────────────────────────────
    let fleet = Arc::new(
        InMemoryFleet::from_config(&config.catalog).with_hold_registry(Arc::clone(&registry)),
    );
    let invoices = Arc::new(InMemoryInvoiceLedger::new());
    let renters = Arc::new(InMemoryRenterDirectory::from_seeds(&config.catalog.renters));

    // ── Step 4: Booking services ─────────────────────────────────
    let reservations = Arc::new(ReservationManager::new(
        Arc::clone(&fleet) as _,
        invoices,
        lock,
        registry,
        &config.booking,
    ));
    let summaries = Arc::new(SummaryAssembler::new(
        Arc::clone(&reservations),
        Arc::clone(&fleet) as _,
        fleet,
        renters,
        config.booking.terms.clone(),
    ));

    info!(
        hold_ttl_seconds = config.booking.hold_ttl_seconds,
        lock_ttl_seconds = config.booking.lock_ttl_seconds,
        registry = %config.booking.registry,
        "Booking services initialized"
    );

    Ok(AppState {
        config: Arc::new(config),
        cache,
        reservations,
        summaries,
    })
}
