//! Contracts for the collaborators the reservation workflow depends on.
//!
//! Persistence, pricing tables, and invoicing live outside this service;
//! the booking core only sees these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{BookingToken, InvoiceId, ModelId, Money, RenterId, StationId, VehicleId};

/// A free vehicle returned by the availability lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRef {
    /// The physical vehicle.
    pub vehicle_id: VehicleId,
    /// The model the vehicle belongs to.
    pub model_id: ModelId,
    /// Hourly price of the vehicle's model.
    pub price_per_hour: Money,
}

/// Outcome of issuing a pending invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedInvoice {
    /// Identifier of the durable pending invoice.
    pub invoice_id: InvoiceId,
    /// Fresh unique token correlating the invoice with its booking hold.
    pub token_seed: BookingToken,
}

/// Finds a free vehicle instance for a model, station, and window.
///
/// Implementations do not lock the returned vehicle; the answer is only a
/// pre-filter and may be stale by the time the caller acts on it.
#[async_trait]
pub trait VehicleAvailability: Send + Sync + 'static {
    /// Return one vehicle of `model_id` at `station_id` free for
    /// `[start, end)`, or `None`.
    async fn find_available_vehicle(
        &self,
        model_id: ModelId,
        station_id: StationId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Option<VehicleRef>>;
}

/// Durably records a pending payment obligation.
#[async_trait]
pub trait InvoiceIssuer: Send + Sync + 'static {
    /// Issue a pending invoice for `amount`.
    async fn issue_pending_invoice(&self, amount: Money) -> AppResult<IssuedInvoice>;
}

/// Resolves model display names.
#[async_trait]
pub trait ModelDirectory: Send + Sync + 'static {
    /// `Ok(None)` when no such model exists.
    async fn resolve_model_name(&self, model_id: ModelId) -> AppResult<Option<String>>;
}

/// Resolves station display names.
#[async_trait]
pub trait StationDirectory: Send + Sync + 'static {
    /// `Ok(None)` when no such station exists.
    async fn resolve_station_name(&self, station_id: StationId) -> AppResult<Option<String>>;
}

/// Resolves renter display names.
#[async_trait]
pub trait RenterDirectory: Send + Sync + 'static {
    /// Returns the renter's display name. An empty string means the renter
    /// has no name on record.
    async fn resolve_renter_display_name(&self, renter_id: RenterId) -> AppResult<String>;
}
