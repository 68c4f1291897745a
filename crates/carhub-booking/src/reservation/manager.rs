//! Reservation manager: lock a vehicle, price it, invoice it, hold it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use carhub_cache::keys;
use carhub_core::config::BookingConfig;
use carhub_core::error::AppError;
use carhub_core::result::AppResult;
use carhub_core::traits::catalog::{InvoiceIssuer, VehicleAvailability, VehicleRef};
use carhub_core::types::{BookingToken, ModelId, RenterId, StationId};

use crate::hold::{BookingHold, HoldRegistry};
use crate::lock::{DistributedLock, LockGuard};

use super::expiry::ExpiryScheduler;
use super::outcome::{BookingConfirmation, BookingOutcome};
use super::pricing;

/// A renter's request for a model at a station over a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Renter placing the booking.
    pub renter_id: RenterId,
    /// Requested model.
    pub model_id: ModelId,
    /// Pick-up station.
    pub station_id: StationId,
    /// Window start (inclusive).
    pub start_time: DateTime<Utc>,
    /// Window end (exclusive).
    pub end_time: DateTime<Utc>,
}

/// Orchestrates the booking-reservation workflow.
///
/// A successful reservation leaves the vehicle lock to lapse on its own
/// short TTL; from then on the registered hold is what keeps overlapping
/// requests for the same vehicle out.
pub struct ReservationManager {
    /// Finds a free vehicle for a request.
    availability: Arc<dyn VehicleAvailability>,
    /// Issues the pending invoice.
    invoices: Arc<dyn InvoiceIssuer>,
    /// Per-vehicle-per-slot lock.
    lock: DistributedLock,
    /// Active holds.
    registry: Arc<dyn HoldRegistry>,
    /// Deferred hold cleanup.
    expiry: ExpiryScheduler,
    /// Lifetime of an unpaid hold.
    hold_ttl: Duration,
    /// Lifetime of the vehicle lock.
    lock_ttl: Duration,
}

impl std::fmt::Debug for ReservationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationManager")
            .field("registry", &self.registry)
            .field("pending_expiries", &self.expiry.pending())
            .field("hold_ttl", &self.hold_ttl)
            .field("lock_ttl", &self.lock_ttl)
            .finish()
    }
}

impl ReservationManager {
    /// Creates a new reservation manager.
    pub fn new(
        availability: Arc<dyn VehicleAvailability>,
        invoices: Arc<dyn InvoiceIssuer>,
        lock: DistributedLock,
        registry: Arc<dyn HoldRegistry>,
        config: &BookingConfig,
    ) -> Self {
        Self {
            availability,
            invoices,
            lock,
            registry,
            expiry: ExpiryScheduler::new(),
            hold_ttl: config.hold_ttl(),
            lock_ttl: config.lock_ttl(),
        }
    }

    /// Number of holds with a pending expiry timer.
    pub fn pending_expiries(&self) -> usize {
        self.expiry.pending()
    }

    /// Attempts to reserve a vehicle for `request`.
    ///
    /// Returns `Unavailable` or `Conflict` without side effects when no
    /// vehicle fits or another booking holds it. Infrastructure errors after
    /// the lock is taken release the lock before they propagate.
    pub async fn create_booking(&self, request: BookingRequest) -> AppResult<BookingOutcome> {
        if request.end_time <= request.start_time {
            return Err(AppError::validation("Booking end time must be after its start time"));
        }

        let vehicle = match self
            .availability
            .find_available_vehicle(
                request.model_id,
                request.station_id,
                request.start_time,
                request.end_time,
            )
            .await?
        {
            Some(vehicle) => vehicle,
            None => {
                info!(
                    model_id = %request.model_id,
                    station_id = %request.station_id,
                    start = %request.start_time,
                    "No vehicle available"
                );
                return Ok(BookingOutcome::unavailable());
            }
        };

        let lock_key = keys::booking_lock(vehicle.vehicle_id, request.start_time);
        let Some(guard) = self.lock.try_acquire_owned(&lock_key, self.lock_ttl).await else {
            info!(vehicle_id = %vehicle.vehicle_id, key = %lock_key, "Vehicle lock contended");
            return Ok(BookingOutcome::conflict());
        };

        match self.reserve_locked(&request, &vehicle, &guard).await {
            Ok(outcome @ BookingOutcome::Reserved(_)) => Ok(outcome),
            Ok(outcome) => {
                self.lock.release_guard(&guard).await;
                Ok(outcome)
            }
            Err(e) => {
                error!(
                    vehicle_id = %vehicle.vehicle_id,
                    renter_id = %request.renter_id,
                    error = %e,
                    "Booking failed after lock acquisition, releasing lock"
                );
                self.lock.release_guard(&guard).await;
                Err(e)
            }
        }
    }

    /// The critical section, run while `guard` is held.
    async fn reserve_locked(
        &self,
        request: &BookingRequest,
        vehicle: &VehicleRef,
        guard: &LockGuard,
    ) -> AppResult<BookingOutcome> {
        let overlapping = self
            .registry
            .find_overlapping(vehicle.vehicle_id, request.start_time, request.end_time, Utc::now())
            .await?;
        if !overlapping.is_empty() {
            info!(
                vehicle_id = %vehicle.vehicle_id,
                holds = overlapping.len(),
                "Vehicle already held for an overlapping window"
            );
            return Ok(BookingOutcome::conflict());
        }

        let total_cost =
            pricing::rental_cost(vehicle.price_per_hour, request.start_time, request.end_time);
        let invoice = self.invoices.issue_pending_invoice(total_cost).await?;

        let hold_ttl = TimeDelta::from_std(self.hold_ttl)
            .map_err(|_| AppError::configuration("Hold TTL is out of range"))?;
        let created_at = Utc::now();
        let hold = BookingHold {
            token: invoice.token_seed,
            renter_id: request.renter_id,
            model_id: request.model_id,
            station_id: request.station_id,
            vehicle_id: vehicle.vehicle_id,
            start_time: request.start_time,
            end_time: request.end_time,
            total_cost,
            invoice_id: invoice.invoice_id,
            lock_key: guard.key().to_string(),
            lock_owner: guard.owner().to_string(),
            created_at,
            expires_at: created_at + hold_ttl,
        };

        if !self.registry.insert(hold.clone()).await? {
            return Err(AppError::internal(format!(
                "Booking token {} is already registered",
                hold.token
            )));
        }
        self.schedule_expiry(&hold);

        info!(
            token = %hold.token,
            invoice_id = %hold.invoice_id,
            vehicle_id = %hold.vehicle_id,
            total_cost = %hold.total_cost,
            expires_at = %hold.expires_at,
            "Booking hold registered"
        );

        Ok(BookingOutcome::Reserved(BookingConfirmation {
            invoice_id: hold.invoice_id,
            booking_token: hold.token,
            expires_at: hold.expires_at,
        }))
    }

    fn schedule_expiry(&self, hold: &BookingHold) {
        let registry = Arc::clone(&self.registry);
        let lock = self.lock.clone();
        let token = hold.token;
        let lock_key = hold.lock_key.clone();
        let lock_owner = hold.lock_owner.clone();

        self.expiry.schedule(token, self.hold_ttl, async move {
            match registry.remove(token).await {
                Ok(Some(_)) => info!(token = %token, "Booking hold expired"),
                Ok(None) => debug!(token = %token, "Expired hold already gone"),
                Err(e) => warn!(token = %token, error = %e, "Failed to evict expired hold"),
            }
            lock.release_if_owner(&lock_key, &lock_owner).await;
        });
    }

    /// Looks up an active hold. Holds past their expiry are reported absent
    /// even if the cleanup timer has not fired yet.
    pub async fn get_booking(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        let hold = self.registry.get(token).await?;
        Ok(hold.filter(|hold| !hold.is_expired_at(Utc::now())))
    }

    /// Removes a hold. Removing an absent hold is a no-op.
    pub async fn remove_booking(&self, token: BookingToken) -> AppResult<()> {
        if self.evict(token).await?.is_some() {
            info!(token = %token, "Booking hold removed");
        }
        Ok(())
    }

    /// Completes a hold after successful payment.
    ///
    /// Removes the hold, stops its timer, and releases its lock if still
    /// owned. Returns the hold, or `None` if it was absent or had expired.
    pub async fn confirm_booking(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        let now = Utc::now();
        match self.evict(token).await? {
            Some(hold) if !hold.is_expired_at(now) => {
                info!(
                    token = %token,
                    invoice_id = %hold.invoice_id,
                    vehicle_id = %hold.vehicle_id,
                    "Booking hold confirmed"
                );
                Ok(Some(hold))
            }
            Some(_) => {
                debug!(token = %token, "Confirmation arrived after hold expiry");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn evict(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        self.expiry.cancel(token);
        let removed = self.registry.remove(token).await?;
        if let Some(hold) = &removed {
            self.lock
                .release_if_owner(&hold.lock_key, &hold.lock_owner)
                .await;
        }
        Ok(removed)
    }
}
