//! The booking hold record.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carhub_core::types::{BookingToken, InvoiceId, ModelId, Money, RenterId, StationId, VehicleId};

/// A provisional reservation awaiting payment.
///
/// Created once by the reservation manager and never mutated; it leaves the
/// registry on payment, cancellation, or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingHold {
    /// Correlation token handed to the client.
    pub token: BookingToken,
    /// Renter who placed the booking.
    pub renter_id: RenterId,
    /// Requested model.
    pub model_id: ModelId,
    /// Pick-up station.
    pub station_id: StationId,
    /// Vehicle the hold pins.
    pub vehicle_id: VehicleId,
    /// Rental window start (inclusive).
    pub start_time: DateTime<Utc>,
    /// Rental window end (exclusive).
    pub end_time: DateTime<Utc>,
    /// Price fixed at creation.
    pub total_cost: Money,
    /// Pending invoice issued for this hold.
    pub invoice_id: InvoiceId,
    /// Lock key the hold was created under.
    pub lock_key: String,
    /// Owner value written into the lock entry.
    pub lock_owner: String,
    /// When the hold was registered.
    pub created_at: DateTime<Utc>,
    /// When the hold stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl BookingHold {
    /// Whether the hold is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the hold's window intersects `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}
