//! Cache key builders for all CarHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use chrono::{DateTime, Utc};

use carhub_core::types::{BookingToken, VehicleId};

/// Prefix applied to all CarHub cache keys.
const PREFIX: &str = "carhub";

// ── Lock keys ──────────────────────────────────────────────

/// Normalise a start time to the minute bucket used in lock keys.
pub fn slot_bucket(start: DateTime<Utc>) -> String {
    start.format("%Y%m%d%H%M").to_string()
}

/// Lock key serialising booking attempts on one vehicle for one start minute.
pub fn booking_lock(vehicle_id: VehicleId, start: DateTime<Utc>) -> String {
    format!("{PREFIX}:lock:booking:{vehicle_id}:{}", slot_bucket(start))
}

// ── Hold keys ──────────────────────────────────────────────

/// Cache key for a booking hold by token.
pub fn hold_by_token(token: BookingToken) -> String {
    format!("{PREFIX}:hold:{token}")
}

/// Cache key for the index of hold tokens on a vehicle.
pub fn vehicle_holds(vehicle_id: VehicleId) -> String {
    format!("{PREFIX}:hold:vehicle:{vehicle_id}")
}
