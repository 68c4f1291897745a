//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carhub_booking::{BookingHold, BookingOutcome};
use carhub_core::types::{
    BookingToken, InvoiceId, ModelId, Money, RenterId, StationId, VehicleId,
};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Result of a booking attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    /// Whether a hold was created.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Invoice to pay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<InvoiceId>,
    /// Token for the summary and payment steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_token: Option<BookingToken>,
    /// When the hold lapses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&BookingOutcome> for CreateBookingResponse {
    fn from(outcome: &BookingOutcome) -> Self {
        let confirmation = outcome.confirmation();
        Self {
            success: outcome.is_reserved(),
            message: outcome.message().to_string(),
            invoice_id: confirmation.map(|c| c.invoice_id),
            booking_token: confirmation.map(|c| c.booking_token),
            expires_at: confirmation.map(|c| c.expires_at),
        }
    }
}

/// A booking hold as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldResponse {
    /// Hold token.
    pub token: BookingToken,
    /// Renter.
    pub renter_id: RenterId,
    /// Model.
    pub model_id: ModelId,
    /// Station.
    pub station_id: StationId,
    /// Vehicle.
    pub vehicle_id: VehicleId,
    /// Window start.
    pub start_time: DateTime<Utc>,
    /// Window end.
    pub end_time: DateTime<Utc>,
    /// Price in minor units.
    pub total_cost: Money,
    /// Pending invoice.
    pub invoice_id: InvoiceId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

impl From<BookingHold> for HoldResponse {
    fn from(hold: BookingHold) -> Self {
        Self {
            token: hold.token,
            renter_id: hold.renter_id,
            model_id: hold.model_id,
            station_id: hold.station_id,
            vehicle_id: hold.vehicle_id,
            start_time: hold.start_time,
            end_time: hold.end_time,
            total_cost: hold.total_cost,
            invoice_id: hold.invoice_id,
            created_at: hold.created_at,
            expires_at: hold.expires_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Cache provider status.
    pub cache: String,
}
