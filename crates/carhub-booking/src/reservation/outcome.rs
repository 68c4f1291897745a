//! Results of a booking attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carhub_core::types::{BookingToken, InvoiceId};

/// Message returned when no vehicle matches the request.
pub const UNAVAILABLE_MESSAGE: &str = "Model not available. Choose another time, station, or model.";

/// Message returned when another booking holds the vehicle.
pub const CONFLICT_MESSAGE: &str = "Please try again. Someone is booking this vehicle.";

/// Message returned with a successful reservation.
pub const RESERVED_MESSAGE: &str = "Vehicle reserved. Complete payment before the hold expires.";

/// What the client needs to continue to payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Pending invoice to pay.
    pub invoice_id: InvoiceId,
    /// Token identifying the hold.
    pub booking_token: BookingToken,
    /// When the hold lapses if unpaid.
    pub expires_at: DateTime<Utc>,
}

/// Expected outcomes of `create_booking`.
///
/// Infrastructure faults are reported through `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// A hold was registered.
    Reserved(BookingConfirmation),
    /// No vehicle fits the request. Retrying unchanged will not help.
    Unavailable {
        /// Human-readable reason.
        message: String,
    },
    /// Another booking is in progress or holds the vehicle. Retry.
    Conflict {
        /// Human-readable reason.
        message: String,
    },
}

impl BookingOutcome {
    pub(crate) fn unavailable() -> Self {
        Self::Unavailable {
            message: UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    pub(crate) fn conflict() -> Self {
        Self::Conflict {
            message: CONFLICT_MESSAGE.to_string(),
        }
    }

    /// Whether a hold was created.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    /// The confirmation, if reserved.
    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match self {
            Self::Reserved(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// User-facing message for this outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Reserved(_) => RESERVED_MESSAGE,
            Self::Unavailable { message } | Self::Conflict { message } => message,
        }
    }
}
