//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use carhub_booking::BookingRequest;
use carhub_core::types::{ModelId, RenterId, StationId};

/// Create booking request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_window"))]
pub struct CreateBookingRequest {
    /// Renter placing the booking.
    pub renter_id: RenterId,
    /// Requested model.
    pub model_id: ModelId,
    /// Pick-up station.
    pub station_id: StationId,
    /// Window start.
    pub start_time: DateTime<Utc>,
    /// Window end.
    pub end_time: DateTime<Utc>,
}

fn validate_window(req: &CreateBookingRequest) -> Result<(), ValidationError> {
    if req.end_time <= req.start_time {
        let mut err = ValidationError::new("rental_window");
        err.message = Some("endTime must be after startTime".into());
        return Err(err);
    }
    Ok(())
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            renter_id: req.renter_id,
            model_id: req.model_id,
            station_id: req.station_id,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}
