//! Read-only projection of a hold into a confirmation view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use carhub_core::result::AppResult;
use carhub_core::traits::catalog::{ModelDirectory, RenterDirectory, StationDirectory};
use carhub_core::types::{BookingToken, InvoiceId, Money, VehicleId};

use crate::reservation::ReservationManager;

use super::terms::default_terms;

const UNKNOWN_MODEL: &str = "Unknown model";
const UNKNOWN_STATION: &str = "Unknown station";
const UNKNOWN_RENTER: &str = "Unknown renter";

/// What the renter sees before paying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    /// Hold token.
    pub token: BookingToken,
    /// Pending invoice.
    pub invoice_id: InvoiceId,
    /// Held vehicle.
    pub vehicle_id: VehicleId,
    /// Model display name.
    pub model_name: String,
    /// Station display name.
    pub station_name: String,
    /// Renter display name.
    pub renter_name: String,
    /// Window start.
    pub start_time: DateTime<Utc>,
    /// Window end.
    pub end_time: DateTime<Utc>,
    /// Price fixed at reservation.
    pub total_cost: Money,
    /// When the hold lapses.
    pub expires_at: DateTime<Utc>,
    /// Rental terms.
    pub terms: Vec<String>,
}

/// Builds [`BookingSummary`] values.
///
/// Never fails: a missing hold or any collaborator error yields `None`.
pub struct SummaryAssembler {
    reservations: Arc<ReservationManager>,
    models: Arc<dyn ModelDirectory>,
    stations: Arc<dyn StationDirectory>,
    renters: Arc<dyn RenterDirectory>,
    terms: Vec<String>,
}

impl std::fmt::Debug for SummaryAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryAssembler")
            .field("terms", &self.terms.len())
            .finish()
    }
}

impl SummaryAssembler {
    /// Creates an assembler. An empty `terms` list selects the built-in terms.
    pub fn new(
        reservations: Arc<ReservationManager>,
        models: Arc<dyn ModelDirectory>,
        stations: Arc<dyn StationDirectory>,
        renters: Arc<dyn RenterDirectory>,
        terms: Vec<String>,
    ) -> Self {
        let terms = if terms.is_empty() { default_terms() } else { terms };
        Self {
            reservations,
            models,
            stations,
            renters,
            terms,
        }
    }

    /// Summary for `token`, or `None` if the hold is gone or a lookup failed.
    pub async fn get_summary(&self, token: BookingToken) -> Option<BookingSummary> {
        match self.assemble(token).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(token = %token, error = %e, "Failed to assemble booking summary");
                None
            }
        }
    }

    async fn assemble(&self, token: BookingToken) -> AppResult<Option<BookingSummary>> {
        let Some(hold) = self.reservations.get_booking(token).await? else {
            debug!(token = %token, "No active hold for summary");
            return Ok(None);
        };

        let (model_name, station_name, renter_name) = tokio::try_join!(
            self.models.resolve_model_name(hold.model_id),
            self.stations.resolve_station_name(hold.station_id),
            self.renters.resolve_renter_display_name(hold.renter_id),
        )?;

        let renter_name = if renter_name.trim().is_empty() {
            UNKNOWN_RENTER.to_string()
        } else {
            renter_name
        };

        Ok(Some(BookingSummary {
            token: hold.token,
            invoice_id: hold.invoice_id,
            vehicle_id: hold.vehicle_id,
            model_name: model_name.unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            station_name: station_name.unwrap_or_else(|| UNKNOWN_STATION.to_string()),
            renter_name,
            start_time: hold.start_time,
            end_time: hold.end_time,
            total_cost: hold.total_cost,
            expires_at: hold.expires_at,
            terms: self.terms.clone(),
        }))
    }
}
