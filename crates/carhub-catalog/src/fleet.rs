//! Vehicles, models, and stations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use carhub_booking::HoldRegistry;
use carhub_core::config::catalog::{CatalogConfig, ModelSeed, VehicleSeed};
use carhub_core::result::AppResult;
use carhub_core::traits::catalog::{
    ModelDirectory, StationDirectory, VehicleAvailability, VehicleRef,
};
use carhub_core::types::{ModelId, StationId};

/// Fleet loaded from configuration.
///
/// When given the hold registry, availability skips vehicles that already
/// carry an overlapping active hold, so a model with several vehicles at a
/// station can be booked more than once for the same window.
pub struct InMemoryFleet {
    models: DashMap<ModelId, ModelSeed>,
    stations: DashMap<StationId, String>,
    /// Kept in configuration order; the first free match wins.
    vehicles: Vec<VehicleSeed>,
    holds: Option<Arc<dyn HoldRegistry>>,
}

impl std::fmt::Debug for InMemoryFleet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFleet")
            .field("models", &self.models.len())
            .field("stations", &self.stations.len())
            .field("vehicles", &self.vehicles.len())
            .finish()
    }
}

impl InMemoryFleet {
    /// Builds the fleet from the `[catalog]` section.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let models: DashMap<ModelId, ModelSeed> = config
            .models
            .iter()
            .map(|model| (model.id, model.clone()))
            .collect();
        let stations: DashMap<StationId, String> = config
            .stations
            .iter()
            .map(|station| (station.id, station.name.clone()))
            .collect();

        for vehicle in &config.vehicles {
            if !models.contains_key(&vehicle.model_id) {
                warn!(vehicle_id = %vehicle.id, model_id = %vehicle.model_id, "Vehicle references unknown model");
            }
            if !stations.contains_key(&vehicle.station_id) {
                warn!(vehicle_id = %vehicle.id, station_id = %vehicle.station_id, "Vehicle references unknown station");
            }
        }

        info!(
            models = models.len(),
            stations = stations.len(),
            vehicles = config.vehicles.len(),
            "Fleet catalog loaded"
        );

        Self {
            models,
            stations,
            vehicles: config.vehicles.clone(),
            holds: None,
        }
    }

    /// Skips vehicles with overlapping holds in `registry` when answering
    /// availability queries.
    pub fn with_hold_registry(mut self, registry: Arc<dyn HoldRegistry>) -> Self {
        self.holds = Some(registry);
        self
    }

    async fn is_free(
        &self,
        vehicle: &VehicleSeed,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let Some(holds) = &self.holds else {
            return Ok(true);
        };
        let overlapping = holds
            .find_overlapping(vehicle.id, start, end, Utc::now())
            .await?;
        Ok(overlapping.is_empty())
    }
}

#[async_trait]
impl VehicleAvailability for InMemoryFleet {
    async fn find_available_vehicle(
        &self,
        model_id: ModelId,
        station_id: StationId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Option<VehicleRef>> {
        let Some(price_per_hour) = self.models.get(&model_id).map(|m| m.price_per_hour) else {
            debug!(model_id = %model_id, "Availability query for unknown model");
            return Ok(None);
        };

        let candidates = self
            .vehicles
            .iter()
            .filter(|v| v.model_id == model_id && v.station_id == station_id);

        for vehicle in candidates {
            if self.is_free(vehicle, start, end).await? {
                return Ok(Some(VehicleRef {
                    vehicle_id: vehicle.id,
                    model_id,
                    price_per_hour,
                }));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl ModelDirectory for InMemoryFleet {
    async fn resolve_model_name(&self, model_id: ModelId) -> AppResult<Option<String>> {
        Ok(self.models.get(&model_id).map(|m| m.name.clone()))
    }
}

#[async_trait]
impl StationDirectory for InMemoryFleet {
    async fn resolve_station_name(&self, station_id: StationId) -> AppResult<Option<String>> {
        Ok(self.stations.get(&station_id).map(|s| s.value().clone()))
    }
}
