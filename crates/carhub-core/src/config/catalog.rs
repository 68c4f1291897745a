//! Seed data for the in-memory reference catalog.
//!
//! Production deployments replace the catalog with real lookup services;
//! this section lets the server run standalone.

use serde::{Deserialize, Serialize};

use crate::types::{ModelId, Money, RenterId, StationId, VehicleId};

/// Fleet, station, and renter records loaded at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Pick-up stations.
    #[serde(default)]
    pub stations: Vec<StationSeed>,
    /// Rentable models with their hourly price.
    #[serde(default)]
    pub models: Vec<ModelSeed>,
    /// Physical vehicles, each parked at a station.
    #[serde(default)]
    pub vehicles: Vec<VehicleSeed>,
    /// Known renters.
    #[serde(default)]
    pub renters: Vec<RenterSeed>,
}

/// A pick-up station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationSeed {
    /// Station ID.
    pub id: StationId,
    /// Display name.
    pub name: String,
}

/// A vehicle model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSeed {
    /// Model ID.
    pub id: ModelId,
    /// Display name.
    pub name: String,
    /// Price per hour in minor units.
    pub price_per_hour: Money,
}

/// A vehicle instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSeed {
    /// Vehicle ID.
    pub id: VehicleId,
    /// Model this vehicle belongs to.
    pub model_id: ModelId,
    /// Station the vehicle is parked at.
    pub station_id: StationId,
}

/// A renter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenterSeed {
    /// Renter ID.
    pub id: RenterId,
    /// Name shown on confirmations.
    pub display_name: String,
}
