//! Renter display names.

use async_trait::async_trait;
use dashmap::DashMap;

use carhub_core::config::catalog::RenterSeed;
use carhub_core::result::AppResult;
use carhub_core::traits::catalog::RenterDirectory;
use carhub_core::types::RenterId;

/// Renter names loaded from configuration.
#[derive(Debug, Default)]
pub struct InMemoryRenterDirectory {
    names: DashMap<RenterId, String>,
}

impl InMemoryRenterDirectory {
    /// Builds the directory from seed records.
    pub fn from_seeds(seeds: &[RenterSeed]) -> Self {
        Self {
            names: seeds
                .iter()
                .map(|renter| (renter.id, renter.display_name.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl RenterDirectory for InMemoryRenterDirectory {
    async fn resolve_renter_display_name(&self, renter_id: RenterId) -> AppResult<String> {
        Ok(self
            .names
            .get(&renter_id)
            .map(|name| name.value().clone())
            .unwrap_or_default())
    }
}
