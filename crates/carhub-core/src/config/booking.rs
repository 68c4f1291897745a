//! Booking reservation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the reservation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long an unpaid hold lives before it is evicted, in seconds.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_seconds: u64,
    /// Expiry of the per-vehicle-per-slot lock, in seconds.
    ///
    /// Only needs to cover the span between the availability check and hold
    /// registration.
    #[serde(default = "default_lock_ttl")]
    pub lock_ttl_seconds: u64,
    /// Where holds are kept.
    #[serde(default)]
    pub registry: RegistryBackend,
    /// Rental terms shown on the confirmation summary.
    ///
    /// Empty means the built-in list.
    #[serde(default)]
    pub terms: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            hold_ttl_seconds: default_hold_ttl(),
            lock_ttl_seconds: default_lock_ttl(),
            registry: RegistryBackend::default(),
            terms: Vec::new(),
        }
    }
}

impl BookingConfig {
    /// Hold lifetime as a [`Duration`].
    pub fn hold_ttl(&self) -> Duration {
        Duration::from_secs(self.hold_ttl_seconds)
    }

    /// Lock lifetime as a [`Duration`].
    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_ttl_seconds)
    }
}

/// Backend used for the hold registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryBackend {
    /// Process-local concurrent map. Requires sticky routing by token when
    /// more than one instance serves traffic.
    Memory,
    /// Stored through the configured cache provider (shared when Redis).
    Cache,
}

impl Default for RegistryBackend {
    fn default() -> Self {
        Self::Memory
    }
}

impl std::fmt::Display for RegistryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryBackend::Memory => write!(f, "memory"),
            RegistryBackend::Cache => write!(f, "cache"),
        }
    }
}

fn default_hold_ttl() -> u64 {
    600
}

fn default_lock_ttl() -> u64 {
    5
}
