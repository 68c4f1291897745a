//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde_json::Value;
use tower::ServiceExt;

use carhub_cache::CacheManager;
use carhub_core::config::AppConfig;
use carhub_core::config::catalog::{ModelSeed, RenterSeed, StationSeed, VehicleSeed};
use carhub_core::types::{ModelId, Money, RenterId, StationId, VehicleId};

/// Seeded catalog identifiers.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Station with one vehicle.
    pub station: StationId,
    /// Model priced at 100.00/h with one vehicle at `station`.
    pub model: ModelId,
    /// Model with no vehicles.
    pub unstocked_model: ModelId,
    /// The only vehicle.
    pub vehicle: VehicleId,
    /// Renter with a display name.
    pub renter: RenterId,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// The key-value store the app's locks and holds live in
    pub cache: Arc<CacheManager>,
    /// Seeded identifiers
    pub fixture: Fixture,
}

impl TestApp {
    /// Create a new test application on the in-memory backends
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let fixture = Fixture {
            station: StationId::new(),
            model: ModelId::new(),
            unstocked_model: ModelId::new(),
            vehicle: VehicleId::new(),
            renter: RenterId::new(),
        };

        let mut config = AppConfig::default();
        config.logging.format = "pretty".to_string();
        config.catalog.stations = vec![StationSeed {
            id: fixture.station,
            name: "Central Station".to_string(),
        }];
        config.catalog.models = vec![
            ModelSeed {
                id: fixture.model,
                name: "Compact Hatchback".to_string(),
                price_per_hour: Money::from_major(100),
            },
            ModelSeed {
                id: fixture.unstocked_model,
                name: "Convertible".to_string(),
                price_per_hour: Money::from_major(150),
            },
        ];
        config.catalog.vehicles = vec![VehicleSeed {
            id: fixture.vehicle,
            model_id: fixture.model,
            station_id: fixture.station,
        }];
        config.catalog.renters = vec![RenterSeed {
            id: fixture.renter,
            display_name: "Alex Morgan".to_string(),
        }];
        adjust(&mut config);

        let state = carhub_api::build_state(config.clone())
            .await
            .expect("Failed to build app state");
        let cache = Arc::clone(&state.cache);
        let router = carhub_api::build_app(state);

        Self {
            router,
            config,
            cache,
            fixture,
        }
    }

    /// Booking request body for the stocked model.
    pub fn booking_body(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
        serde_json::json!({
            "renterId": self.fixture.renter,
            "modelId": self.fixture.model,
            "stationId": self.fixture.station,
            "startTime": start,
            "endTime": end,
        })
    }

    /// Reserve the stocked model and return the booking token.
    pub async fn reserve(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        let response = self
            .request("POST", "/api/bookings", Some(self.booking_body(start, end)))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Reservation failed: {:?}",
            response.body
        );
        response
            .body
            .get("bookingToken")
            .and_then(|v| v.as_str())
            .expect("No bookingToken in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Tomorrow at `hour`:00 UTC.
pub fn tomorrow_at(hour: i64) -> DateTime<Utc> {
    let midnight = Utc::now()
        .duration_trunc(TimeDelta::days(1))
        .expect("truncate to day");
    midnight + TimeDelta::days(1) + TimeDelta::hours(hour)
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
