//! Rental pricing.

use chrono::{DateTime, Utc};

use carhub_core::types::Money;

/// Cost of renting at `price_per_hour` over `[start, end)`.
///
/// Partial hours are charged pro rata; see [`Money::hourly`] for rounding.
pub fn rental_cost(price_per_hour: Money, start: DateTime<Utc>, end: DateTime<Utc>) -> Money {
    Money::hourly(price_per_hour, end - start)
}
