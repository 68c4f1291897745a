//! Monetary amounts in minor currency units.

use std::fmt;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i128 = 3600;

/// A non-negative monetary amount stored as an integer number of minor
/// units (cents). Never a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Money = Money(0);

    /// Create an amount from minor units. Negative inputs clamp to zero.
    pub fn from_minor(minor: i64) -> Self {
        Self(minor.max(0))
    }

    /// Create an amount from whole major units (e.g. dollars).
    pub fn from_major(major: i64) -> Self {
        Self::from_minor(major.saturating_mul(100))
    }

    /// Return the amount in minor units.
    pub fn minor(self) -> i64 {
        self.0
    }

    /// Price a rental window at an hourly rate.
    ///
    /// Fractional hours are charged exactly; any sub-cent remainder rounds up.
    /// A zero or negative duration costs nothing.
    pub fn hourly(rate: Money, duration: TimeDelta) -> Self {
        let seconds = i128::from(duration.num_seconds());
        if seconds <= 0 {
            return Self::ZERO;
        }
        let numerator = i128::from(rate.0) * seconds;
        let total = (numerator + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR;
        Self(i64::try_from(total).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
