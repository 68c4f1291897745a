//! Typed path parameter helpers.

use carhub_core::error::AppError;
use carhub_core::types::BookingToken;

/// Parses a booking token from a path segment.
pub fn parse_token(s: &str) -> Result<BookingToken, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid booking token: {s}")))
}
