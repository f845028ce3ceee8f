//! Shared utility functions for vedic calculations.

use chrono::{DateTime, Duration, Utc};

use crate::error::VedicError;

/// Year length used by all Vimshottari period arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 % 360 + 360 rounds to 360.0 exactly
    if r >= 360.0 { 0.0 } else { r }
}

/// Reject NaN/inf longitudes with a labelled error.
pub fn ensure_finite(what: &'static str, value: f64) -> Result<f64, VedicError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VedicError::NonFiniteLongitude { what, value })
    }
}

/// Signed number of days from `from` to `to`, at millisecond resolution.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Signed number of dasha years (365.25 days) from `from` to `to`.
pub fn years_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    days_between(from, to) / DAYS_PER_YEAR
}

/// Offset an instant by a fractional number of days.
pub fn add_days(instant: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, VedicError> {
    let millis = (days * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 / 2.0 {
        return Err(VedicError::DateOutOfRange("day offset too large"));
    }
    let delta = Duration::try_milliseconds(millis as i64)
        .ok_or(VedicError::DateOutOfRange("day offset too large"))?;
    instant
        .checked_add_signed(delta)
        .ok_or(VedicError::DateOutOfRange("instant overflow"))
}

/// Offset an instant by a fractional number of dasha years.
pub fn add_years(instant: DateTime<Utc>, years: f64) -> Result<DateTime<Utc>, VedicError> {
    add_days(instant, years * DAYS_PER_YEAR)
}
