//! Error types for Vedic calculations.

/// Validation failures for chart data and query inputs.
///
/// Every variant rejects the whole request; nothing here is recovered
/// locally. Degenerate but valid inputs (a house with no significators)
/// are not errors and resolve to neutral defaults at the call site.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum VedicError {
    /// A longitude was NaN or infinite.
    #[error("non-finite longitude for {what}: {value}")]
    NonFiniteLongitude {
        /// Which input carried the bad value.
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// House cusps must be supplied for exactly 12 houses.
    #[error("expected 12 house cusps, got {count}")]
    InvalidCuspCount {
        /// Number of cusps supplied.
        count: usize,
    },

    /// House number outside 1..=12.
    #[error("invalid house: {house} (must be 1..=12)")]
    InvalidHouse {
        /// The invalid house number.
        house: u8,
    },

    /// Dasha balance outside [0, 120) years or not finite.
    #[error("invalid dasha balance: {years} years (must be within 0..120)")]
    InvalidBalance {
        /// The offending balance in years.
        years: f64,
    },

    /// A forward span that is negative or not finite.
    #[error("invalid span: {years} years")]
    InvalidSpan {
        /// The offending span in years.
        years: f64,
    },

    /// A date range whose start lies after its end.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Range start, RFC 3339.
        start: String,
        /// Range end, RFC 3339.
        end: String,
    },

    /// Dasha queries are only defined from the birth instant onward.
    #[error("query {query} precedes birth {birth}")]
    QueryBeforeBirth {
        /// The query instant, RFC 3339.
        query: String,
        /// The birth instant, RFC 3339.
        birth: String,
    },

    /// Date arithmetic left the representable range.
    #[error("date out of range: {0}")]
    DateOutOfRange(&'static str),

    /// A chart listed the same graha twice.
    #[error("duplicate position for {graha}")]
    DuplicateGraha {
        /// English name of the repeated graha.
        graha: &'static str,
    },
}
