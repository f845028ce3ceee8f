//! Error types for transit search and synthesis.

use samaya_vedic_base::VedicError;

/// Failure reported by a `PositionProvider`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The provider has no data for a graha at the requested instant.
    #[error("no position for {graha} at {instant}")]
    MissingBody {
        /// English name of the graha.
        graha: &'static str,
        /// Requested instant, RFC 3339.
        instant: String,
    },

    /// The provider cannot answer in the requested zodiac.
    #[error("unsupported zodiac mode: {mode}")]
    UnsupportedMode {
        /// Name of the mode.
        mode: &'static str,
    },

    /// The underlying position source failed.
    #[error("position source failed: {reason}")]
    Source {
        /// Description of the failure.
        reason: String,
    },
}

/// Error type for every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Malformed chart or query input.
    #[error(transparent)]
    Validation(#[from] VedicError),

    /// Prediction window length outside 1..=max days.
    #[error("prediction window must be 1–{max} days, got {days}")]
    InvalidWindow {
        /// Requested window length in days.
        days: i64,
        /// Largest accepted window.
        max: i64,
    },

    /// A day-by-day scan longer than the configured limit.
    #[error("scan span of {days} days exceeds the limit of {max} days")]
    ScanSpanTooLarge {
        /// Requested span in days.
        days: i64,
        /// Largest accepted span.
        max: i64,
    },

    /// Scan range whose start lies after its end.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Range start, RFC 3339.
        start: String,
        /// Range end, RFC 3339.
        end: String,
    },

    /// A weight or threshold that is negative, non-finite or out of range.
    #[error("invalid {field}: {value}")]
    InvalidWeight {
        /// Name of the configuration field.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Structural configuration problem (zero limits and similar).
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// The position provider failed.
    #[error("position provider: {0}")]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_message() {
        let err = SearchError::InvalidWindow { days: 400, max: 365 };
        assert_eq!(
            err.to_string(),
            "prediction window must be 1–365 days, got 400"
        );
    }

    #[test]
    fn validation_is_transparent() {
        let err: SearchError = VedicError::InvalidCuspCount { count: 3 }.into();
        assert_eq!(err.to_string(), "expected 12 house cusps, got 3");
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[test]
    fn provider_wraps() {
        let err: SearchError = ProviderError::UnsupportedMode { mode: "Tropical" }.into();
        assert_eq!(
            err.to_string(),
            "position provider: unsupported zodiac mode: Tropical"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync + 'static>() {}
        assert_impl::<SearchError>();
        assert_impl::<ProviderError>();
    }
}
