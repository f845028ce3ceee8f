//! Tunables for the transit scan and the synthesis.
//!
//! Every field has a default, so an empty TOML document (or `{}`) is a
//! complete configuration. Unknown keys are rejected.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::provider::ZodiacMode;

/// Synthesis and transit-scan configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Weight of the KP stream in the headline confidence.
    #[serde(default = "default_kp_weight")]
    pub kp_weight: f64,

    /// Weight of the Dasha stream in the headline confidence.
    #[serde(default = "default_dasha_weight")]
    pub dasha_weight: f64,

    /// Weight of kp_confidence in a transit event's combined confidence.
    #[serde(default = "default_kp_weight")]
    pub transit_kp_weight: f64,

    /// Weight of dasha_support in a transit event's combined confidence.
    #[serde(default = "default_dasha_weight")]
    pub transit_dasha_weight: f64,

    /// Events further apart than this start a new activation window.
    #[serde(default = "default_merge_gap_days")]
    pub merge_gap_days: i64,

    /// Days with an event at or above this confidence count as favorable.
    #[serde(default = "default_favorable_threshold")]
    pub favorable_threshold: f64,

    /// Minimum combined confidence of events gathered into windows.
    #[serde(default = "default_window_min_confidence")]
    pub window_min_confidence: f64,

    /// Combined confidence from which an event is Major.
    #[serde(default = "default_major_threshold")]
    pub major_threshold: f64,

    /// Combined confidence from which an event is Moderate.
    #[serde(default = "default_moderate_threshold")]
    pub moderate_threshold: f64,

    /// Longest accepted prediction window in days.
    #[serde(default = "default_max_window_days")]
    pub max_window_days: i64,

    /// Longest accepted day-by-day scan, inclusive of both ends.
    #[serde(default = "default_max_scan_days")]
    pub max_scan_days: i64,

    /// How many top significators of each house the transit scan uses.
    #[serde(default = "default_significators_per_house")]
    pub significators_per_house: usize,

    /// Day offset per house number for synthetic KP events.
    #[serde(default = "default_kp_event_spacing_days")]
    pub kp_event_spacing_days: i64,

    /// Fixed strength of a mahadasha event.
    #[serde(default = "default_dasha_event_strength")]
    pub dasha_event_strength: f64,

    /// Score of a stream that produced no events.
    #[serde(default = "default_neutral_score")]
    pub neutral_score: f64,

    /// Zodiac requested from the position provider.
    #[serde(default)]
    pub zodiac: ZodiacMode,

    /// Scan days in parallel with rayon.
    #[serde(default)]
    pub parallel: bool,
}

fn default_kp_weight() -> f64 {
    0.6
}
fn default_dasha_weight() -> f64 {
    0.4
}
fn default_merge_gap_days() -> i64 {
    30
}
fn default_favorable_threshold() -> f64 {
    0.7
}
fn default_window_min_confidence() -> f64 {
    0.5
}
fn default_major_threshold() -> f64 {
    0.85
}
fn default_moderate_threshold() -> f64 {
    0.75
}
fn default_max_window_days() -> i64 {
    365
}
fn default_max_scan_days() -> i64 {
    366
}
fn default_significators_per_house() -> usize {
    3
}
fn default_kp_event_spacing_days() -> i64 {
    3
}
fn default_dasha_event_strength() -> f64 {
    0.75
}
fn default_neutral_score() -> f64 {
    0.5
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            kp_weight: default_kp_weight(),
            dasha_weight: default_dasha_weight(),
            transit_kp_weight: default_kp_weight(),
            transit_dasha_weight: default_dasha_weight(),
            merge_gap_days: default_merge_gap_days(),
            favorable_threshold: default_favorable_threshold(),
            window_min_confidence: default_window_min_confidence(),
            major_threshold: default_major_threshold(),
            moderate_threshold: default_moderate_threshold(),
            max_window_days: default_max_window_days(),
            max_scan_days: default_max_scan_days(),
            significators_per_house: default_significators_per_house(),
            kp_event_spacing_days: default_kp_event_spacing_days(),
            dasha_event_strength: default_dasha_event_strength(),
            neutral_score: default_neutral_score(),
            zodiac: ZodiacMode::default(),
            parallel: false,
        }
    }
}

impl SynthesisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_weights(mut self, kp_weight: f64, dasha_weight: f64) -> Self {
        self.kp_weight = kp_weight;
        self.dasha_weight = dasha_weight;
        self
    }

    pub fn with_max_window_days(mut self, days: i64) -> Self {
        self.max_window_days = days;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), SearchError> {
        for (field, value) in [
            ("kp_weight", self.kp_weight),
            ("dasha_weight", self.dasha_weight),
            ("transit_kp_weight", self.transit_kp_weight),
            ("transit_dasha_weight", self.transit_dasha_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidWeight { field, value });
            }
        }
        if self.kp_weight + self.dasha_weight <= 0.0 {
            return Err(SearchError::InvalidConfig {
                reason: "kp_weight + dasha_weight must be positive".to_string(),
            });
        }
        for (field, value) in [
            ("favorable_threshold", self.favorable_threshold),
            ("window_min_confidence", self.window_min_confidence),
            ("major_threshold", self.major_threshold),
            ("moderate_threshold", self.moderate_threshold),
            ("dasha_event_strength", self.dasha_event_strength),
            ("neutral_score", self.neutral_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SearchError::InvalidWeight { field, value });
            }
        }
        if self.moderate_threshold > self.major_threshold {
            return Err(SearchError::InvalidConfig {
                reason: format!(
                    "moderate_threshold {} exceeds major_threshold {}",
                    self.moderate_threshold, self.major_threshold
                ),
            });
        }
        if self.max_window_days < 1 {
            return Err(SearchError::InvalidConfig {
                reason: format!("max_window_days must be >= 1, got {}", self.max_window_days),
            });
        }
        if self.max_scan_days < 1 {
            return Err(SearchError::InvalidConfig {
                reason: format!("max_scan_days must be >= 1, got {}", self.max_scan_days),
            });
        }
        if self.max_window_days > self.max_scan_days {
            return Err(SearchError::InvalidConfig {
                reason: format!(
                    "max_window_days {} exceeds max_scan_days {}",
                    self.max_window_days, self.max_scan_days
                ),
            });
        }
        if self.significators_per_house == 0 {
            return Err(SearchError::InvalidConfig {
                reason: "significators_per_house must be >= 1".to_string(),
            });
        }
        if self.merge_gap_days < 0 || self.kp_event_spacing_days < 0 {
            return Err(SearchError::InvalidConfig {
                reason: "day gaps must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = SynthesisConfig::new();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.kp_weight, 0.6);
        assert_eq!(cfg.merge_gap_days, 30);
        assert_eq!(cfg.max_window_days, 365);
        assert!(!cfg.parallel);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg: SynthesisConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, SynthesisConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg: SynthesisConfig =
            toml::from_str("kp_weight = 0.5\nparallel = true\nzodiac = \"tropical\"\n").unwrap();
        assert_eq!(cfg.kp_weight, 0.5);
        assert_eq!(cfg.dasha_weight, 0.4);
        assert!(cfg.parallel);
        assert_eq!(cfg.zodiac, ZodiacMode::Tropical);
    }

    #[test]
    fn unknown_key_rejected() {
        let res: Result<SynthesisConfig, _> = toml::from_str("kp_wieght = 0.5\n");
        assert!(res.is_err());
    }

    #[test]
    fn negative_weight_rejected() {
        let cfg = SynthesisConfig::new().with_weights(-0.1, 0.4);
        assert!(matches!(
            cfg.validate(),
            Err(SearchError::InvalidWeight { field: "kp_weight", .. })
        ));
    }

    #[test]
    fn zero_weights_rejected() {
        assert!(SynthesisConfig::new().with_weights(0.0, 0.0).validate().is_err());
    }

    #[test]
    fn threshold_range_checked() {
        let cfg = SynthesisConfig {
            favorable_threshold: 1.5,
            ..SynthesisConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = SynthesisConfig {
            moderate_threshold: 0.9,
            ..SynthesisConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn window_longer_than_scan_rejected() {
        assert!(SynthesisConfig::new().with_max_window_days(366).validate().is_ok());
        let err = SynthesisConfig::new()
            .with_max_window_days(367)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_window_days 367 exceeds max_scan_days 366"
        );
    }

    #[test]
    fn zero_window_limit_rejected() {
        assert!(SynthesisConfig::new().with_max_window_days(0).validate().is_err());
    }
}
