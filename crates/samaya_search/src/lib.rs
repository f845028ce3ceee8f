//! Transit activation search and KP/Dasha/transit synthesis.
//!
//! This crate provides:
//! - The `PositionProvider` seam, a mean-motion provider and an injectable
//!   position cache
//! - The transit analyzer: daily activation scoring of house significators
//!   and merging into activation windows
//! - The synthesis coordinator: one ranked timeline and a weighted
//!   confidence score per prediction window
//!
//! Pure calculations come from `samaya_vedic_base`; this crate only
//! orchestrates them over dates and provider output.

pub mod cache;
pub mod config;
pub mod error;
pub mod provider;
pub mod synthesis;
pub mod synthesis_types;
pub mod transit;
pub mod transit_types;

pub use cache::{CacheStats, CachedProvider, DEFAULT_CACHE_CAPACITY, PositionCache};
pub use config::SynthesisConfig;
pub use error::{ProviderError, SearchError};
pub use provider::{
    BodyState, DEFAULT_AYANAMSHA_DEG, GeoLocation, MeanMotionProvider, PositionProvider,
    SIDEREAL_ROTATION_DEG_PER_DAY, ZodiacMode, fastest_body,
};
pub use synthesis::{SynthesisCoordinator, graha_themes, mean_or, predict_with_mean_motion};
pub use synthesis_types::{EventKind, SyntheticEvent, SyntheticPredictionResult};
pub use transit::{TransitAnalyzer, dasha_support, kp_confidence, merge_activation_windows};
pub use transit_types::{
    ALL_EVENT_TYPES, ALL_HOUSES, ActivationWindow, EventType, StrengthTier, TransitEvent,
    houses_for, transit_duration_days,
};
