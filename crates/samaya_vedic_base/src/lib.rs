//! Pure-math Vedic building blocks for the samaya timing engine.
//!
//! This crate provides:
//! - Graha, rashi and nakshatra tables with pada lookup
//! - KP sub-lords and ranked house significators
//! - Vimshottari dasha positions, timelines and favorable-period scans
//! - The natal chart record and its validation
//!
//! Everything here is deterministic and free of I/O. Positions are
//! supplied by the caller.

pub mod bhava;
pub mod chart;
pub mod dasha;
pub mod drishti;
pub mod error;
pub mod graha;
pub mod kp;
pub mod nakshatra;
pub mod rashi;
pub mod relationships;
pub mod util;

pub use bhava::{HOUSE_COUNT, house_matter, house_of, natural_karaka, ordinal, validate_house};
pub use chart::{ChartRecord, PlanetPosition, validate_balance};
pub use dasha::{
    DashaInputs, DashaLevel, DashaPeriod, DashaPhase, DashaPosition, FavorablePeriod,
    VimshottariBalance, calculate_dasha_position, dedup_favorable_periods, get_dasha_timeline,
    get_favorable_periods, vimshottari_balance_from_moon,
};
pub use drishti::{aspected_offsets, aspects_point};
pub use error::VedicError;
pub use graha::{
    ALL_GRAHAS, BeneficNature, Graha, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS,
    natural_benefic_malefic, rashi_lord, rashi_lord_by_index,
};
pub use kp::{
    Significator, SubLordPosition, get_significators_for_house, get_sub_lord,
    significators_by_house, sub_lord_arcs, sub_lord_table,
};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_BOUNDARY_EPSILON, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo,
    PADA_SPAN, nakshatra_from_longitude, nakshatra_index,
};
pub use rashi::{ALL_RASHIS, Rashi, count_signs_forward, rashi_from_longitude, rashi_index};
pub use relationships::{FRIENDLY_PAIRS, are_friendly, friends_of};
pub use util::{DAYS_PER_YEAR, add_days, add_years, days_between, normalize_360, years_between};
