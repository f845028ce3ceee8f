//! Vimshottari dasha (planetary period) calculations.
//!
//! Three hierarchical levels are supported (Mahadasha, Antardasha,
//! Pratyantardasha). All levels share the proportional partition in
//! `subperiod`, parameterised by span and unit.

pub mod balance;
pub mod subperiod;
pub mod types;
pub mod vimshottari;

pub use balance::{VimshottariBalance, cycle_start_of, vimshottari_balance_from_moon};
pub use subperiod::{
    Portion, SpanUnit, cyclic_sequence, locate_portion, proportional_partition,
    snap_last_portion_end,
};
pub use types::{DashaLevel, DashaPeriod, DashaPhase, DashaPosition, FavorablePeriod};
pub use vimshottari::{
    DashaInputs, FAVORABLE_SCAN_STEP_DAYS, calculate_dasha_position, dedup_favorable_periods,
    get_dasha_timeline, get_favorable_periods,
};
