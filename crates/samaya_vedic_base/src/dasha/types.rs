//! Core types for Vimshottari dasha calculations.
//!
//! Dashas are hierarchical time periods: each mahadasha splits into 9
//! antardashas, each antardasha into 9 pratyantardashas, always in
//! Vimshottari order starting from the parent's own lord.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::graha::Graha;
use crate::nakshatra::Nakshatra;
use crate::util::DAYS_PER_YEAR;

/// The 3 hierarchical levels computed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
}

impl DashaLevel {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }
}

/// One active period at one level, seen from a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaPeriod {
    /// Hierarchical level.
    pub level: DashaLevel,
    /// Ruling graha.
    pub graha: Graha,
    /// Start instant, inclusive.
    pub start: DateTime<Utc>,
    /// End instant, exclusive.
    pub end: DateTime<Utc>,
    /// Full length of the period in years.
    pub duration_years: f64,
    /// Years left in the period at the query instant.
    pub remaining_years: f64,
    /// Share of the period already elapsed, 0-100.
    pub percentage_complete: f64,
}

impl DashaPeriod {
    /// Full length of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.duration_years * DAYS_PER_YEAR
    }

    /// Days left in the period at the query instant.
    pub fn remaining_days(&self) -> f64 {
        self.remaining_years * DAYS_PER_YEAR
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// The nested dasha position at a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaPosition {
    /// The queried instant.
    pub query_date: DateTime<Utc>,
    /// Moon's nakshatra at birth.
    pub birth_nakshatra: Nakshatra,
    /// Years elapsed since the start of the first cycle.
    pub total_elapsed_years: f64,
    /// 0-based count of completed 120-year cycles.
    pub cycle: u32,
    /// Active mahadasha.
    pub mahadasha: DashaPeriod,
    /// Active antardasha within the mahadasha.
    pub antardasha: DashaPeriod,
    /// Active pratyantardasha within the antardasha.
    pub pratyantardasha: DashaPeriod,
}

impl DashaPosition {
    /// Period at a given level.
    pub fn level(&self, level: DashaLevel) -> &DashaPeriod {
        match level {
            DashaLevel::Mahadasha => &self.mahadasha,
            DashaLevel::Antardasha => &self.antardasha,
            DashaLevel::Pratyantardasha => &self.pratyantardasha,
        }
    }

    /// Lord chain "Mahadasha/Antardasha/Pratyantardasha", e.g. "Venus/Sun/Moon".
    pub fn lord_chain(&self) -> String {
        format!(
            "{}/{}/{}",
            self.mahadasha.graha, self.antardasha.graha, self.pratyantardasha.graha
        )
    }
}

/// One mahadasha in a forward timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaPhase {
    /// Mahadasha lord.
    pub graha: Graha,
    /// Start instant, inclusive. The first phase may start before birth.
    pub start: DateTime<Utc>,
    /// End instant, exclusive.
    pub end: DateTime<Utc>,
    /// Full mahadasha length in years.
    pub duration_years: f64,
    /// 0-based 120-year cycle the phase belongs to.
    pub cycle: u32,
}

/// A sub-period in which a target graha rules, found by monthly scanning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavorablePeriod {
    /// Level at which the target graha was found.
    pub level: DashaLevel,
    /// Start instant of the sub-period.
    pub start: DateTime<Utc>,
    /// End instant of the sub-period.
    pub end: DateTime<Utc>,
    /// Why the period was reported.
    pub reason: String,
}
