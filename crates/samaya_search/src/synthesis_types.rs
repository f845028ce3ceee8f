//! Output types of the synthesis coordinator.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use samaya_vedic_base::Graha;

/// Which stream produced a synthetic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    KpSignificator,
    DashaChange,
    TransitWindow,
}

impl EventKind {
    /// Type tag as serialized.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::KpSignificator => "kp_significator",
            Self::DashaChange => "dasha_change",
            Self::TransitWindow => "transit_window",
        }
    }
}

/// One event of the merged timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticEvent {
    pub kind: EventKind,
    /// Representative date used for ordering.
    pub date: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub primary_planet: Graha,
    pub secondary_planet: Option<Graha>,
    /// Strength in [0, 1].
    pub strength_score: f64,
    /// Area of life the event concerns.
    pub influence_area: String,
    pub description: String,
    pub recommendation: String,
}

/// Result of one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticPredictionResult {
    /// All events, ascending by date.
    pub events: Vec<SyntheticEvent>,
    /// Headline confidence: weighted KP and Dasha scores, in [0, 1].
    pub confidence_score: f64,
    pub kp_contribution: f64,
    pub dasha_contribution: f64,
    /// Mean peak confidence of the activation windows. Reported only; it
    /// does not enter `confidence_score`.
    pub transit_contribution: f64,
    /// Wall time spent computing the result.
    pub calculation_time: Duration,
}

impl SyntheticPredictionResult {
    /// Events of one kind, in date order.
    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &SyntheticEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}
