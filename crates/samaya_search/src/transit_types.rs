//! Types for transit activations and activation windows.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use samaya_vedic_base::Graha;

/// Life-event categories and the houses that govern them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Marriage,
    Career,
    Health,
    Finance,
    Education,
    Children,
    Property,
    Travel,
    Spirituality,
}

pub const ALL_EVENT_TYPES: [EventType; 9] = [
    EventType::Marriage,
    EventType::Career,
    EventType::Health,
    EventType::Finance,
    EventType::Education,
    EventType::Children,
    EventType::Property,
    EventType::Travel,
    EventType::Spirituality,
];

/// Every house, for scans that are not restricted to an event type.
pub const ALL_HOUSES: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

impl EventType {
    /// Houses scanned for this event type.
    pub const fn houses(self) -> &'static [u8] {
        match self {
            Self::Marriage => &[7],
            Self::Career => &[10, 2, 6],
            Self::Health => &[6, 8, 12],
            Self::Finance => &[2, 11],
            Self::Education => &[4, 5, 9],
            Self::Children => &[5],
            Self::Property => &[4],
            Self::Travel => &[3, 9, 12],
            Self::Spirituality => &[9, 12],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Marriage => "marriage",
            Self::Career => "career",
            Self::Health => "health",
            Self::Finance => "finance",
            Self::Education => "education",
            Self::Children => "children",
            Self::Property => "property",
            Self::Travel => "travel",
            Self::Spirituality => "spirituality",
        }
    }
}

/// Houses for an optional event type; `None` means all 12.
pub fn houses_for(event_type: Option<EventType>) -> &'static [u8] {
    match event_type {
        Some(t) => t.houses(),
        None => &ALL_HOUSES,
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_EVENT_TYPES
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown event type: {s}"))
    }
}

/// Strength bucket of a transit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StrengthTier {
    Minor,
    Moderate,
    Major,
}

impl StrengthTier {
    /// Bucket a combined confidence: `>= major` Major, `>= moderate` Moderate.
    pub fn from_confidence(confidence: f64, major: f64, moderate: f64) -> Self {
        if confidence >= major {
            Self::Major
        } else if confidence >= moderate {
            Self::Moderate
        } else {
            Self::Minor
        }
    }
}

/// Expected length of a transit's influence, per transiting graha.
pub const fn transit_duration_days(graha: Graha) -> f64 {
    match graha {
        Graha::Surya => 5.0,
        Graha::Chandra => 1.0,
        Graha::Mangal => 45.0,
        Graha::Buddh => 7.0,
        Graha::Guru => 13.0,
        Graha::Shukra => 10.0,
        Graha::Shani => 2.0,
        Graha::Rahu | Graha::Ketu => 18.0,
    }
}

/// One day's activation of a natal significator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitEvent {
    /// Day of the activation.
    pub event_date: DateTime<Utc>,
    /// The day's transiting planet.
    pub transiting_planet: Graha,
    /// Natal significator being activated.
    pub natal_significator: Graha,
    /// House the significator represents.
    pub house: u8,
    /// What that house signifies.
    pub house_matter: &'static str,
    /// Mahadasha lord on the day.
    pub dasha_planet: Graha,
    pub kp_confidence: f64,
    pub dasha_support: f64,
    /// Weighted blend of the two, clamped to [0, 1].
    pub combined_confidence: f64,
    pub duration_days: f64,
    pub strength_tier: StrengthTier,
    pub interpretation: String,
}

/// A merged run of transit events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationWindow {
    /// First event day.
    pub start: DateTime<Utc>,
    /// Last event day.
    pub end: DateTime<Utc>,
    /// Day of the strongest event.
    pub peak_date: DateTime<Utc>,
    pub peak_confidence: f64,
    /// Significator of the strongest event.
    pub peak_significator: Graha,
    /// Transiting planet of the strongest event.
    pub peak_transiting_planet: Graha,
    /// House of the strongest event.
    pub peak_house: u8,
    /// Distinct days with at least one favorable event.
    pub favorable_days: u32,
    /// Distinct event days without a favorable event.
    pub unfavorable_days: u32,
    /// Significators seen in the window, canonical order.
    pub key_planets: Vec<Graha>,
    /// Number of merged events.
    pub event_count: usize,
}

impl ActivationWindow {
    /// Whole days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn houses_per_type() {
        assert_eq!(EventType::Marriage.houses(), &[7]);
        assert_eq!(EventType::Career.houses(), &[10, 2, 6]);
        assert_eq!(EventType::Health.houses(), &[6, 8, 12]);
        assert_eq!(houses_for(None).len(), 12);
    }

    #[test]
    fn parse_event_type() {
        assert_eq!("Marriage".parse::<EventType>(), Ok(EventType::Marriage));
        assert_eq!(" career ".parse::<EventType>(), Ok(EventType::Career));
        assert!("lottery".parse::<EventType>().is_err());
    }

    #[test]
    fn tiers() {
        assert_eq!(StrengthTier::from_confidence(0.9, 0.85, 0.75), StrengthTier::Major);
        assert_eq!(StrengthTier::from_confidence(0.85, 0.85, 0.75), StrengthTier::Major);
        assert_eq!(StrengthTier::from_confidence(0.8, 0.85, 0.75), StrengthTier::Moderate);
        assert_eq!(StrengthTier::from_confidence(0.6, 0.85, 0.75), StrengthTier::Minor);
    }

    #[test]
    fn duration_table() {
        assert_eq!(transit_duration_days(Graha::Shani), 2.0);
        assert_eq!(transit_duration_days(Graha::Guru), 13.0);
        assert_eq!(transit_duration_days(Graha::Mangal), 45.0);
    }
}
