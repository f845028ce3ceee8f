//! Synthesis of the KP, Dasha and transit streams into one timeline.
//!
//! Three independent streams are produced for a prediction window:
//! - KP: one event per house for its leading significator, dated
//!   `house * kp_event_spacing_days` after the window start
//! - Dasha: one event per mahadasha intersecting the window
//! - Transit: one event per activation window
//!
//! Each stream's score is the mean strength of its events, or the neutral
//! score when it is empty. The headline confidence blends only the KP and
//! Dasha scores; the transit score is reported alongside it.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use samaya_vedic_base::{
    ChartRecord, DashaInputs, Graha, HOUSE_COUNT, get_dasha_timeline, get_significators_for_house,
    house_matter, ordinal, years_between,
};

use crate::config::SynthesisConfig;
use crate::error::SearchError;
use crate::provider::{MeanMotionProvider, PositionProvider};
use crate::synthesis_types::{EventKind, SyntheticEvent, SyntheticPredictionResult};
use crate::transit::{TransitAnalyzer, offset_days};
use crate::transit_types::{ActivationWindow, EventType};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Broad themes ruled by each graha, used to label dasha events.
pub const fn graha_themes(graha: Graha) -> &'static str {
    match graha {
        Graha::Surya => "authority, vitality and the father",
        Graha::Chandra => "mind, emotions and the public",
        Graha::Mangal => "energy, property and courage",
        Graha::Buddh => "intellect, commerce and communication",
        Graha::Guru => "wisdom, children and expansion",
        Graha::Shukra => "relationships, comfort and the arts",
        Graha::Shani => "discipline, labour and endurance",
        Graha::Rahu => "ambition, foreign matters and disruption",
        Graha::Ketu => "detachment, research and spirituality",
    }
}

/// Mean of `values`, or `neutral` when there are none.
pub fn mean_or(values: impl IntoIterator<Item = f64>, neutral: f64) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { neutral } else { sum / n as f64 }
}

/// Aggregates the three streams for a chart.
pub struct SynthesisCoordinator<'p> {
    analyzer: TransitAnalyzer<'p>,
}

impl<'p> SynthesisCoordinator<'p> {
    /// Coordinator over `provider`. Fails if `config` does not validate.
    pub fn new(
        provider: &'p dyn PositionProvider,
        config: SynthesisConfig,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            analyzer: TransitAnalyzer::new(provider, config)?,
        })
    }

    pub fn config(&self) -> &SynthesisConfig {
        self.analyzer.config()
    }

    /// Predict over `days` days from `start`.
    ///
    /// `event_type` restricts the transit stream to that category's houses;
    /// the KP and Dasha streams always cover the whole chart.
    #[instrument(skip(self, chart, start), fields(start = %start))]
    pub fn predict(
        &self,
        chart: &ChartRecord,
        start: DateTime<Utc>,
        days: i64,
        event_type: Option<EventType>,
    ) -> Result<SyntheticPredictionResult, SearchError> {
        let clock = Instant::now();
        let config = self.config();
        if !(1..=config.max_window_days).contains(&days) {
            return Err(SearchError::InvalidWindow {
                days,
                max: config.max_window_days,
            });
        }
        chart.validate()?;
        // Transit days are sampled inclusively through `last_day`; dasha
        // phases are intersected with the half-open `[start, end)`.
        let last_day = offset_days(start, days - 1)?;
        let end = offset_days(start, days)?;

        let kp_events = self.kp_stream(chart, start)?;
        let dasha_events = self.dasha_stream(chart, start, end)?;
        let windows = self
            .analyzer
            .get_favorable_windows(chart, start, last_day, event_type)?;
        let transit_events = self.transit_stream(&windows, event_type);

        let kp_score = mean_or(kp_events.iter().map(|e| e.strength_score), config.neutral_score);
        let dasha_score = mean_or(
            dasha_events.iter().map(|e| e.strength_score),
            config.neutral_score,
        );
        let transit_score = mean_or(
            windows.iter().map(|w| w.peak_confidence),
            config.neutral_score,
        );
        let confidence_score =
            (kp_score * config.kp_weight + dasha_score * config.dasha_weight).clamp(0.0, 1.0);

        let mut events: Vec<SyntheticEvent> = kp_events
            .into_iter()
            .chain(dasha_events)
            .chain(transit_events)
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.kind.cmp(&b.kind)));

        debug!(
            events = events.len(),
            kp_score, dasha_score, transit_score, confidence_score, "prediction synthesized"
        );
        Ok(SyntheticPredictionResult {
            events,
            confidence_score,
            kp_contribution: kp_score,
            dasha_contribution: dasha_score,
            transit_contribution: transit_score,
            calculation_time: clock.elapsed(),
        })
    }

    fn kp_stream(
        &self,
        chart: &ChartRecord,
        start: DateTime<Utc>,
    ) -> Result<Vec<SyntheticEvent>, SearchError> {
        let spacing = self.config().kp_event_spacing_days;
        let mut events = Vec::with_capacity(HOUSE_COUNT);
        for house in 1..=HOUSE_COUNT as u8 {
            let sigs =
                get_significators_for_house(house, &chart.planet_positions, &chart.house_cusps)?;
            let Some(top) = sigs.first() else {
                debug!(house, "no significators; house skipped");
                continue;
            };
            let date = offset_days(start, i64::from(house).saturating_mul(spacing))?;
            let matter = house_matter(house).unwrap_or_default();
            events.push(SyntheticEvent {
                kind: EventKind::KpSignificator,
                date,
                window_start: date,
                window_end: offset_days(date, spacing)?,
                primary_planet: top.graha,
                secondary_planet: sigs.get(1).map(|s| s.graha),
                strength_score: top.strength,
                influence_area: matter.to_string(),
                description: format!(
                    "{} leads the {} house significators ({})",
                    top.graha,
                    ordinal(house),
                    top.reason
                ),
                recommendation: kp_recommendation(top.strength).to_string(),
            });
        }
        Ok(events)
    }

    fn dasha_stream(
        &self,
        chart: &ChartRecord,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SyntheticEvent>, SearchError> {
        let inputs = DashaInputs::from_chart(chart)?;
        let years_forward = years_between(inputs.birth_date, end).max(0.0);
        let phases = get_dasha_timeline(inputs.birth_date, inputs.balance_years, years_forward)?;
        let strength = self.config().dasha_event_strength;

        let mut events = Vec::new();
        for phase in phases.iter().filter(|p| p.start < end && p.end > start) {
            let date = phase.start.max(start);
            let sub_lord = inputs
                .position_at(date.max(inputs.birth_date))?
                .antardasha
                .graha;
            events.push(SyntheticEvent {
                kind: EventKind::DashaChange,
                date,
                window_start: phase.start,
                window_end: phase.end,
                primary_planet: phase.graha,
                secondary_planet: Some(sub_lord),
                strength_score: strength,
                influence_area: graha_themes(phase.graha).to_string(),
                description: format!(
                    "{} mahadasha from {} to {}, {} antardasha running",
                    phase.graha,
                    phase.start.format(DATE_FORMAT),
                    phase.end.format(DATE_FORMAT),
                    sub_lord
                ),
                recommendation: format!(
                    "Align long-range plans with {} themes: {}.",
                    phase.graha,
                    graha_themes(phase.graha)
                ),
            });
        }
        Ok(events)
    }

    fn transit_stream(
        &self,
        windows: &[ActivationWindow],
        event_type: Option<EventType>,
    ) -> Vec<SyntheticEvent> {
        let config = self.config();
        windows
            .iter()
            .map(|w| {
                let area = match event_type {
                    Some(t) => t.name().to_string(),
                    None => house_matter(w.peak_house).unwrap_or_default().to_string(),
                };
                SyntheticEvent {
                    kind: EventKind::TransitWindow,
                    date: w.peak_date,
                    window_start: w.start,
                    window_end: w.end,
                    primary_planet: w.peak_significator,
                    secondary_planet: Some(w.peak_transiting_planet),
                    strength_score: w.peak_confidence,
                    influence_area: area,
                    description: format!(
                        "{} activates natal {} ({} house), {} favorable of {} active days",
                        w.peak_transiting_planet,
                        w.peak_significator,
                        ordinal(w.peak_house),
                        w.favorable_days,
                        w.favorable_days + w.unfavorable_days
                    ),
                    recommendation: transit_recommendation(
                        w.peak_confidence,
                        config.major_threshold,
                        config.moderate_threshold,
                    )
                    .to_string(),
                }
            })
            .collect()
    }
}

fn kp_recommendation(strength: f64) -> &'static str {
    if strength >= 0.8 {
        "Strong promise: initiate plans tied to this house."
    } else if strength >= 0.5 {
        "Moderate promise: prepare groundwork and wait for supporting periods."
    } else {
        "Weak promise: avoid major commitments tied to this house."
    }
}

fn transit_recommendation(peak: f64, major: f64, moderate: f64) -> &'static str {
    if peak >= major {
        "Peak activation: act on this area within the window."
    } else if peak >= moderate {
        "Good support: proceed with measured steps."
    } else {
        "Mild activation: limit action to small steps."
    }
}

/// Predict with the default configuration and a mean-motion provider
/// seeded from the chart itself.
pub fn predict_with_mean_motion(
    chart: &ChartRecord,
    start: DateTime<Utc>,
    days: i64,
    event_type: Option<EventType>,
) -> Result<SyntheticPredictionResult, SearchError> {
    let provider = MeanMotionProvider::from_chart(chart)?;
    SynthesisCoordinator::new(&provider, SynthesisConfig::default())?
        .predict(chart, start, days, event_type)
}
