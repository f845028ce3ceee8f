//! Day-by-day transit activation scan and activation-window merging.
//!
//! For each day the scan takes the day's mahadasha lord and the day's
//! transiting planet (the fastest body reported by the provider), then
//! scores the top natal significators of each target house:
//!
//! - kp_confidence = 0.5, +0.2 if the significator is the house's natural
//!   karaka, +0.15 for a benefic transiting planet (else +0.10), capped at 1
//! - dasha_support = 0.5, +0.3 if the mahadasha lord is the significator,
//!   +0.15 for a friendly pair, capped at 1
//! - combined = kp_confidence * w_kp + dasha_support * w_dasha, clamped to [0, 1]

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use tracing::{debug, instrument};

use samaya_vedic_base::{
    ALL_GRAHAS, BeneficNature, ChartRecord, DashaInputs, Graha, Significator, VedicError,
    are_friendly, house_matter, natural_benefic_malefic, natural_karaka, ordinal,
    significators_by_house, validate_house,
};

use crate::config::SynthesisConfig;
use crate::error::SearchError;
use crate::provider::{PositionProvider, fastest_body};
use crate::transit_types::{
    ActivationWindow, EventType, StrengthTier, TransitEvent, houses_for, transit_duration_days,
};

/// Base score of both confidence components.
const BASE_SCORE: f64 = 0.5;
const NATURAL_KARAKA_BONUS: f64 = 0.2;
const BENEFIC_TRANSIT_BONUS: f64 = 0.15;
const MALEFIC_TRANSIT_BONUS: f64 = 0.10;
const DASHA_LORD_BONUS: f64 = 0.3;
const FRIENDLY_PAIR_BONUS: f64 = 0.15;

/// `instant` moved by whole `days`, or `DateOutOfRange` past chrono's limits.
pub(crate) fn offset_days(instant: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, SearchError> {
    Duration::try_days(days)
        .and_then(|d| instant.checked_add_signed(d))
        .ok_or(SearchError::Validation(VedicError::DateOutOfRange(
            "day offset past the representable range",
        )))
}

/// KP confidence of a significator under a transiting planet.
pub fn kp_confidence(house: u8, significator: Graha, transiting: Graha) -> f64 {
    let mut score = BASE_SCORE;
    if natural_karaka(house) == Some(significator) {
        score += NATURAL_KARAKA_BONUS;
    }
    score += match natural_benefic_malefic(transiting) {
        BeneficNature::Benefic => BENEFIC_TRANSIT_BONUS,
        BeneficNature::Malefic => MALEFIC_TRANSIT_BONUS,
    };
    score.min(1.0)
}

/// Dasha support of a significator under the running mahadasha lord.
pub fn dasha_support(dasha_lord: Graha, significator: Graha) -> f64 {
    let mut score = BASE_SCORE;
    if dasha_lord == significator {
        score += DASHA_LORD_BONUS;
    }
    if are_friendly(dasha_lord, significator) {
        score += FRIENDLY_PAIR_BONUS;
    }
    score.min(1.0)
}

/// Scans a chart's significators against daily transits.
pub struct TransitAnalyzer<'p> {
    provider: &'p dyn PositionProvider,
    config: SynthesisConfig,
}

impl<'p> TransitAnalyzer<'p> {
    /// Analyzer over `provider`. Fails if `config` does not validate.
    pub fn new(
        provider: &'p dyn PositionProvider,
        config: SynthesisConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Every activation in `[start, end]` (one sample per day from `start`)
    /// with combined confidence at or above `min_confidence`, sorted by
    /// combined confidence descending.
    ///
    /// `target_houses = None` scans all 12 houses.
    #[instrument(skip(self, chart, target_houses, start, end), fields(start = %start, end = %end))]
    pub fn get_transit_activations(
        &self,
        chart: &ChartRecord,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        target_houses: Option<&[u8]>,
        min_confidence: f64,
    ) -> Result<Vec<TransitEvent>, SearchError> {
        chart.validate()?;
        let days = self.scan_days(start, end)?;
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(SearchError::InvalidWeight {
                field: "min_confidence",
                value: min_confidence,
            });
        }
        let houses = target_houses.unwrap_or(houses_for(None));
        for &h in houses {
            validate_house(h)?;
        }

        let by_house = significators_by_house(
            &chart.planet_positions,
            &chart.house_cusps,
            self.config.significators_per_house,
        )?;
        let targets: Vec<(u8, &[Significator])> = houses
            .iter()
            .map(|&h| (h, by_house[(h - 1) as usize].as_slice()))
            .collect();
        let inputs = DashaInputs::from_chart(chart)?;

        let scan = |offset: i64| -> Result<Vec<TransitEvent>, SearchError> {
            self.scan_day(&inputs, offset_days(start, offset)?, &targets, min_confidence)
        };
        let per_day: Vec<Vec<TransitEvent>> = if self.config.parallel {
            (0..days).into_par_iter().map(scan).collect::<Result<_, _>>()?
        } else {
            (0..days).map(scan).collect::<Result<_, _>>()?
        };

        let mut events: Vec<TransitEvent> = per_day.into_iter().flatten().collect();
        events.sort_by(|a, b| {
            b.combined_confidence
                .total_cmp(&a.combined_confidence)
                .then(a.event_date.cmp(&b.event_date))
                .then(a.house.cmp(&b.house))
                .then(a.natal_significator.index().cmp(&b.natal_significator.index()))
        });
        debug!(days, events = events.len(), "transit scan complete");
        Ok(events)
    }

    /// Activation windows for an event type (`None` = all houses), sorted
    /// by peak confidence descending. Only windows with at least one
    /// favorable day are returned.
    #[instrument(skip(self, chart, start, end), fields(start = %start, end = %end))]
    pub fn get_favorable_windows(
        &self,
        chart: &ChartRecord,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        event_type: Option<EventType>,
    ) -> Result<Vec<ActivationWindow>, SearchError> {
        let events = self.get_transit_activations(
            chart,
            start,
            end,
            Some(houses_for(event_type)),
            self.config.window_min_confidence,
        )?;
        let mut windows = merge_activation_windows(
            &events,
            self.config.merge_gap_days,
            self.config.favorable_threshold,
        );
        windows.sort_by(|a, b| {
            b.peak_confidence
                .total_cmp(&a.peak_confidence)
                .then(a.start.cmp(&b.start))
        });
        debug!(windows = windows.len(), "activation windows merged");
        Ok(windows)
    }

    /// Number of days sampled in `[start, end]`, checked against the limit.
    fn scan_days(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, SearchError> {
        if start > end {
            return Err(SearchError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        let days = (end - start).num_days() + 1;
        if days > self.config.max_scan_days {
            return Err(SearchError::ScanSpanTooLarge {
                days,
                max: self.config.max_scan_days,
            });
        }
        Ok(days)
    }

    fn scan_day(
        &self,
        inputs: &DashaInputs,
        day: DateTime<Utc>,
        targets: &[(u8, &[Significator])],
        min_confidence: f64,
    ) -> Result<Vec<TransitEvent>, SearchError> {
        let dasha_lord = inputs.position_at(day)?.mahadasha.graha;
        let states = self.provider.body_states(day, self.config.zodiac)?;
        let Some(transiting) = fastest_body(&states).map(|s| s.graha) else {
            debug!(%day, "provider returned no bodies");
            return Ok(Vec::new());
        };

        let mut events = Vec::new();
        for &(house, sigs) in targets {
            let matter = house_matter(house).unwrap_or_default();
            for sig in sigs {
                let kp = kp_confidence(house, sig.graha, transiting);
                let support = dasha_support(dasha_lord, sig.graha);
                let combined = (kp * self.config.transit_kp_weight
                    + support * self.config.transit_dasha_weight)
                    .clamp(0.0, 1.0);
                if combined < min_confidence {
                    continue;
                }
                events.push(TransitEvent {
                    event_date: day,
                    transiting_planet: transiting,
                    natal_significator: sig.graha,
                    house,
                    house_matter: matter,
                    dasha_planet: dasha_lord,
                    kp_confidence: kp,
                    dasha_support: support,
                    combined_confidence: combined,
                    duration_days: transit_duration_days(transiting),
                    strength_tier: StrengthTier::from_confidence(
                        combined,
                        self.config.major_threshold,
                        self.config.moderate_threshold,
                    ),
                    interpretation: format!(
                        "{transiting} transit activates natal {} for the {} house ({matter}) during {dasha_lord} mahadasha",
                        sig.graha,
                        ordinal(house),
                    ),
                });
            }
        }
        Ok(events)
    }
}

/// Merge events chronologically into windows.
///
/// An event joins the running window when its day is at most `gap_days`
/// after the window's current end; otherwise a new window starts. Windows
/// without a favorable day (an event with combined confidence at or above
/// `favorable_threshold`) are dropped. Output is in chronological order.
pub fn merge_activation_windows(
    events: &[TransitEvent],
    gap_days: i64,
    favorable_threshold: f64,
) -> Vec<ActivationWindow> {
    let mut ordered: Vec<&TransitEvent> = events.iter().collect();
    ordered.sort_by(|a, b| {
        a.event_date
            .cmp(&b.event_date)
            .then(b.combined_confidence.total_cmp(&a.combined_confidence))
    });

    let gap = Duration::try_days(gap_days);
    let mut windows: Vec<ActivationWindow> = Vec::new();
    let mut current: Option<WindowBuilder> = None;

    for event in ordered {
        match current.as_mut() {
            Some(w) if within_gap(w.end, event.event_date, gap) => {
                w.push(event, favorable_threshold)
            }
            _ => {
                if let Some(done) = current.take() {
                    windows.extend(done.finish());
                }
                current = Some(WindowBuilder::open(event, favorable_threshold));
            }
        }
    }
    if let Some(done) = current {
        windows.extend(done.finish());
    }
    windows
}

/// Whether `date` lies at most `gap` after `end`. A limit beyond chrono's
/// range admits every date.
fn within_gap(end: DateTime<Utc>, date: DateTime<Utc>, gap: Option<Duration>) -> bool {
    match gap.and_then(|g| end.checked_add_signed(g)) {
        Some(limit) => date <= limit,
        None => true,
    }
}

struct WindowBuilder {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    peak: TransitEvent,
    favorable_days: u32,
    unfavorable_days: u32,
    day: DateTime<Utc>,
    day_favorable: bool,
    planets: [bool; 9],
    event_count: usize,
}

impl WindowBuilder {
    fn open(event: &TransitEvent, threshold: f64) -> Self {
        let mut planets = [false; 9];
        planets[event.natal_significator.index() as usize] = true;
        Self {
            start: event.event_date,
            end: event.event_date,
            peak: event.clone(),
            favorable_days: 0,
            unfavorable_days: 0,
            day: event.event_date,
            day_favorable: event.combined_confidence >= threshold,
            planets,
            event_count: 1,
        }
    }

    fn push(&mut self, event: &TransitEvent, threshold: f64) {
        if event.event_date != self.day {
            self.close_day();
            self.day = event.event_date;
            self.day_favorable = false;
        }
        self.day_favorable |= event.combined_confidence >= threshold;
        self.end = self.end.max(event.event_date);
        if event.combined_confidence > self.peak.combined_confidence {
            self.peak = event.clone();
        }
        self.planets[event.natal_significator.index() as usize] = true;
        self.event_count += 1;
    }

    fn close_day(&mut self) {
        if self.day_favorable {
            self.favorable_days += 1;
        } else {
            self.unfavorable_days += 1;
        }
    }

    fn finish(mut self) -> Option<ActivationWindow> {
        self.close_day();
        if self.favorable_days == 0 {
            return None;
        }
        let key_planets = ALL_GRAHAS
            .into_iter()
            .filter(|g| self.planets[g.index() as usize])
            .collect();
        Some(ActivationWindow {
            start: self.start,
            end: self.end,
            peak_date: self.peak.event_date,
            peak_confidence: self.peak.combined_confidence,
            peak_significator: self.peak.natal_significator,
            peak_transiting_planet: self.peak.transiting_planet,
            peak_house: self.peak.house,
            favorable_days: self.favorable_days,
            unfavorable_days: self.unfavorable_days,
            key_planets,
            event_count: self.event_count,
        })
    }
}
