//! Vimshottari dasha engine: nested position, forward timeline and
//! target-graha period scan.
//!
//! Positions are tracked as "cycle years": years elapsed since the start of
//! a Ketu mahadasha, with the birth instant sitting at the chart's dasha
//! offset. Every level uses the same proportional partition:
//! - mahadasha: the 120-year cycle, starting from Ketu (years)
//! - antardasha: the mahadasha, starting from its lord (years)
//! - pratyantardasha: the antardasha, starting from its lord (days)

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::chart::{ChartRecord, validate_balance};
use crate::error::VedicError;
use crate::graha::{Graha, VIMSHOTTARI_TOTAL_YEARS};
use crate::nakshatra::nakshatra_from_longitude;
use crate::util::{DAYS_PER_YEAR, add_years, ensure_finite, years_between};

use super::subperiod::{Portion, SpanUnit, locate_portion, proportional_partition};
use super::types::{DashaLevel, DashaPeriod, DashaPhase, DashaPosition, FavorablePeriod};

/// Step used by `get_favorable_periods`.
pub const FAVORABLE_SCAN_STEP_DAYS: i64 = 30;

/// The three inputs every Vimshottari calculation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaInputs {
    /// Birth instant.
    pub birth_date: DateTime<Utc>,
    /// Moon's sidereal longitude at birth.
    pub moon_longitude: f64,
    /// Cycle years already elapsed at birth.
    pub balance_years: f64,
}

impl DashaInputs {
    /// Validated inputs.
    pub fn new(
        birth_date: DateTime<Utc>,
        moon_longitude: f64,
        balance_years: f64,
    ) -> Result<Self, VedicError> {
        ensure_finite("moon", moon_longitude)?;
        validate_balance(balance_years)?;
        Ok(Self {
            birth_date,
            moon_longitude,
            balance_years,
        })
    }

    /// Inputs taken from a chart record (balance derived from the Moon if absent).
    pub fn from_chart(chart: &ChartRecord) -> Result<Self, VedicError> {
        Self::new(
            chart.birth_date,
            chart.moon_longitude,
            chart.cycle_elapsed_years()?,
        )
    }

    /// Nested position at `query_date`.
    pub fn position_at(&self, query_date: DateTime<Utc>) -> Result<DashaPosition, VedicError> {
        calculate_dasha_position(
            self.birth_date,
            self.moon_longitude,
            self.balance_years,
            query_date,
        )
    }

    /// Mahadasha phases from birth through `years_forward` years after birth.
    pub fn timeline(&self, years_forward: f64) -> Result<Vec<DashaPhase>, VedicError> {
        get_dasha_timeline(self.birth_date, self.balance_years, years_forward)
    }

    /// Convert a cycle-year coordinate to an instant.
    fn instant_at(&self, cycle_years: f64) -> Result<DateTime<Utc>, VedicError> {
        add_years(self.birth_date, cycle_years - self.balance_years)
    }

    /// Build a period from its cycle-year bounds.
    fn period(
        &self,
        level: DashaLevel,
        graha: Graha,
        (start_years, end_years): (f64, f64),
        total_elapsed: f64,
    ) -> Result<DashaPeriod, VedicError> {
        let duration_years = end_years - start_years;
        let percentage_complete = if duration_years > 0.0 {
            ((total_elapsed - start_years) / duration_years * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };
        Ok(DashaPeriod {
            level,
            graha,
            start: self.instant_at(start_years)?,
            end: self.instant_at(end_years)?,
            duration_years,
            remaining_years: (end_years - total_elapsed).max(0.0),
            percentage_complete,
        })
    }
}

/// Cycle-year bounds of `portions[idx]` inside a parent starting at
/// `parent_start`. Offsets are divided by `per_year` (1 for years, 365.25
/// for days). The last child ends exactly where its parent ends.
fn child_bounds(
    portions: &[Portion; 9],
    idx: usize,
    parent_start: f64,
    parent_end: f64,
    per_year: f64,
) -> (f64, f64) {
    let p = portions[idx];
    let start = parent_start + p.start / per_year;
    let end = if idx + 1 == portions.len() {
        parent_end
    } else {
        (parent_start + p.end / per_year).min(parent_end)
    };
    (start, end)
}

/// Compute the Mahadasha → Antardasha → Pratyantardasha position at `query_date`.
///
/// `dasha_balance_years` is the number of cycle years already elapsed at
/// birth (0 = birth at the very start of a Ketu mahadasha).
pub fn calculate_dasha_position(
    birth_date: DateTime<Utc>,
    moon_longitude: f64,
    dasha_balance_years: f64,
    query_date: DateTime<Utc>,
) -> Result<DashaPosition, VedicError> {
    let inputs = DashaInputs::new(birth_date, moon_longitude, dasha_balance_years)?;
    if query_date < birth_date {
        return Err(VedicError::QueryBeforeBirth {
            query: query_date.to_rfc3339(),
            birth: birth_date.to_rfc3339(),
        });
    }

    let total_elapsed = dasha_balance_years + years_between(birth_date, query_date);
    let cycle = (total_elapsed / VIMSHOTTARI_TOTAL_YEARS).floor();
    let cycle_base = cycle * VIMSHOTTARI_TOTAL_YEARS;
    let years_in_cycle = total_elapsed - cycle_base;

    // Level 0: whole-year weights across the 120-year cycle.
    let maha = proportional_partition(Graha::Ketu, VIMSHOTTARI_TOTAL_YEARS, SpanUnit::Years);
    let md_idx = locate_portion(&maha, years_in_cycle);
    let md = maha[md_idx];
    let md_bounds = child_bounds(
        &maha,
        md_idx,
        cycle_base,
        cycle_base + VIMSHOTTARI_TOTAL_YEARS,
        1.0,
    );
    let md_years = md.length();

    // Level 1: the mahadasha split proportionally, starting from its lord.
    let years_in_md = (years_in_cycle - md.start).clamp(0.0, md_years);
    let antar = proportional_partition(md.graha, md_years, SpanUnit::Years);
    let ad_idx = locate_portion(&antar, years_in_md);
    let ad = antar[ad_idx];
    let ad_bounds = child_bounds(&antar, ad_idx, md_bounds.0, md_bounds.1, 1.0);

    // Level 2: the antardasha split in days.
    let days_in_ad = (years_in_md - ad.start) * DAYS_PER_YEAR;
    let pratyantar =
        proportional_partition(ad.graha, ad.length() * DAYS_PER_YEAR, SpanUnit::Days);
    let pd_idx = locate_portion(&pratyantar, days_in_ad);
    let pd = pratyantar[pd_idx];
    let pd_bounds = child_bounds(&pratyantar, pd_idx, ad_bounds.0, ad_bounds.1, DAYS_PER_YEAR);

    trace!(
        md = %md.graha,
        ad = %ad.graha,
        pd = %pd.graha,
        total_elapsed,
        "dasha position"
    );

    Ok(DashaPosition {
        query_date,
        birth_nakshatra: nakshatra_from_longitude(moon_longitude).nakshatra,
        total_elapsed_years: total_elapsed,
        cycle: cycle as u32,
        mahadasha: inputs.period(DashaLevel::Mahadasha, md.graha, md_bounds, total_elapsed)?,
        antardasha: inputs.period(DashaLevel::Antardasha, ad.graha, ad_bounds, total_elapsed)?,
        pratyantardasha: inputs.period(
            DashaLevel::Pratyantardasha,
            pd.graha,
            pd_bounds,
            total_elapsed,
        )?,
    })
}

/// Contiguous mahadasha phases from the one running at birth until
/// `years_forward` years after birth are covered.
///
/// Recomputed on every call; the first phase may begin before birth.
pub fn get_dasha_timeline(
    birth_date: DateTime<Utc>,
    dasha_balance_years: f64,
    years_forward: f64,
) -> Result<Vec<DashaPhase>, VedicError> {
    validate_balance(dasha_balance_years)?;
    if !years_forward.is_finite() || years_forward < 0.0 {
        return Err(VedicError::InvalidSpan {
            years: years_forward,
        });
    }

    let maha = proportional_partition(Graha::Ketu, VIMSHOTTARI_TOTAL_YEARS, SpanUnit::Years);
    let horizon = dasha_balance_years + years_forward;
    let mut idx = locate_portion(&maha, dasha_balance_years);
    let mut cycle = 0u32;
    let mut phases = Vec::new();

    loop {
        let portion = maha[idx];
        let base = cycle as f64 * VIMSHOTTARI_TOTAL_YEARS;
        let start_years = base + portion.start;
        if !phases.is_empty() && start_years >= horizon {
            break;
        }
        let end_years = base + portion.end;
        phases.push(DashaPhase {
            graha: portion.graha,
            start: add_years(birth_date, start_years - dasha_balance_years)?,
            end: add_years(birth_date, end_years - dasha_balance_years)?,
            duration_years: portion.length(),
            cycle,
        });
        idx += 1;
        if idx == maha.len() {
            idx = 0;
            cycle += 1;
        }
    }

    debug!(phases = phases.len(), years_forward, "dasha timeline");
    Ok(phases)
}

/// Scan `[start, end]` in fixed 30-day steps and report every antardasha or
/// pratyantardasha ruled by `target`.
///
/// Monthly stepping samples the same sub-period several times and can skip
/// pratyantardashas shorter than a month, so the output contains duplicates
/// and is not exhaustive. Use `dedup_favorable_periods` to collapse repeats.
pub fn get_favorable_periods(
    inputs: &DashaInputs,
    target: Graha,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<FavorablePeriod>, VedicError> {
    if start > end {
        return Err(VedicError::InvalidDateRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }

    let step = Duration::days(FAVORABLE_SCAN_STEP_DAYS);
    let mut periods = Vec::new();
    let mut cursor = start.max(inputs.birth_date);

    while cursor <= end {
        let pos = inputs.position_at(cursor)?;
        if pos.antardasha.graha == target {
            periods.push(FavorablePeriod {
                level: DashaLevel::Antardasha,
                start: pos.antardasha.start,
                end: pos.antardasha.end,
                reason: format!(
                    "{target} Antardasha within {} Mahadasha",
                    pos.mahadasha.graha
                ),
            });
        }
        if pos.pratyantardasha.graha == target {
            periods.push(FavorablePeriod {
                level: DashaLevel::Pratyantardasha,
                start: pos.pratyantardasha.start,
                end: pos.pratyantardasha.end,
                reason: format!(
                    "{target} Pratyantardasha within {}/{}",
                    pos.mahadasha.graha, pos.antardasha.graha
                ),
            });
        }
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(periods)
}

/// Drop repeated `(level, start, end)` entries, keeping first occurrences.
pub fn dedup_favorable_periods(periods: Vec<FavorablePeriod>) -> Vec<FavorablePeriod> {
    let mut out: Vec<FavorablePeriod> = Vec::with_capacity(periods.len());
    for p in periods {
        let seen = out
            .iter()
            .any(|q| q.level == p.level && q.start == p.start && q.end == p.end);
        if !seen {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 1, 15, 6, 30, 0).unwrap()
    }

    #[test]
    fn at_birth_with_zero_balance_everything_is_ketu() {
        let pos = calculate_dasha_position(birth(), 0.0, 0.0, birth()).unwrap();
        assert_eq!(pos.mahadasha.graha, Graha::Ketu);
        assert_eq!(pos.antardasha.graha, Graha::Ketu);
        assert_eq!(pos.pratyantardasha.graha, Graha::Ketu);
        assert_eq!(pos.mahadasha.start, birth());
        assert!((pos.mahadasha.duration_years - 7.0).abs() < 1e-12);
    }

    #[test]
    fn balance_twelve_is_inside_venus() {
        let pos = calculate_dasha_position(birth(), 0.0, 12.0, birth()).unwrap();
        assert_eq!(pos.mahadasha.graha, Graha::Shukra);
        // 5 years into Venus: Venus AD 3y4m, Sun AD 1y, then Moon AD
        assert_eq!(pos.antardasha.graha, Graha::Chandra);
        assert!((pos.mahadasha.percentage_complete - 25.0).abs() < 1e-6);
    }

    #[test]
    fn antardasha_and_pratyantardasha_nest() {
        let query = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let pos = calculate_dasha_position(birth(), 100.0, 33.3, query).unwrap();
        assert!(pos.mahadasha.contains(query));
        assert!(pos.antardasha.contains(query));
        assert!(pos.pratyantardasha.contains(query));
        assert!(pos.mahadasha.start <= pos.antardasha.start);
        assert!(pos.antardasha.end <= pos.mahadasha.end);
        assert!(pos.antardasha.start <= pos.pratyantardasha.start);
        assert!(pos.pratyantardasha.end <= pos.antardasha.end);
    }

    #[test]
    fn cycle_wraps_after_120_years() {
        let query = add_years(birth(), 125.0).unwrap();
        let pos = calculate_dasha_position(birth(), 0.0, 0.0, query).unwrap();
        assert_eq!(pos.cycle, 1);
        assert_eq!(pos.mahadasha.graha, Graha::Ketu);
    }

    #[test]
    fn query_before_birth_rejected() {
        let before = birth() - Duration::days(1);
        assert!(matches!(
            calculate_dasha_position(birth(), 0.0, 5.0, before),
            Err(VedicError::QueryBeforeBirth { .. })
        ));
    }

    #[test]
    fn invalid_balance_rejected() {
        assert!(calculate_dasha_position(birth(), 0.0, 120.0, birth()).is_err());
        assert!(calculate_dasha_position(birth(), f64::NAN, 1.0, birth()).is_err());
    }

    #[test]
    fn timeline_is_contiguous_and_cyclic() {
        let phases = get_dasha_timeline(birth(), 50.0, 150.0).unwrap();
        assert_eq!(phases[0].graha, Graha::Rahu);
        for w in phases.windows(2) {
            assert_eq!(w[0].end, w[1].start);
            assert_eq!(w[1].graha, w[0].graha.vimshottari_next());
        }
        let last = phases.last().unwrap();
        assert!(last.end >= add_years(birth(), 150.0).unwrap());
    }

    #[test]
    fn timeline_zero_span_has_birth_phase() {
        let phases = get_dasha_timeline(birth(), 12.0, 0.0).unwrap();
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].graha, Graha::Shukra);
        assert!(phases[0].start < birth());
    }

    #[test]
    fn timeline_rejects_negative_span() {
        assert!(get_dasha_timeline(birth(), 0.0, -1.0).is_err());
    }

    #[test]
    fn favorable_periods_find_target_and_dedup() {
        let inputs = DashaInputs::new(birth(), 0.0, 7.0).unwrap();
        let end = add_years(birth(), 4.0).unwrap();
        let raw = get_favorable_periods(&inputs, Graha::Shukra, birth(), end).unwrap();
        assert!(!raw.is_empty());
        assert!(raw.iter().any(|p| p.level == DashaLevel::Antardasha));
        let unique = dedup_favorable_periods(raw.clone());
        assert!(unique.len() < raw.len());
        let venus_ad: Vec<_> = unique
            .iter()
            .filter(|p| p.level == DashaLevel::Antardasha)
            .collect();
        assert_eq!(venus_ad.len(), 1);
        assert_eq!(venus_ad[0].start, birth());
    }

    #[test]
    fn favorable_periods_reject_inverted_range() {
        let inputs = DashaInputs::new(birth(), 0.0, 7.0).unwrap();
        let end = birth() - Duration::days(10);
        assert!(get_favorable_periods(&inputs, Graha::Shukra, birth(), end).is_err());
    }
}
