//! Subcommand handlers. Each one loads its inputs, calls the engine and
//! prints the result as pretty JSON on stdout.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use samaya_search::{
    EventType, MeanMotionProvider, SynthesisConfig, SynthesisCoordinator, TransitAnalyzer,
};
use samaya_vedic_base::{
    ChartRecord, DashaInputs, Graha, dedup_favorable_periods, get_favorable_periods,
    get_significators_for_house, get_sub_lord,
};

use crate::cli::RangeArgs;

pub fn sublord(lon: f64) -> Result<()> {
    print_json(&get_sub_lord(lon)?)
}

pub fn significators(chart: &Path, house: u8) -> Result<()> {
    let chart = load_chart(chart)?;
    let sigs = get_significators_for_house(house, &chart.planet_positions, &chart.house_cusps)?;
    print_json(&sigs)
}

pub fn dasha(chart: &Path, at: Option<&str>) -> Result<()> {
    let chart = load_chart(chart)?;
    let at = match at {
        Some(s) => parse_date(s)?,
        None => Utc::now(),
    };
    let position = DashaInputs::from_chart(&chart)?.position_at(at)?;
    print_json(&position)
}

pub fn timeline(chart: &Path, years: f64) -> Result<()> {
    let chart = load_chart(chart)?;
    let phases = DashaInputs::from_chart(&chart)?.timeline(years)?;
    print_json(&phases)
}

pub fn favorable(chart: &Path, graha: Graha, from: &str, to: &str) -> Result<()> {
    let chart = load_chart(chart)?;
    let inputs = DashaInputs::from_chart(&chart)?;
    let periods = get_favorable_periods(&inputs, graha, parse_date(from)?, parse_date(to)?)?;
    print_json(&dedup_favorable_periods(periods))
}

pub fn transits(chart: &Path, range: &RangeArgs, houses: &[u8], min_confidence: f64) -> Result<()> {
    let chart = load_chart(chart)?;
    let config = load_config(range)?;
    let provider = MeanMotionProvider::from_chart(&chart)?;
    let analyzer = TransitAnalyzer::new(&provider, config)?;
    let (start, end) = scan_range(range)?;
    let houses = (!houses.is_empty()).then_some(houses);
    let events = analyzer.get_transit_activations(&chart, start, end, houses, min_confidence)?;
    info!(count = events.len(), "transit activations");
    print_json(&events)
}

pub fn windows(chart: &Path, range: &RangeArgs, event: Option<EventType>) -> Result<()> {
    let chart = load_chart(chart)?;
    let config = load_config(range)?;
    let provider = MeanMotionProvider::from_chart(&chart)?;
    let analyzer = TransitAnalyzer::new(&provider, config)?;
    let (start, end) = scan_range(range)?;
    let windows = analyzer.get_favorable_windows(&chart, start, end, event)?;
    info!(count = windows.len(), "activation windows");
    print_json(&windows)
}

pub fn predict(chart: &Path, range: &RangeArgs, event: Option<EventType>) -> Result<()> {
    let chart = load_chart(chart)?;
    let config = load_config(range)?;
    let provider = MeanMotionProvider::from_chart(&chart)?;
    let coordinator = SynthesisCoordinator::new(&provider, config)?;
    let start = start_date(range)?;
    let result = coordinator.predict(&chart, start, range.days, event)?;
    info!(
        events = result.events.len(),
        confidence = result.confidence_score,
        elapsed_ms = result.calculation_time.as_millis() as u64,
        "prediction complete"
    );
    print_json(&result)
}

pub fn chart_template() -> Result<()> {
    print_json(&ChartRecord::default())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn load_chart(path: &Path) -> Result<ChartRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chart file: {}", path.display()))?;
    let chart: ChartRecord = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse chart JSON: {}", path.display()))?;
    chart.validate()?;
    Ok(chart)
}

fn load_config(range: &RangeArgs) -> Result<SynthesisConfig> {
    let config = match &range.config {
        Some(path) => {
            let toml_str = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            let config: SynthesisConfig =
                toml::from_str(&toml_str).context("failed to parse TOML config")?;
            config.validate()?;
            config
        }
        None => SynthesisConfig::default(),
    };
    Ok(if range.parallel {
        config.with_parallel(true)
    } else {
        config
    })
}

fn start_date(range: &RangeArgs) -> Result<DateTime<Utc>> {
    match range.from.as_deref() {
        Some(s) => parse_date(s),
        None => Ok(midnight(Utc::now().date_naive())),
    }
}

fn scan_range(range: &RangeArgs) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if range.days < 1 {
        bail!("--days must be at least 1, got {}", range.days);
    }
    let start = start_date(range)?;
    let end = Duration::try_days(range.days - 1)
        .and_then(|d| start.checked_add_signed(d))
        .with_context(|| format!("--days {} runs past the supported date range", range.days))?;
    Ok((start, end))
}

/// Parses `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(midnight(date));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
