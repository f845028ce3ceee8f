//! Integration tests for the transit analyzer against the mean-motion provider.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use samaya_search::{
    CachedProvider, EventType, MeanMotionProvider, PositionCache, SearchError, StrengthTier,
    SynthesisConfig, TransitAnalyzer,
};
use samaya_vedic_base::ChartRecord;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn provider(chart: &ChartRecord) -> MeanMotionProvider {
    MeanMotionProvider::from_chart(chart).unwrap()
}

#[test]
fn activations_sorted_and_clamped() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    let events = analyzer
        .get_transit_activations(&chart, start(), start() + Duration::days(20), None, 0.0)
        .unwrap();
    assert!(!events.is_empty());
    for w in events.windows(2) {
        assert!(w[0].combined_confidence >= w[1].combined_confidence);
    }
    for e in &events {
        assert!((0.0..=1.0).contains(&e.combined_confidence));
        assert!((0.0..=1.0).contains(&e.kp_confidence));
        assert!((0.0..=1.0).contains(&e.dasha_support));
        let tier = StrengthTier::from_confidence(e.combined_confidence, 0.85, 0.75);
        assert_eq!(e.strength_tier, tier);
    }
}

#[test]
fn combined_confidence_capped_under_heavy_weights() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let config = SynthesisConfig {
        transit_kp_weight: 3.0,
        transit_dasha_weight: 3.0,
        ..SynthesisConfig::default()
    };
    let analyzer = TransitAnalyzer::new(&p, config).unwrap();
    let events = analyzer
        .get_transit_activations(&chart, start(), start() + Duration::days(10), None, 0.0)
        .unwrap();
    assert!(!events.is_empty());
    let mut max = 0.0_f64;
    for e in &events {
        assert!(e.combined_confidence <= 1.0, "combined {}", e.combined_confidence);
        assert!(e.kp_confidence <= 1.0 && e.dasha_support <= 1.0);
        assert_eq!(e.strength_tier, StrengthTier::Major);
        max = max.max(e.combined_confidence);
    }
    assert_eq!(max, 1.0);
}

#[test]
fn at_most_three_significators_per_house_per_day() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    let events = analyzer
        .get_transit_activations(&chart, start(), start(), Some(&[1, 7]), 0.0)
        .unwrap();
    for house in [1u8, 7] {
        let n = events.iter().filter(|e| e.house == house).count();
        assert!(n <= 3, "house {house} has {n} events");
    }
    assert!(events.iter().all(|e| e.house == 1 || e.house == 7));
}

#[test]
fn min_confidence_filters() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    let end = start() + Duration::days(10);
    let all = analyzer
        .get_transit_activations(&chart, start(), end, None, 0.0)
        .unwrap();
    let strong = analyzer
        .get_transit_activations(&chart, start(), end, None, 0.7)
        .unwrap();
    assert!(strong.len() <= all.len());
    assert!(strong.iter().all(|e| e.combined_confidence >= 0.7));
}

#[test]
fn parallel_scan_matches_sequential() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let end = start() + Duration::days(45);
    let seq = TransitAnalyzer::new(&p, SynthesisConfig::default())
        .unwrap()
        .get_transit_activations(&chart, start(), end, None, 0.5)
        .unwrap();
    let par = TransitAnalyzer::new(&p, SynthesisConfig::default().with_parallel(true))
        .unwrap()
        .get_transit_activations(&chart, start(), end, None, 0.5)
        .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn windows_never_overlap_and_have_favorable_days() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    for event_type in [None, Some(EventType::Marriage), Some(EventType::Career)] {
        let mut windows = analyzer
            .get_favorable_windows(&chart, start(), start() + Duration::days(180), event_type)
            .unwrap();
        for w in windows.windows(2) {
            assert!(w[0].peak_confidence >= w[1].peak_confidence);
        }
        for w in &windows {
            assert!(w.favorable_days >= 1);
            assert!(w.start <= w.peak_date && w.peak_date <= w.end);
        }
        windows.sort_by_key(|w| w.start);
        for pair in windows.windows(2) {
            assert!(pair[0].end < pair[1].start, "{event_type:?} windows overlap");
        }
    }
}

#[test]
fn all_house_scan_finds_a_window() {
    // The 9th house karaka (Jupiter) is among its top significators, so
    // every day has a favorable event under a benefic Moon transit.
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    let windows = analyzer
        .get_favorable_windows(&chart, start(), start() + Duration::days(30), None)
        .unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].favorable_days, 31);
}

#[test]
fn range_and_span_validated() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    let err = analyzer
        .get_transit_activations(&chart, start(), start() - Duration::days(1), None, 0.5)
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidRange { .. }));

    let err = analyzer
        .get_transit_activations(&chart, start(), start() + Duration::days(400), None, 0.5)
        .unwrap_err();
    assert!(matches!(err, SearchError::ScanSpanTooLarge { days: 401, max: 366 }));

    let err = analyzer
        .get_transit_activations(&chart, start(), start(), Some(&[13]), 0.5)
        .unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));
}

#[test]
fn scan_before_birth_rejected() {
    let chart = ChartRecord::default();
    let p = provider(&chart);
    let analyzer = TransitAnalyzer::new(&p, SynthesisConfig::default()).unwrap();
    let before = chart.birth_date - Duration::days(5);
    let err = analyzer
        .get_transit_activations(&chart, before, before + Duration::days(2), None, 0.5)
        .unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));
}

#[test]
fn cached_provider_gives_same_events() {
    let chart = ChartRecord::default();
    let plain = provider(&chart);
    let cache = Arc::new(PositionCache::default());
    let cached = CachedProvider::new(provider(&chart), Arc::clone(&cache));
    let end = start() + Duration::days(14);

    let a = TransitAnalyzer::new(&plain, SynthesisConfig::default())
        .unwrap()
        .get_transit_activations(&chart, start(), end, None, 0.5)
        .unwrap();
    let analyzer = TransitAnalyzer::new(&cached, SynthesisConfig::default()).unwrap();
    let b = analyzer
        .get_transit_activations(&chart, start(), end, None, 0.5)
        .unwrap();
    let c = analyzer
        .get_transit_activations(&chart, start(), end, None, 0.5)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    let stats = cache.stats();
    assert_eq!(stats.misses, 15);
    assert_eq!(stats.hits, 15);
}
