//! End-to-end synthesis scenarios.

use chrono::{DateTime, Duration, TimeZone, Utc};
use samaya_search::{
    EventKind, EventType, MeanMotionProvider, SearchError, SynthesisConfig, SynthesisCoordinator,
    predict_with_mean_motion,
};
use samaya_vedic_base::ChartRecord;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()
}

#[test]
fn four_hundred_day_window_rejected() {
    let err = predict_with_mean_motion(&ChartRecord::default(), start(), 400, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "prediction window must be 1–365 days, got 400"
    );
}

#[test]
fn zero_day_window_rejected() {
    let err = predict_with_mean_motion(&ChartRecord::default(), start(), 0, None).unwrap_err();
    assert!(matches!(err, SearchError::InvalidWindow { days: 0, .. }));
}

#[test]
fn thirty_day_default_prediction() {
    let result = predict_with_mean_motion(&ChartRecord::default(), start(), 30, None).unwrap();
    assert!(!result.events.is_empty());
    for w in result.events.windows(2) {
        assert!(w[0].date <= w[1].date, "events out of order");
    }
    for e in &result.events {
        assert!((0.0..=1.0).contains(&e.strength_score));
        assert!(!e.description.is_empty());
        assert!(!e.recommendation.is_empty());
    }
    assert!(result.events_of(EventKind::TransitWindow).count() >= 1);
    assert!((0.0..=1.0).contains(&result.confidence_score));
}

#[test]
fn transit_windows_stay_inside_requested_days() {
    let chart = ChartRecord::default();
    let result = predict_with_mean_motion(&chart, start(), 30, None).unwrap();
    let last_day = start() + Duration::days(29);
    let mut seen = 0;
    for e in result.events_of(EventKind::TransitWindow) {
        assert!(e.window_start >= start());
        assert!(
            e.window_end <= last_day,
            "window ends {} after last day {}",
            e.window_end,
            last_day
        );
        seen += 1;
    }
    assert!(seen >= 1);
}

#[test]
fn transit_score_does_not_move_headline() {
    let chart = ChartRecord::default();
    let all = predict_with_mean_motion(&chart, start(), 60, None).unwrap();
    let marriage = predict_with_mean_motion(&chart, start(), 60, Some(EventType::Marriage)).unwrap();
    assert_eq!(all.kp_contribution, marriage.kp_contribution);
    assert_eq!(all.dasha_contribution, marriage.dasha_contribution);
    assert_eq!(all.confidence_score, marriage.confidence_score);
}

#[test]
fn event_type_labels_transit_events() {
    let chart = ChartRecord::default();
    let result = predict_with_mean_motion(&chart, start(), 90, Some(EventType::Spirituality)).unwrap();
    for e in result.events_of(EventKind::TransitWindow) {
        assert_eq!(e.influence_area, "spirituality");
        assert!(e.secondary_planet.is_some());
    }
}

#[test]
fn custom_window_limit() {
    let chart = ChartRecord::default();
    let provider = MeanMotionProvider::from_chart(&chart).unwrap();
    let config = SynthesisConfig::default().with_max_window_days(60);
    let coordinator = SynthesisCoordinator::new(&provider, config).unwrap();
    assert!(coordinator.predict(&chart, start(), 60, None).is_ok());
    let err = coordinator.predict(&chart, start(), 61, None).unwrap_err();
    assert_eq!(err.to_string(), "prediction window must be 1–60 days, got 61");
}

#[test]
fn result_serializes_with_type_tags() {
    let result = predict_with_mean_motion(&ChartRecord::default(), start(), 15, None).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    let kinds: Vec<&str> = json["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"kp_significator"));
    assert!(kinds.contains(&"dasha_change"));
    assert!(json["confidence_score"].is_f64());
}
