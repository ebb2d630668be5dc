use signal_core::classify::category::{detect_category_from_insights, CustomerCategory};
use signal_core::classify::signal::{parse_signals, ProofSignal, Signal};
use signal_core::config::engine::EngineConfig;
use signal_core::evidence::model::{EvidenceItem, RawEvidence, Sentiment};
use signal_core::evidence::normalizer::{normalize_confidence, normalize_evidence};
use signal_core::evidence::quote::best_quote;
use signal_core::evidence::trust::TrustTier;
use signal_core::insight::consolidate::consolidate;
use signal_core::insight::model::{Trigger, TriggerCategory};
use signal_core::quality::score::{ContentScore, QualityTier, ScoreBreakdown};
use signal_core::rank::filter::{filter_items, FilterState};
use signal_core::rank::sort::{sort_items, SortKey};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn evidence(quote: String, source: &str) -> EvidenceItem {
    EvidenceItem {
        id: source.to_string(),
        quote,
        source: source.to_string(),
        platform: "Reddit".to_string(),
        url: None,
        author: None,
        timestamp: "1970-01-01T00:00:00Z".to_string(),
        sentiment: Sentiment::Neutral,
        confidence: 0.5,
    }
}

fn trigger(id: &str, recency_days: Option<u32>) -> Trigger {
    Trigger {
        id: id.to_string(),
        category: TriggerCategory::Fear,
        title: id.to_string(),
        summary: id.to_string(),
        evidence: vec![evidence("q".to_string(), id)],
        is_time_sensitive: false,
        journey_stage: None,
        confidence: 0.5,
        recency_days,
    }
}

#[test]
fn percentage_confidence_is_divided_and_clamped() {
    assert!((normalize_confidence(42.0) - 0.42).abs() < 1e-12);
    assert_eq!(normalize_confidence(140.0), 1.0);

    let raw: RawEvidence = serde_json::from_value(json!({"quote": "x", "confidence": 73})).unwrap();
    let item = normalize_evidence(&raw, &EngineConfig::default());
    assert!((item.confidence - 0.73).abs() < 1e-12);
}

#[test]
fn best_quote_prefers_the_display_window() {
    let items = vec![evidence("b".repeat(300), "long"), evidence("a".repeat(60), "short")];
    let picked = best_quote(&items, 100).unwrap();
    assert_eq!(picked.source, "short");
    assert_eq!(picked.quote.len(), 60);
}

#[test]
fn no_signals_means_default_category() {
    let r = detect_category_from_insights(&[]);
    assert_eq!(r.category, CustomerCategory::ValueDriven);
    assert_eq!(r.confidence, 0.5);
    assert_eq!(r.reasons, vec!["Default category (no insights selected)".to_string()]);
}

#[test]
fn three_proofs_are_trust_seeking_at_the_ceiling() {
    let proof = Signal::Proof(ProofSignal::default());
    let r = detect_category_from_insights(&[proof.clone(), proof.clone(), proof]);
    assert_eq!(r.category, CustomerCategory::TrustSeeking);
    assert_eq!(r.confidence, 0.95);
}

#[test]
fn trust_tiers_follow_source_count() {
    assert_eq!(TrustTier::from_source_count(5), TrustTier::High);
    assert_eq!(TrustTier::from_source_count(3), TrustTier::Medium);
    assert_eq!(TrustTier::from_source_count(1), TrustTier::Low);
}

#[test]
fn empty_filter_axes_are_identity() {
    let items = vec![trigger("a", Some(3)), trigger("b", None)];
    let state = FilterState {
        categories: Default::default(),
        platforms: Default::default(),
        min_confidence: 0.0,
        time_sensitive_only: false,
    };
    assert_eq!(filter_items(&items, &state), items);
}

#[test]
fn quality_tier_boundary() {
    let at = ContentScore::from_total(85.0, ScoreBreakdown::default(), vec![]);
    let below = ContentScore::from_total(84.999, ScoreBreakdown::default(), vec![]);
    assert_eq!(at.tier, QualityTier::Excellent);
    assert_eq!(below.tier, QualityTier::Great);
}

#[test]
fn unknown_recency_sorts_after_known_regardless_of_order() {
    let items = vec![trigger("none", None), trigger("ten", Some(10)), trigger("one", Some(1))];
    let sorted = sort_items(&items, SortKey::Recency, 999);
    let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["one", "ten", "none"]);

    let reversed: Vec<Trigger> = items.into_iter().rev().collect();
    let sorted = sort_items(&reversed, SortKey::Recency, 999);
    assert_eq!(sorted.last().unwrap().id, "none");
}

#[test]
fn undated_triggers_sort_after_very_old_ones() {
    let records: Vec<RawEvidence> = serde_json::from_value(json!([
        {"title": "unknown", "quote": "No date on this one"},
        {"title": "old", "quote": "Posted years ago", "timestamp": "2023-01-01T00:00:00Z"}
    ]))
    .unwrap();
    let reference = OffsetDateTime::parse("2026-03-01T00:00:00Z", &Rfc3339).unwrap();
    let out = consolidate(&records, &EngineConfig::default(), Some(reference));
    assert!(out.triggers[1].recency_days.unwrap() > 999);

    let sorted = sort_items(&out.triggers, SortKey::Recency, 999);
    let titles: Vec<&str> = sorted.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["old", "unknown"]);
}

#[test]
fn proofs_with_malformed_counts_still_score() {
    let signals = parse_signals(&[
        json!({"type": "proof", "sourceCount": "12"}),
        json!({"type": "proof", "sourceCount": -1}),
        json!({"type": "trend"}),
    ]);
    assert_eq!(signals.len(), 3);
    let r = detect_category_from_insights(&signals);
    assert_eq!(r.category, CustomerCategory::TrustSeeking);
    assert!((r.confidence - (0.5 + 6.0 / 8.0 * 0.5)).abs() < 1e-9);
}
