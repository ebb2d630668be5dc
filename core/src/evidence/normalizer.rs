use super::model::{EvidenceItem, RawEvidence, Sentiment};
use super::platform::extract_platform;
use crate::config::engine::EngineConfig;
use crate::determinism::fingerprint::short_id;
use crate::insight::model::TriggerCategory;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::warn;

pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// Evidence plus the grouping hints carried by the raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub evidence: EvidenceItem,
    pub category: TriggerCategory,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub is_time_sensitive: bool,
    pub journey_stage: Option<String>,
    pub observed_at: Option<OffsetDateTime>,
}

/// Values above 1 are percentages. Result is clamped to [0,1].
pub fn normalize_confidence(raw: f64) -> f64 {
    let value = if raw > 1.0 { raw / 100.0 } else { raw };
    value.clamp(0.0, 1.0)
}

fn parse_confidence(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(normalize_confidence),
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.strip_suffix('%') {
                Some(pct) => pct
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| (v / 100.0).clamp(0.0, 1.0)),
                None => trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(normalize_confidence),
            }
        }
        _ => None,
    }
}

/// RFC 3339 strings or epoch milliseconds (number or numeric string).
pub fn parse_timestamp(raw: &Value) -> Option<OffsetDateTime> {
    let from_millis = |ms: i64| {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
    };
    match raw {
        Value::Number(n) => n.as_i64().and_then(from_millis),
        Value::String(s) => {
            let trimmed = s.trim();
            OffsetDateTime::parse(trimmed, &Rfc3339)
                .ok()
                .or_else(|| trimmed.parse::<i64>().ok().and_then(from_millis))
        }
        _ => None,
    }
}

pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .unwrap_or_else(|_| EPOCH_TIMESTAMP.to_string())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(collapse_whitespace)
        .filter(|v| !v.is_empty())
}

/// Canonicalizes one raw record. Never fails: every missing or malformed
/// field is replaced by its documented default.
pub fn normalize_record(raw: &RawEvidence, config: &EngineConfig) -> NormalizedRecord {
    let quote = non_empty(&raw.quote)
        .or_else(|| non_empty(&raw.text))
        .or_else(|| non_empty(&raw.content))
        .unwrap_or_default();
    let url = non_empty(&raw.url);
    let platform = extract_platform(url.as_deref(), raw.platform.as_deref(), raw.source.as_deref());
    let source = non_empty(&raw.source).unwrap_or_else(|| platform.clone());

    let confidence = match &raw.confidence {
        Some(value) => parse_confidence(value).unwrap_or_else(|| {
            warn!(value = %value, "unparseable confidence, using default");
            config.default_confidence
        }),
        None => config.default_confidence,
    };

    let observed_at = raw.timestamp.as_ref().and_then(parse_timestamp);
    let timestamp = observed_at
        .map(format_timestamp)
        .unwrap_or_else(|| EPOCH_TIMESTAMP.to_string());

    let id = non_empty(&raw.id).unwrap_or_else(|| {
        short_id("ev", &[quote.as_str(), source.as_str(), url.as_deref().unwrap_or("")])
    });

    let category = raw
        .category
        .as_deref()
        .map(TriggerCategory::from_label)
        .unwrap_or_default();

    NormalizedRecord {
        evidence: EvidenceItem {
            id,
            quote,
            source,
            platform,
            url,
            author: non_empty(&raw.author),
            timestamp,
            sentiment: raw
                .sentiment
                .as_deref()
                .map(Sentiment::from_label)
                .unwrap_or_default(),
            confidence,
        },
        category,
        title: non_empty(&raw.title),
        summary: non_empty(&raw.summary),
        is_time_sensitive: raw.is_time_sensitive.unwrap_or(false),
        journey_stage: non_empty(&raw.journey_stage),
        observed_at,
    }
}

/// Convenience wrapper returning only the evidence shape.
pub fn normalize_evidence(raw: &RawEvidence, config: &EngineConfig) -> EvidenceItem {
    normalize_record(raw, config).evidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn percentage_confidence_is_scaled() {
        assert!((normalize_confidence(85.0) - 0.85).abs() < 1e-9);
        assert_eq!(normalize_confidence(250.0), 1.0);
        assert_eq!(normalize_confidence(-3.0), 0.0);
        assert_eq!(normalize_confidence(0.4), 0.4);
        assert_eq!(normalize_confidence(1.0), 1.0);
    }

    #[test]
    fn string_confidences_are_accepted() {
        assert_eq!(parse_confidence(&json!("85%")), Some(0.85));
        assert_eq!(parse_confidence(&json!(" 0.25 ")), Some(0.25));
        assert_eq!(parse_confidence(&json!("high")), None);
        assert_eq!(parse_confidence(&json!(true)), None);
    }

    #[test]
    fn empty_record_gets_all_defaults() {
        let rec = normalize_record(&RawEvidence::default(), &cfg());
        assert_eq!(rec.category, TriggerCategory::Motivation);
        assert_eq!(rec.evidence.confidence, 0.5);
        assert_eq!(rec.evidence.platform, "Source");
        assert_eq!(rec.evidence.source, "Source");
        assert_eq!(rec.evidence.timestamp, EPOCH_TIMESTAMP);
        assert_eq!(rec.evidence.sentiment, Sentiment::Neutral);
        assert!(rec.evidence.id.starts_with("ev_"));
        assert!(rec.observed_at.is_none());
    }

    #[test]
    fn malformed_confidence_falls_back_to_default() {
        let raw = RawEvidence {
            confidence: Some(json!({"nested": 1})),
            ..RawEvidence::default()
        };
        assert_eq!(normalize_evidence(&raw, &cfg()).confidence, 0.5);
    }

    #[test]
    fn timestamps_are_rendered_in_utc() {
        let raw = RawEvidence {
            timestamp: Some(json!("2026-03-01T10:00:00+02:00")),
            ..RawEvidence::default()
        };
        assert_eq!(normalize_evidence(&raw, &cfg()).timestamp, "2026-03-01T08:00:00Z");

        let raw = RawEvidence {
            timestamp: Some(json!(86_400_000)),
            ..RawEvidence::default()
        };
        assert_eq!(normalize_evidence(&raw, &cfg()).timestamp, "1970-01-02T00:00:00Z");
    }

    #[test]
    fn quote_falls_back_through_text_fields() {
        let raw = RawEvidence {
            text: Some("  too   many\nspaces ".to_string()),
            content: Some("ignored".to_string()),
            ..RawEvidence::default()
        };
        assert_eq!(normalize_evidence(&raw, &cfg()).quote, "too many spaces");
    }

    #[test]
    fn ids_are_deterministic() {
        let raw = RawEvidence {
            quote: Some("Setup took forever".to_string()),
            url: Some("https://www.reddit.com/r/saas/comments/1".to_string()),
            ..RawEvidence::default()
        };
        let a = normalize_evidence(&raw, &cfg());
        let b = normalize_evidence(&raw, &cfg());
        assert_eq!(a.id, b.id);
        assert_eq!(a.platform, "Reddit");
        assert_eq!(a.source, "Reddit");
    }
}
