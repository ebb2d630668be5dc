use crate::evidence::model::EvidenceItem;
use crate::evidence::trust::TrustTier;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerCategory {
    PainPoint,
    #[default]
    Motivation,
    Objection,
    Desire,
    Fear,
    Trust,
}

impl TriggerCategory {
    pub const ALL: [TriggerCategory; 6] = [
        TriggerCategory::PainPoint,
        TriggerCategory::Motivation,
        TriggerCategory::Objection,
        TriggerCategory::Desire,
        TriggerCategory::Fear,
        TriggerCategory::Trust,
    ];

    /// Lenient parse of upstream hints. Anything unrecognized is `Motivation`.
    pub fn from_label(label: &str) -> Self {
        let key = label.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "pain-point" | "pain-points" | "pain" => TriggerCategory::PainPoint,
            "objection" | "objections" => TriggerCategory::Objection,
            "desire" | "desires" => TriggerCategory::Desire,
            "fear" | "fears" => TriggerCategory::Fear,
            "trust" | "trust-signal" | "trust-signals" => TriggerCategory::Trust,
            _ => TriggerCategory::Motivation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerCategory::PainPoint => "pain-point",
            TriggerCategory::Motivation => "motivation",
            TriggerCategory::Objection => "objection",
            TriggerCategory::Desire => "desire",
            TriggerCategory::Fear => "fear",
            TriggerCategory::Trust => "trust",
        }
    }
}

/// A consolidated, categorized entity built from one or more evidence items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub id: String,
    pub category: TriggerCategory,
    pub title: String,
    pub summary: String,
    pub evidence: Vec<EvidenceItem>,
    pub is_time_sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_stage: Option<String>,
    /// Aggregate of the evidence confidences, within [0,1].
    pub confidence: f64,
    /// Whole days since the newest dated evidence, if any is dated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recency_days: Option<u32>,
}

impl Trigger {
    pub fn source_count(&self) -> usize {
        self.evidence.len()
    }

    pub fn trust_tier(&self) -> TrustTier {
        TrustTier::from_source_count(self.source_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_default_to_motivation() {
        assert_eq!(TriggerCategory::from_label("Pain Point"), TriggerCategory::PainPoint);
        assert_eq!(TriggerCategory::from_label("trust_signals"), TriggerCategory::Trust);
        assert_eq!(TriggerCategory::from_label("whatever"), TriggerCategory::Motivation);
        assert_eq!(TriggerCategory::from_label(""), TriggerCategory::Motivation);
    }

    #[test]
    fn wire_labels_are_kebab_case() {
        for c in TriggerCategory::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.as_str()));
        }
    }
}
