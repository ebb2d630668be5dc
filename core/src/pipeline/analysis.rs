use crate::classify::category::{CategoryClassifier, CategoryDetectionResult};
use crate::classify::signal::parse_signals;
use crate::config::engine::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::evidence::model::RawEvidence;
use crate::evidence::normalizer::parse_timestamp;
use crate::evidence::quote::{best_quote, BestQuote};
use crate::evidence::trust::TrustTier;
use crate::insight::consolidate::{consolidate, ConsolidationStats};
use crate::insight::model::Trigger;
use crate::lenient;
use crate::rank::filter::{filter_items, FilterState};
use crate::rank::sort::{sort_items, SortKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Decoded per entry; an undecodable entry becomes an empty record.
    #[serde(default, deserialize_with = "lenient::each_or_default")]
    pub records: Vec<RawEvidence>,
    /// Classifier signals; undecodable entries are skipped.
    #[serde(default)]
    pub signals: Vec<Value>,
    #[serde(default)]
    pub emotional_quotient: Option<f64>,
    #[serde(default)]
    pub filter: FilterState,
    #[serde(default)]
    pub sort: SortKey,
    /// RFC 3339 instant recency is measured against. Without it recency is
    /// unknown for every trigger.
    #[serde(default)]
    pub reference_time: Option<String>,
}

impl AnalysisRequest {
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidInput(format!("failed to parse analysis request: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerView {
    pub trigger: Trigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_quote: Option<BestQuote>,
    pub trust_tier: TrustTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub triggers: Vec<TriggerView>,
    pub category: CategoryDetectionResult,
    pub stats: ConsolidationStats,
    pub triggers_total: usize,
    pub triggers_shown: usize,
    pub signals_used: usize,
}

/// Runs the full pass: normalize and consolidate, filter and sort, attach
/// display data, classify the selected signals.
pub fn analyze(request: &AnalysisRequest, config: &EngineConfig) -> AnalysisReport {
    let reference = request.reference_time.as_ref().and_then(|s| {
        let parsed = parse_timestamp(&Value::String(s.clone()));
        if parsed.is_none() {
            debug!(reference_time = %s, "unparseable reference time, recency disabled");
        }
        parsed
    });

    let consolidation = consolidate(&request.records, config, reference);
    let triggers_total = consolidation.triggers.len();
    let filtered = filter_items(&consolidation.triggers, &request.filter);
    let sorted = sort_items(&filtered, request.sort, config.recency_sentinel_days);

    let views: Vec<TriggerView> = sorted
        .into_iter()
        .map(|trigger| TriggerView {
            best_quote: best_quote(&trigger.evidence, config.quote_display_chars),
            trust_tier: trigger.trust_tier(),
            trigger,
        })
        .collect();

    let signals = parse_signals(&request.signals);
    let category =
        CategoryClassifier::new().detect_with_fallback(&signals, request.emotional_quotient);

    info!(
        records = request.records.len(),
        triggers_total,
        triggers_shown = views.len(),
        category = category.category.as_str(),
        "analysis complete"
    );

    AnalysisReport {
        triggers_shown: views.len(),
        triggers: views,
        category,
        stats: consolidation.stats,
        triggers_total,
        signals_used: signals.len(),
    }
}
