use super::model::{Trigger, TriggerCategory};
use crate::config::engine::EngineConfig;
use crate::determinism::fingerprint::short_id;
use crate::evidence::model::{EvidenceItem, RawEvidence};
use crate::evidence::normalizer::{normalize_record, NormalizedRecord};
use crate::evidence::quote::truncate_for_display;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::OffsetDateTime;
use tracing::debug;

const FALLBACK_TITLE_CHARS: usize = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationStats {
    pub records_in: usize,
    pub evidence_kept: usize,
    pub duplicates_dropped: usize,
    pub empty_dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Consolidation {
    pub triggers: Vec<Trigger>,
    pub stats: ConsolidationStats,
}

struct Group {
    category: TriggerCategory,
    key: String,
    title: String,
    summary: Option<String>,
    journey_stage: Option<String>,
    is_time_sensitive: bool,
    newest: Option<OffsetDateTime>,
    seen_quotes: BTreeSet<String>,
    evidence: Vec<EvidenceItem>,
}

fn fold_key(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn group_title(record: &NormalizedRecord) -> String {
    record
        .title
        .clone()
        .unwrap_or_else(|| truncate_for_display(&record.evidence.quote, FALLBACK_TITLE_CHARS))
}

fn recency_days(newest: Option<OffsetDateTime>, reference: Option<OffsetDateTime>) -> Option<u32> {
    let (newest, reference) = (newest?, reference?);
    let days = (reference - newest).whole_days().max(0);
    Some(u32::try_from(days).unwrap_or(u32::MAX))
}

/// Normalizes raw records and merges them into triggers keyed by category and
/// title. Output order follows the first appearance of each group.
pub fn consolidate(
    raw: &[RawEvidence],
    config: &EngineConfig,
    reference: Option<OffsetDateTime>,
) -> Consolidation {
    let mut stats = ConsolidationStats {
        records_in: raw.len(),
        ..ConsolidationStats::default()
    };
    let mut groups: Vec<Group> = Vec::new();
    let mut index: BTreeMap<(TriggerCategory, String), usize> = BTreeMap::new();

    for record in raw.iter().map(|r| normalize_record(r, config)) {
        if record.evidence.quote.is_empty() {
            stats.empty_dropped += 1;
            continue;
        }
        let title = group_title(&record);
        let key = fold_key(&title);
        let slot = *index
            .entry((record.category, key.clone()))
            .or_insert_with(|| {
                groups.push(Group {
                    category: record.category,
                    key,
                    title,
                    summary: None,
                    journey_stage: None,
                    is_time_sensitive: false,
                    newest: None,
                    seen_quotes: BTreeSet::new(),
                    evidence: Vec::new(),
                });
                groups.len() - 1
            });
        let group = &mut groups[slot];

        if !group.seen_quotes.insert(fold_key(&record.evidence.quote)) {
            stats.duplicates_dropped += 1;
            continue;
        }
        group.is_time_sensitive |= record.is_time_sensitive;
        if group.summary.is_none() {
            group.summary = record.summary;
        }
        if group.journey_stage.is_none() {
            group.journey_stage = record.journey_stage;
        }
        if let Some(at) = record.observed_at {
            group.newest = Some(group.newest.map_or(at, |n| n.max(at)));
        }
        group.evidence.push(record.evidence);
        stats.evidence_kept += 1;
    }

    let triggers: Vec<Trigger> = groups
        .into_iter()
        .map(|g| {
            let confidences: Vec<f64> = g.evidence.iter().map(|e| e.confidence).collect();
            let summary = g
                .summary
                .unwrap_or_else(|| g.evidence[0].quote.clone());
            Trigger {
                id: short_id("trg", &[g.category.as_str(), g.key.as_str()]),
                category: g.category,
                title: g.title,
                summary,
                confidence: config.confidence_aggregation.aggregate(&confidences),
                recency_days: recency_days(g.newest, reference),
                is_time_sensitive: g.is_time_sensitive,
                journey_stage: g.journey_stage,
                evidence: g.evidence,
            }
        })
        .collect();

    debug!(
        records_in = stats.records_in,
        triggers = triggers.len(),
        duplicates = stats.duplicates_dropped,
        empty = stats.empty_dropped,
        "consolidated raw records"
    );

    Consolidation { triggers, stats }
}
