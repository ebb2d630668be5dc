use super::Rankable;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECENCY_SENTINEL_DAYS: u32 = 999;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Most evidence first.
    #[default]
    SourceCount,
    /// Freshest first; undated items last.
    Recency,
}

/// Stable sort into a new collection. Missing recency counts as
/// `recency_sentinel_days` and always sorts after every dated item.
pub fn sort_items<T: Rankable + Clone>(items: &[T], key: SortKey, recency_sentinel_days: u32) -> Vec<T> {
    let mut out = items.to_vec();
    match key {
        SortKey::SourceCount => out.sort_by(|a, b| b.source_count().cmp(&a.source_count())),
        SortKey::Recency => out.sort_by_key(|item| {
            (
                item.recency_days().is_none(),
                item.recency_days().unwrap_or(recency_sentinel_days),
            )
        }),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::model::{EvidenceItem, Sentiment};
    use crate::insight::model::{Trigger, TriggerCategory};

    fn trigger(id: &str, sources: usize, recency: Option<u32>) -> Trigger {
        let evidence = (0..sources)
            .map(|i| EvidenceItem {
                id: format!("{}-{}", id, i),
                quote: "quote".to_string(),
                source: "Reddit".to_string(),
                platform: "Reddit".to_string(),
                url: None,
                author: None,
                timestamp: "1970-01-01T00:00:00Z".to_string(),
                sentiment: Sentiment::Neutral,
                confidence: 0.5,
            })
            .collect();
        Trigger {
            id: id.to_string(),
            category: TriggerCategory::Motivation,
            title: id.to_string(),
            summary: String::new(),
            evidence,
            is_time_sensitive: false,
            journey_stage: None,
            confidence: 0.5,
            recency_days: recency,
        }
    }

    fn ids(items: &[Trigger]) -> Vec<&str> {
        items.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn source_count_descending_and_stable() {
        let items = vec![trigger("a", 1, None), trigger("b", 3, None), trigger("c", 1, None)];
        let sorted = sort_items(&items, SortKey::SourceCount, DEFAULT_RECENCY_SENTINEL_DAYS);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_recency_sorts_last() {
        let items = vec![
            trigger("unknown", 1, None),
            trigger("old", 1, Some(999)),
            trigger("fresh", 1, Some(2)),
            trigger("week", 1, Some(7)),
        ];
        let sorted = sort_items(&items, SortKey::Recency, DEFAULT_RECENCY_SENTINEL_DAYS);
        assert_eq!(ids(&sorted), vec!["fresh", "week", "old", "unknown"]);
    }

    #[test]
    fn missing_recency_sorts_after_values_beyond_the_sentinel() {
        let items = vec![
            trigger("unknown", 1, None),
            trigger("ancient", 1, Some(1155)),
            trigger("at-sentinel", 1, Some(999)),
        ];
        let sorted = sort_items(&items, SortKey::Recency, DEFAULT_RECENCY_SENTINEL_DAYS);
        assert_eq!(ids(&sorted), vec!["at-sentinel", "ancient", "unknown"]);
    }

    #[test]
    fn sort_key_wire_names() {
        assert_eq!(serde_json::to_string(&SortKey::SourceCount).unwrap(), "\"sourceCount\"");
        assert_eq!(serde_json::from_str::<SortKey>("\"recency\"").unwrap(), SortKey::Recency);
    }
}
