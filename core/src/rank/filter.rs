use super::Rankable;
use crate::insight::model::TriggerCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Empty sets are pass-through on their axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub categories: BTreeSet<TriggerCategory>,
    #[serde(default)]
    pub platforms: BTreeSet<String>,
    #[serde(default)]
    pub min_confidence: f64,
    #[serde(default)]
    pub time_sensitive_only: bool,
}

impl FilterState {
    pub fn is_pass_through(&self) -> bool {
        self.categories.is_empty()
            && self.platforms.is_empty()
            && self.min_confidence <= 0.0
            && !self.time_sensitive_only
    }

    fn platform_matches(&self, labels: &[&str]) -> bool {
        if self.platforms.is_empty() {
            return true;
        }
        labels.iter().any(|label| {
            let label = label.to_lowercase();
            self.platforms.iter().any(|wanted| {
                let wanted = wanted.trim().to_lowercase();
                !wanted.is_empty() && label.contains(&wanted)
            })
        })
    }

    pub fn matches<T: Rankable>(&self, item: &T) -> bool {
        (self.categories.is_empty() || self.categories.contains(&item.category()))
            && self.platform_matches(&item.platform_labels())
            && item.aggregate_confidence() >= self.min_confidence
            && (!self.time_sensitive_only || item.is_time_sensitive())
    }
}

/// AND across all axes. Returns a new collection in input order.
pub fn filter_items<T: Rankable + Clone>(items: &[T], state: &FilterState) -> Vec<T> {
    items.iter().filter(|i| state.matches(*i)).cloned().collect()
}
