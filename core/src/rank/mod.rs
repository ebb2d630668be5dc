pub mod filter;
pub mod sort;

use crate::insight::model::{Trigger, TriggerCategory};

/// What the filter and sort engine needs to know about a consolidated entity.
pub trait Rankable {
    fn category(&self) -> TriggerCategory;
    /// Platform and source strings of every evidence item.
    fn platform_labels(&self) -> Vec<&str>;
    fn aggregate_confidence(&self) -> f64;
    fn is_time_sensitive(&self) -> bool;
    fn source_count(&self) -> usize;
    fn recency_days(&self) -> Option<u32>;
}

impl Rankable for Trigger {
    fn category(&self) -> TriggerCategory {
        self.category
    }

    fn platform_labels(&self) -> Vec<&str> {
        self.evidence
            .iter()
            .flat_map(|e| [e.platform.as_str(), e.source.as_str()])
            .collect()
    }

    fn aggregate_confidence(&self) -> f64 {
        self.confidence
    }

    fn is_time_sensitive(&self) -> bool {
        self.is_time_sensitive
    }

    fn source_count(&self) -> usize {
        self.evidence.len()
    }

    fn recency_days(&self) -> Option<u32> {
        self.recency_days
    }
}
