use serde::{Deserialize, Serialize};

/// Count-based trust signal. Replaces a numeric confidence display so thin
/// evidence is never presented as near-certain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TrustTier {
    Low,
    Medium,
    High,
}

/// Lower bounds, highest tier first.
static TRUST_THRESHOLDS: [(usize, TrustTier); 2] = [(4, TrustTier::High), (2, TrustTier::Medium)];

impl TrustTier {
    pub fn from_source_count(source_count: usize) -> Self {
        TRUST_THRESHOLDS
            .iter()
            .find(|(min, _)| source_count >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(TrustTier::Low)
    }

    pub fn label(self) -> &'static str {
        match self {
            TrustTier::High => "high",
            TrustTier::Medium => "medium",
            TrustTier::Low => "low",
        }
    }

    /// Presentation hint only.
    pub fn display_color(self) -> &'static str {
        match self {
            TrustTier::High => "green",
            TrustTier::Medium => "yellow",
            TrustTier::Low => "gray",
        }
    }
}
