use serde::{Deserialize, Serialize};

pub const PASS_THRESHOLD: f64 = 75.0;

/// Per-dimension sub-scores in [0,100], produced upstream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub power_words: f64,
    pub emotional_triggers: f64,
    pub readability: f64,
    pub cta: f64,
    pub urgency: f64,
    pub trust: f64,
}

/// Dimension weights, summing to 1.
pub const WEIGHTS: ScoreBreakdown = ScoreBreakdown {
    power_words: 0.20,
    emotional_triggers: 0.25,
    readability: 0.20,
    cta: 0.15,
    urgency: 0.10,
    trust: 0.10,
};

fn clamp_dimension(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

impl ScoreBreakdown {
    pub fn clamped(self) -> Self {
        ScoreBreakdown {
            power_words: clamp_dimension(self.power_words),
            emotional_triggers: clamp_dimension(self.emotional_triggers),
            readability: clamp_dimension(self.readability),
            cta: clamp_dimension(self.cta),
            urgency: clamp_dimension(self.urgency),
            trust: clamp_dimension(self.trust),
        }
    }

    pub fn weighted_total(&self) -> f64 {
        let total = WEIGHTS.power_words * self.power_words
            + WEIGHTS.emotional_triggers * self.emotional_triggers
            + WEIGHTS.readability * self.readability
            + WEIGHTS.cta * self.cta
            + WEIGHTS.urgency * self.urgency
            + WEIGHTS.trust * self.trust;
        total.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Poor,
    Fair,
    Good,
    Great,
    Excellent,
}

/// Lower bounds, highest first. Each bound is inclusive.
static TIER_THRESHOLDS: [(f64, QualityTier); 4] = [
    (85.0, QualityTier::Excellent),
    (75.0, QualityTier::Great),
    (65.0, QualityTier::Good),
    (50.0, QualityTier::Fair),
];

impl QualityTier {
    pub fn from_total(total: f64) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(min, _)| total >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(QualityTier::Poor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub tier: QualityTier,
    pub passed: bool,
    /// Only populated when `passed` is false.
    pub hints: Vec<String>,
}

impl ContentScore {
    /// Builds a score from an already-combined total.
    pub fn from_total(total: f64, breakdown: ScoreBreakdown, hints: Vec<String>) -> Self {
        let total = if total.is_finite() { total.clamp(0.0, 100.0) } else { 0.0 };
        let passed = total >= PASS_THRESHOLD;
        ContentScore {
            total,
            breakdown,
            tier: QualityTier::from_total(total),
            passed,
            hints: if passed { Vec::new() } else { hints },
        }
    }
}

/// Combines six dimension scores into a 0-100 total and a tier. Improvement
/// hints are forwarded, never generated.
pub fn score_content(breakdown: ScoreBreakdown, hints: Vec<String>) -> ContentScore {
    let breakdown = breakdown.clamped();
    ContentScore::from_total(breakdown.weighted_total(), breakdown, hints)
}
