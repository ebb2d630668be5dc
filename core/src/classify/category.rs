use super::signal::Signal;
use crate::evidence::model::Sentiment;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_REASON_CHARS: usize = 30;
pub const MAX_REASONS: usize = 3;
pub const CONFIDENCE_FLOOR: f64 = 0.5;
pub const CONFIDENCE_CEILING: f64 = 0.95;
pub const DEFAULT_REASON: &str = "Default category (no insights selected)";

const PAIN_WORDS: &[&str] = &[
    "problem", "struggl", "pain", "frustrat", "issue", "difficult", "hate", "annoy", "broken",
    "complain", "stuck", "hassle", "fear", "worr",
];

const ASPIRATION_WORDS: &[&str] = &[
    "goal", "dream", "aspir", "desire", "wish", "achiev", "ambition", "motivat", "success",
    "grow", "improv",
];

/// Customer motivation labels, in tie-breaking order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerCategory {
    PainDriven,
    AspirationDriven,
    TrustSeeking,
    ConvenienceDriven,
    ValueDriven,
    CommunityDriven,
}

impl CustomerCategory {
    pub const ALL: [CustomerCategory; 6] = [
        CustomerCategory::PainDriven,
        CustomerCategory::AspirationDriven,
        CustomerCategory::TrustSeeking,
        CustomerCategory::ConvenienceDriven,
        CustomerCategory::ValueDriven,
        CustomerCategory::CommunityDriven,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CustomerCategory::PainDriven => "pain-driven",
            CustomerCategory::AspirationDriven => "aspiration-driven",
            CustomerCategory::TrustSeeking => "trust-seeking",
            CustomerCategory::ConvenienceDriven => "convenience-driven",
            CustomerCategory::ValueDriven => "value-driven",
            CustomerCategory::CommunityDriven => "community-driven",
        }
    }

    /// Threshold bucketing of a 0-100 emotional quotient.
    pub fn from_emotional_quotient(eq: f64) -> Self {
        match eq {
            v if v >= 80.0 => CustomerCategory::PainDriven,
            v if v >= 65.0 => CustomerCategory::AspirationDriven,
            v if v >= 50.0 => CustomerCategory::CommunityDriven,
            v if v >= 35.0 => CustomerCategory::ValueDriven,
            _ => CustomerCategory::TrustSeeking,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetectionResult {
    pub category: CustomerCategory,
    /// Within [0.5, 0.95].
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl CategoryDetectionResult {
    pub fn default_result() -> Self {
        CategoryDetectionResult {
            category: CustomerCategory::ValueDriven,
            confidence: CONFIDENCE_FLOOR,
            reasons: vec![DEFAULT_REASON.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Contribution {
    category: CustomerCategory,
    weight: u32,
    reason: String,
}

struct Vocabulary {
    pattern: Regex,
}

impl Vocabulary {
    fn new(words: &'static [&'static str]) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})", words.join("|")))
            .unwrap_or_else(|_| Regex::new("^$").unwrap());
        Vocabulary { pattern }
    }

    fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

pub fn truncate_reason(reason: &str) -> String {
    if reason.chars().count() <= MAX_REASON_CHARS {
        return reason.to_string();
    }
    let mut out: String = reason.chars().take(MAX_REASON_CHARS - 1).collect();
    out.push('…');
    out
}

fn reason(prefix: &str, signal: &Signal) -> String {
    match signal.label() {
        Some(label) => truncate_reason(&format!("{}: {}", prefix, label)),
        None => truncate_reason(prefix),
    }
}

/// Rule-based scorer over selected signals. Holds only immutable compiled
/// vocabularies; results depend on nothing but the input.
pub struct CategoryClassifier {
    pain: Vocabulary,
    aspiration: Vocabulary,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryClassifier {
    pub fn new() -> Self {
        CategoryClassifier {
            pain: Vocabulary::new(PAIN_WORDS),
            aspiration: Vocabulary::new(ASPIRATION_WORDS),
        }
    }

    fn contributions(&self, signal: &Signal) -> Vec<Contribution> {
        use CustomerCategory::*;
        let one = |category, weight, reason| {
            vec![Contribution {
                category,
                weight,
                reason,
            }]
        };
        match signal {
            Signal::Trigger(t) => {
                let text = format!(
                    "{} {}",
                    t.title.as_deref().unwrap_or(""),
                    t.category.as_deref().unwrap_or("")
                );
                if self.pain.matches(&text) {
                    one(PainDriven, 3, reason("Pain trigger", signal))
                } else if self.aspiration.matches(&text) {
                    one(AspirationDriven, 3, reason("Aspiration trigger", signal))
                } else {
                    one(PainDriven, 1, reason("Trigger", signal))
                }
            }
            Signal::Proof(_) => one(TrustSeeking, 3, reason("Social proof", signal)),
            Signal::Trend(_) => one(ValueDriven, 2, reason("Trend", signal)),
            Signal::Conversation(c) => {
                let mut out = one(CommunityDriven, 2, reason("Conversation", signal));
                if c.sentiment() == Sentiment::Negative {
                    out.push(Contribution {
                        category: PainDriven,
                        weight: 1,
                        reason: reason("Negative sentiment", signal),
                    });
                }
                out
            }
            Signal::Competitor(_) => one(ValueDriven, 2, reason("Competitor", signal)),
            Signal::Local(_) => one(CommunityDriven, 3, reason("Local", signal)),
            Signal::Weather(_) => one(ConvenienceDriven, 1, reason("Weather", signal)),
        }
    }

    pub fn detect(&self, signals: &[Signal]) -> CategoryDetectionResult {
        if signals.is_empty() {
            return CategoryDetectionResult::default_result();
        }

        let contributions: Vec<Contribution> =
            signals.iter().flat_map(|s| self.contributions(s)).collect();
        let mut scores = [0u32; 6];
        for c in &contributions {
            scores[c.category.index()] += c.weight;
        }

        let mut winner = CustomerCategory::ALL[0];
        let mut max_score = scores[winner.index()];
        for category in CustomerCategory::ALL.iter().skip(1) {
            if scores[category.index()] > max_score {
                winner = *category;
                max_score = scores[category.index()];
            }
        }
        let total: u32 = scores.iter().sum();
        let confidence = if total > 0 {
            (CONFIDENCE_FLOOR + (max_score as f64 / total as f64) * 0.5).min(CONFIDENCE_CEILING)
        } else {
            CONFIDENCE_FLOOR
        };

        let mut winning: Vec<&Contribution> =
            contributions.iter().filter(|c| c.category == winner).collect();
        winning.sort_by(|a, b| b.weight.cmp(&a.weight));
        let reasons = winning
            .into_iter()
            .take(MAX_REASONS)
            .map(|c| c.reason.clone())
            .collect();

        debug!(
            signals = signals.len(),
            category = winner.as_str(),
            max_score,
            total,
            "category detected"
        );

        CategoryDetectionResult {
            category: winner,
            confidence,
            reasons,
        }
    }

    /// Uses the emotional quotient only when there are no signals at all.
    pub fn detect_with_fallback(
        &self,
        signals: &[Signal],
        emotional_quotient: Option<f64>,
    ) -> CategoryDetectionResult {
        match emotional_quotient.filter(|v| v.is_finite()) {
            Some(eq) if signals.is_empty() => {
                let eq = eq.clamp(0.0, 100.0);
                CategoryDetectionResult {
                    category: CustomerCategory::from_emotional_quotient(eq),
                    confidence: CONFIDENCE_FLOOR,
                    reasons: vec![truncate_reason(&format!("Emotional quotient {:.0}/100", eq))],
                }
            }
            _ => self.detect(signals),
        }
    }
}

pub fn detect_category_from_insights(signals: &[Signal]) -> CategoryDetectionResult {
    CategoryClassifier::new().detect(signals)
}
