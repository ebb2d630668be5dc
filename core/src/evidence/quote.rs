use super::model::EvidenceItem;
use serde::{Deserialize, Serialize};

pub const IDEAL_MIN_CHARS: usize = 50;
pub const IDEAL_MAX_CHARS: usize = 200;
pub const IDEAL_CENTER_CHARS: i64 = 125;
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BestQuote {
    /// Untruncated, for the expanded view.
    pub quote: String,
    pub source: String,
    pub display: String,
}

/// 100 inside the ideal window, otherwise penalized by distance to its center.
pub fn quote_score(quote: &str) -> i64 {
    let len = quote.chars().count();
    if (IDEAL_MIN_CHARS..=IDEAL_MAX_CHARS).contains(&len) {
        100
    } else {
        100 - (IDEAL_CENTER_CHARS - len as i64).abs()
    }
}

pub fn truncate_for_display(quote: &str, max_chars: usize) -> String {
    if quote.chars().count() <= max_chars {
        return quote.to_string();
    }
    let mut out: String = quote.chars().take(max_chars).collect();
    out.push(ELLIPSIS);
    out
}

/// Picks the most representative quote. Ties keep the earliest item.
pub fn best_quote(evidence: &[EvidenceItem], display_chars: usize) -> Option<BestQuote> {
    let mut best: Option<(&EvidenceItem, i64)> = None;
    for item in evidence {
        let score = quote_score(&item.quote);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((item, score)),
        }
    }
    best.map(|(item, _)| BestQuote {
        quote: item.quote.clone(),
        source: item.source.clone(),
        display: truncate_for_display(&item.quote, display_chars),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::model::Sentiment;

    fn item(id: &str, len: usize) -> EvidenceItem {
        EvidenceItem {
            id: id.to_string(),
            quote: "a".repeat(len),
            source: format!("src-{}", id),
            platform: "Reddit".to_string(),
            url: None,
            author: None,
            timestamp: "1970-01-01T00:00:00Z".to_string(),
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
        }
    }

    #[test]
    fn prefers_quote_closer_to_window() {
        let picked = best_quote(&[item("long", 300), item("short", 60)], 100).unwrap();
        assert_eq!(picked.source, "src-short");
    }

    #[test]
    fn empty_evidence_yields_none() {
        assert!(best_quote(&[], 100).is_none());
    }

    #[test]
    fn ties_keep_first_item() {
        let picked = best_quote(&[item("a", 80), item("b", 150), item("c", 200)], 100).unwrap();
        assert_eq!(picked.source, "src-a");
    }

    #[test]
    fn scores_outside_window_can_go_negative() {
        assert_eq!(quote_score(&"a".repeat(50)), 100);
        assert_eq!(quote_score(&"a".repeat(201)), 24);
        assert_eq!(quote_score(&"a".repeat(10)), -15);
        assert_eq!(quote_score(&"a".repeat(400)), -175);
    }

    #[test]
    fn display_is_truncated_but_quote_kept() {
        let picked = best_quote(&[item("x", 150)], 100).unwrap();
        assert_eq!(picked.quote.chars().count(), 150);
        assert_eq!(picked.display.chars().count(), 101);
        assert!(picked.display.ends_with('…'));
        assert_eq!(truncate_for_display("short", 100), "short");
    }
}
