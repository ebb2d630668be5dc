use crate::lenient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Lenient parse used for upstream labels; unknown labels are neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "+" => Sentiment::Positive,
            "negative" | "neg" | "-" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// One verbatim quote plus its source metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub id: String,
    pub quote: String,
    pub source: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub sentiment: Sentiment,
    /// Always within [0,1].
    pub confidence: f64,
}

/// Upstream record as delivered by the extraction pipeline. Every field is
/// optional and a wrongly-typed value decodes as missing; `confidence` and
/// `timestamp` may be numbers or strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEvidence {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub quote: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub author: Option<String>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub confidence: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_time_sensitive: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub journey_stage: Option<String>,
}
