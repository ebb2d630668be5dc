use crate::evidence::model::Sentiment;
use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub buying_stage: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProofSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub source_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lifecycle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sentiment: Option<String>,
}

impl ConversationSignal {
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
            .as_deref()
            .map(Sentiment::from_label)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSignal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub condition: Option<String>,
}

/// A selected insight handed to the classifier, discriminated by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Signal {
    Trigger(TriggerSignal),
    Proof(ProofSignal),
    Trend(TrendSignal),
    Conversation(ConversationSignal),
    Competitor(CompetitorSignal),
    Local(LocalSignal),
    Weather(WeatherSignal),
}

impl Signal {
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::Trigger(_) => "trigger",
            Signal::Proof(_) => "proof",
            Signal::Trend(_) => "trend",
            Signal::Conversation(_) => "conversation",
            Signal::Competitor(_) => "competitor",
            Signal::Local(_) => "local",
            Signal::Weather(_) => "weather",
        }
    }

    /// Human-readable name used in reason strings.
    pub fn label(&self) -> Option<&str> {
        let label = match self {
            Signal::Trigger(s) => s.title.as_deref(),
            Signal::Proof(s) => s.title.as_deref(),
            Signal::Trend(s) => s.title.as_deref(),
            Signal::Conversation(s) => s.title.as_deref(),
            Signal::Competitor(s) => s.name.as_deref(),
            Signal::Local(s) => s.title.as_deref().or(s.location.as_deref()),
            Signal::Weather(s) => s.condition.as_deref(),
        };
        label.map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Decodes each value independently; entries with an unknown `type` or a
/// malformed payload are skipped.
pub fn parse_signals(values: &[Value]) -> Vec<Signal> {
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| match serde_json::from_value::<Signal>(v.clone()) {
            Ok(signal) => Some(signal),
            Err(e) => {
                warn!(index = idx, error = %e, "skipping undecodable signal");
                None
            }
        })
        .collect()
}
