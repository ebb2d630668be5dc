use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

pub const ENGINE_CONFIG_SCHEMA_V1: &str = "engine_config_v1";

/// How per-evidence confidences collapse into one trigger-level value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceAggregation {
    #[default]
    Mean,
    Max,
    /// `mean * n / (n + 1)`
    CountWeightedMean,
}

impl ConfidenceAggregation {
    pub fn aggregate(self, confidences: &[f64]) -> f64 {
        if confidences.is_empty() {
            return 0.0;
        }
        let n = confidences.len() as f64;
        let mean = confidences.iter().sum::<f64>() / n;
        let value = match self {
            ConfidenceAggregation::Mean => mean,
            ConfidenceAggregation::Max => confidences.iter().copied().fold(0.0, f64::max),
            ConfidenceAggregation::CountWeightedMean => mean * n / (n + 1.0),
        };
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub schema_version: String,
    pub confidence_aggregation: ConfidenceAggregation,
    pub default_confidence: f64,
    pub recency_sentinel_days: u32,
    pub quote_display_chars: usize,
}

impl EngineConfig {
    /// The profile shipped with the crate.
    pub fn default_v1() -> CoreResult<Self> {
        Self::from_json(include_str!("engine_config_v1.json"))
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.schema_version != ENGINE_CONFIG_SCHEMA_V1 {
            return Err(CoreError::InvalidConfig(format!(
                "unsupported schema_version {}",
                self.schema_version
            )));
        }
        if !self.default_confidence.is_finite() || !(0.0..=1.0).contains(&self.default_confidence)
        {
            return Err(CoreError::InvalidConfig(
                "default_confidence must be within [0,1]".to_string(),
            ));
        }
        if self.recency_sentinel_days == 0 {
            return Err(CoreError::InvalidConfig(
                "recency_sentinel_days must be positive".to_string(),
            ));
        }
        if self.quote_display_chars == 0 {
            return Err(CoreError::InvalidConfig(
                "quote_display_chars must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            schema_version: ENGINE_CONFIG_SCHEMA_V1.to_string(),
            confidence_aggregation: ConfidenceAggregation::Mean,
            default_confidence: 0.5,
            recency_sentinel_days: 999,
            quote_display_chars: 100,
        }
    }
}
