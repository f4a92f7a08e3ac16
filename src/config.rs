//! Pipeline configuration.
//!
//! Every field has a default, so a config document only needs to name what it
//! changes. Reading the document from disk is the caller's job.

use serde::{Deserialize, Serialize};

use crate::explain::AttributionParams;
use crate::graph::DiffusionParams;
use crate::guidance::{PriorityParams, DEFAULT_DAILY_MINUTES};
use crate::model::FacetWeights;
use crate::{Error, Result};

/// Tunable parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Weights of the balance index. `None` means uniform.
    pub weights: Option<FacetWeights>,
    pub diffusion: DiffusionParams,
    pub attribution: AttributionParams,
    pub priority: PriorityParams,
    /// Daily time budget in minutes.
    pub daily_minutes: u32,
    /// Rank facets on the smoothed scores instead of the normalized ones.
    pub prioritize_smoothed: bool,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            weights: None,
            diffusion: DiffusionParams::default(),
            attribution: AttributionParams::default(),
            priority: PriorityParams::default(),
            daily_minutes: DEFAULT_DAILY_MINUTES,
            prioritize_smoothed: true,
        }
    }
}

impl InsightConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("insight config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(InsightConfig::from_json("{}").unwrap(), InsightConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = InsightConfig::from_json(
            r#"{"daily_minutes": 45, "diffusion": {"alpha": 0.2}, "weights": {"Mind": 2.0}}"#,
        )
        .unwrap();
        assert_eq!(cfg.daily_minutes, 45);
        assert_eq!(cfg.diffusion.alpha, 0.2);
        assert_eq!(cfg.diffusion.iterations, 5);
        assert_eq!(cfg.weights.unwrap().get("Mind"), 2.0);
        assert_eq!(cfg.priority.top_k, 3);
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        assert!(matches!(InsightConfig::from_json(r#"{"daily_minutes": "lots"}"#), Err(Error::Config(_))));
    }
}
