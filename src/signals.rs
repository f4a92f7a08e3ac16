//! Upstream score producers.
//!
//! Text sentiment, audio descriptors and wearable health indices are computed
//! by external collaborators. This module only fixes the shape of their
//! outputs and how each becomes a `ScoreSet` for the normalizer and the
//! attribution engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ScoreSet, clamp_score};

/// Anything that yields facet scores on the 0–100 scale.
pub trait ScoreSource {
    fn facet_scores(&self) -> ScoreSet;
}

/// Combine several sources. A facet reported twice keeps the later value.
pub fn merge_sources(sources: &[&dyn ScoreSource]) -> ScoreSet {
    let mut merged = ScoreSet::new();
    for source in sources {
        merged.extend(source.facet_scores());
    }
    merged
}

// ============================================================================
// Text sentiment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Output of the sentiment collaborator: a score in `[-1, 1]` and a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub score: f64,
    pub label: SentimentLabel,
}

impl SentimentReading {
    pub const FACET: &'static str = "Sentiment";

    /// Label a raw score: above `0.1` positive, below `-0.1` negative.
    pub fn from_score(score: f64) -> Self {
        let label = if score > 0.1 {
            SentimentLabel::Positive
        } else if score < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Self { score, label }
    }
}

impl ScoreSource for SentimentReading {
    /// `[-1, 1]` mapped linearly onto `[0, 100]`.
    fn facet_scores(&self) -> ScoreSet {
        let scaled = clamp_score((self.score.clamp(-1.0, 1.0) + 1.0) * 50.0);
        ScoreSet::from([(Self::FACET.to_string(), scaled)])
    }
}

// ============================================================================
// Wearable health indices
// ============================================================================

/// Normalized health sub-indices from the wearable collaborator, each on
/// `0–100`. Absent signals are `None` and produce no facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthIndices {
    pub heart_health_index: Option<f64>,
    pub relaxation_index: Option<f64>,
    pub sleep_score: Option<f64>,
    pub activity_score: Option<f64>,
}

impl HealthIndices {
    /// Mean of the present sub-indices.
    pub fn overall(&self) -> Option<f64> {
        let present: Vec<f64> = self.components().into_iter().filter_map(|(_, v)| v).collect();
        if present.is_empty() {
            None
        } else {
            Some(present.iter().sum::<f64>() / present.len() as f64)
        }
    }

    fn components(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("HeartHealth", self.heart_health_index),
            ("Relaxation", self.relaxation_index),
            ("Sleep", self.sleep_score),
            ("Activity", self.activity_score),
        ]
    }
}

impl ScoreSource for HealthIndices {
    fn facet_scores(&self) -> ScoreSet {
        self.components()
            .into_iter()
            .filter_map(|(facet, v)| v.map(|v| (facet.to_string(), clamp_score(v))))
            .collect()
    }
}

// ============================================================================
// Audio descriptors
// ============================================================================

/// Named audio descriptors, already scaled to `0–100` by the collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioDescriptors(pub BTreeMap<String, f64>);

impl ScoreSource for AudioDescriptors {
    fn facet_scores(&self) -> ScoreSet {
        self.0.iter().map(|(k, &v)| (k.clone(), clamp_score(v))).collect()
    }
}
