//! Recommendation Generator — rule table and tip attachment.
//!
//! The rule table has two layers: built-in defaults, then tips from external
//! configuration appended after them. Exact duplicate tips within a facet are
//! suppressed. The merged table is built once and passed explicitly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{CentralityMap, Recommendation, ScoreSet, TipList};
use crate::scoring::round2;
use crate::{Error, Result};
use super::priority::{PriorityParams, weakest_facets};

/// Tip given for a facet no rule mentions.
pub const FALLBACK_TIP: &str = "Tip: Apply a short focused practice in this facet.";

/// Maximum tips attached to one recommendation.
const MAX_TIPS: usize = 3;

// ============================================================================
// Rule configuration
// ============================================================================

/// One `{facet, tip}` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub facet: String,
    pub tip: String,
}

impl RuleEntry {
    pub fn new(facet: impl Into<String>, tip: impl Into<String>) -> Self {
        Self { facet: facet.into(), tip: tip.into() }
    }

    /// Parse one raw rule row. Rows that are not objects, or whose trimmed
    /// facet or tip is missing or blank, yield `None`.
    pub fn from_row(row: &serde_json::Value) -> Option<Self> {
        let field = |name: &str| {
            row.get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        Some(Self::new(field("facet")?, field("tip")?))
    }
}

/// External rule configuration: `{"rules": [{"facet": …, "tip": …}, …]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub rules: Vec<serde_json::Value>,
}

impl RuleConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("rule config: {e}")))
    }

    /// Well-formed entries, in document order.
    pub fn entries(&self) -> Vec<RuleEntry> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let entry = RuleEntry::from_row(row);
                if entry.is_none() {
                    debug!(row = i, "skipping malformed rule row");
                }
                entry
            })
            .collect()
    }
}

// ============================================================================
// RuleTable
// ============================================================================

/// Facet → ordered tips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    by_facet: BTreeMap<String, Vec<String>>,
}

impl RuleTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in tips for the default facets.
    pub fn defaults() -> Self {
        let mut table = Self::empty();
        let defaults: [(&str, [&str; 2]); 6] = [
            ("Mind", [
                "Mindful breathing for 5 minutes, then write 3 lines about a thought that worries you.",
                "Silence distractions (phone, notifications) for 20 minutes, then do deep focused work.",
            ]),
            ("Heart", [
                "Compassionate contact: send a note of appreciation to someone close.",
                "Gratitude practice: write down two things you are grateful for today.",
            ]),
            ("Body", [
                "A light 10–15 minute walk or some simple stretching.",
                "Drink enough water and cut down on sugar today.",
            ]),
            ("Spirit", [
                "A short 7-minute remembrance or meditation with a clear intention.",
                "Read an inspiring passage and put one of its meanings into practice.",
            ]),
            ("Relations", [
                "Make a short call to someone you owe some emotional attention.",
                "Listen actively without interrupting for 5 minutes.",
            ]),
            ("Work", [
                "Pick a single task and finish it completely (one 25-minute Pomodoro).",
                "Write a list of 3 realistic priorities for today.",
            ]),
        ];
        for (facet, tips) in defaults {
            for tip in tips {
                table.add(facet, tip);
            }
        }
        table
    }

    /// Append a tip unless the facet already has it. Returns whether it was added.
    pub fn add(&mut self, facet: impl Into<String>, tip: impl Into<String>) -> bool {
        let tips = self.by_facet.entry(facet.into()).or_default();
        let tip = tip.into();
        if tips.contains(&tip) {
            return false;
        }
        tips.push(tip);
        true
    }

    /// Layer `entries` on top of this table.
    pub fn merge(mut self, entries: impl IntoIterator<Item = RuleEntry>) -> Self {
        for entry in entries {
            self.add(entry.facet, entry.tip);
        }
        self
    }

    /// Defaults merged with an external configuration.
    pub fn with_config(config: &RuleConfig) -> Self {
        Self::defaults().merge(config.entries())
    }

    pub fn tips(&self, facet: &str) -> &[String] {
        self.by_facet.get(facet).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn facets(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_facet.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_facet.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Up to three tips for `facet`, or the fallback tip.
    pub fn tips_for(&self, facet: &str) -> TipList {
        let tips = self.tips(facet);
        if tips.is_empty() {
            return TipList::from_iter([FALLBACK_TIP.to_string()]);
        }
        tips.iter().take(MAX_TIPS).cloned().collect()
    }
}

/// Recommendations for the weakest facets of `scores`, highest priority first.
pub fn recommend_for_scores(
    scores: &ScoreSet,
    rules: &RuleTable,
    centrality: Option<&CentralityMap>,
    params: &PriorityParams,
) -> Vec<Recommendation> {
    weakest_facets(scores, centrality, params)
        .into_iter()
        .map(|(facet, priority)| Recommendation {
            tips: rules.tips_for(&facet),
            priority: round2(priority),
            facet,
        })
        .collect()
}
