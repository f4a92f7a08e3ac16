//! # insight-rs — Facet Scoring, Diffusion and Guidance
//!
//! Scores qualitative facets of a person's state, smooths them across a
//! declared relationship graph, explains what drives the aggregate, and turns
//! the weakest facets into a time-bounded action plan.
//!
//! ## Design Principles
//!
//! 1. **Pure pipeline**: every stage is a function of its inputs; nothing
//!    accumulates across calls
//! 2. **Fixed-field DTOs**: `ScoreSet`, `Recommendation`, `PlanItem` cross all
//!    boundaries
//! 3. **Degrade, don't fail**: malformed config rows, empty neighbourhoods and
//!    zero divisors produce safe defaults
//! 4. **Deterministic**: ties always break alphabetically by facet name
//!
//! ## Quick Start
//!
//! ```rust
//! use insight_rs::{Insight, InsightConfig, RelationshipGraph, RuleTable, ScoreSet};
//!
//! # fn example() -> insight_rs::Result<()> {
//! let graph = RelationshipGraph::from_json(
//!     r#"{"nodes": ["Mind", "Heart", "Body"], "edges": [["Mind", "Heart"], ["Heart", "Body", 0.5]]}"#,
//! )?;
//! let insight = Insight::new(graph, RuleTable::defaults(), InsightConfig::default());
//!
//! let scores = ScoreSet::from([
//!     ("Mind".to_string(), 35.0),
//!     ("Heart".to_string(), 80.0),
//!     ("Body".to_string(), 65.0),
//! ]);
//! let report = insight.run(&scores);
//! println!("{} ({})", report.balance_index, report.band);
//! for item in &report.daily_plan.items {
//!     println!("{} min: {}", item.minutes, item.action);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Normalize + balance index | `scoring` |
//! | p-Laplacian smoothing | `graph::diffusion` |
//! | Degree centrality | `graph::centrality` |
//! | Contribution report | `explain` |
//! | Prioritize + recommend | `guidance::{priority, rules}` |
//! | Daily / weekly plans | `guidance::planner` |
//! | IEPI profile report | `scoring` |
//! | Sentiment / wearable advice | `guidance::advice` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod scoring;
pub mod graph;
pub mod explain;
pub mod guidance;
pub mod storage;
pub mod signals;
pub mod config;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    ScoreSet, CentralityMap, FacetWeights, BalanceBand, ContributionReport, ProfileReport,
    Recommendation, PlanItem, DailyPlan, DayPlan, WeeklyPlan, Weekday,
};

// ============================================================================
// Re-exports: Pipeline stages
// ============================================================================

pub use scoring::{
    balance_index, normalize_scores, validate_scores, weighted_mean, iepi_score, iepi_profile_report,
};
pub use graph::{
    RelationshipGraph, GraphBuilder, GraphConfig, EdgeSpec, DiffusionParams,
    degree_centrality, weighted_degree, laplacian_smoothing,
};
pub use explain::{AttributionParams, explain_summary, relative_contributions, top_factors};
pub use guidance::{
    PriorityParams, RuleConfig, RuleEntry, RuleTable, weakest_facets, recommend_for_scores,
    build_daily_plan, build_weekly_plan, SignalGuidance, signal_guidance,
};
pub use config::InsightConfig;

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{
    SessionStore, MemorySessionStore, SessionId, SessionRecord, StoredSession,
    StoredPlan, PlanKind,
};

// ============================================================================
// Top-level pipeline handle
// ============================================================================

/// The primary entry point. Owns the relationship graph, the merged rule
/// table and the configuration, and runs the full pipeline over one score
/// set at a time.
///
/// Centrality is computed once at construction; the graph cannot change
/// afterwards.
#[derive(Debug, Clone)]
pub struct Insight {
    graph: RelationshipGraph,
    rules: RuleTable,
    config: InsightConfig,
    centrality: CentralityMap,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub balance_index: f64,
    pub band: BalanceBand,
    pub normalized: ScoreSet,
    pub smoothed: ScoreSet,
    pub contributions: ContributionReport,
    pub recommendations: Vec<Recommendation>,
    pub daily_plan: DailyPlan,
    pub weekly_plan: WeeklyPlan,
}

impl InsightReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Insight {
    pub fn new(graph: RelationshipGraph, rules: RuleTable, config: InsightConfig) -> Self {
        let centrality = degree_centrality(&graph);
        Self { graph, rules, config, centrality }
    }

    /// Build from raw graph and rule configuration documents.
    pub fn from_configs(graph: &GraphConfig, rules: &RuleConfig, config: InsightConfig) -> Self {
        Self::new(RelationshipGraph::from_config(graph), RuleTable::with_config(rules), config)
    }

    /// Run the whole pipeline.
    ///
    /// Attribution explains the smoothed scores. Facets are ranked on the
    /// smoothed scores unless `prioritize_smoothed` is off.
    pub fn run(&self, scores: &ScoreSet) -> InsightReport {
        let cfg = &self.config;
        let (index, normalized) = balance_index(scores, cfg.weights.as_ref());
        let smoothed = laplacian_smoothing(&self.graph, &normalized, &cfg.diffusion);
        let contributions = explain_summary(&smoothed, &cfg.attribution);

        let ranked_on = if cfg.prioritize_smoothed { &smoothed } else { &normalized };
        let recommendations =
            recommend_for_scores(ranked_on, &self.rules, Some(&self.centrality), &cfg.priority);
        let daily_plan = build_daily_plan(&recommendations, cfg.daily_minutes);
        let weekly_plan = build_weekly_plan(&recommendations);

        debug!(
            facets = scores.len(),
            balance_index = index,
            recommendations = recommendations.len(),
            daily_minutes = daily_plan.total_minutes(),
            "insight pipeline run"
        );

        InsightReport {
            balance_index: index,
            band: BalanceBand::from_index(index),
            normalized,
            smoothed,
            contributions,
            recommendations,
            daily_plan,
            weekly_plan,
        }
    }

    /// Hand a report to a session store: the session, its recommendations,
    /// and both plans.
    pub fn persist<S: SessionStore + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
        report: &InsightReport,
    ) -> Result<SessionId> {
        let record = SessionRecord::new(user_id, report.balance_index, report.normalized.clone());
        let id = store.save_session(record)?;
        store.save_recommendations(id, &report.recommendations)?;
        store.save_plan(id, StoredPlan::Daily(report.daily_plan.clone()))?;
        store.save_plan(id, StoredPlan::Weekly(report.weekly_plan.clone()))?;
        debug!(session = %id, user_id, "persisted insight session");
        Ok(id)
    }

    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Degree centrality of the graph, computed at construction.
    pub fn centrality(&self) -> &CentralityMap {
        &self.centrality
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
