//! # Facet Model
//!
//! Value types that cross every boundary: scoring ↔ graph ↔ guidance ↔ storage.
//!
//! Design rule: this module is pure data. No I/O, no state, no logging.

pub mod score;
pub mod report;
pub mod plan;

pub use score::{
    ScoreSet, CentralityMap, FacetWeights, clamp_score, default_scores,
    SCORE_MIN, SCORE_MAX, DEFAULT_FACETS, DEFAULT_FILL, IEPI_FACETS,
};
pub use report::{BalanceBand, ContributionReport, ProfileReport};
pub use plan::{Recommendation, PlanItem, DailyPlan, DayPlan, WeeklyPlan, Weekday, TipList};
