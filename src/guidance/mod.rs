//! # Guidance
//!
//! Turns scores into action: rank the facets that most need attention,
//! attach tips from the rule table, and allocate time into daily and weekly
//! plans.
//!
//! ```text
//! ScoreSet + CentralityMap ─► priority::weakest_facets
//!                          ─► rules::recommend_for_scores (RuleTable)
//!                          ─► planner::{build_daily_plan, build_weekly_plan}
//!
//! SentimentReading + HealthIndices ─► advice::signal_guidance
//! ```

pub mod priority;
pub mod rules;
pub mod planner;
pub mod advice;

pub use priority::{PriorityParams, weakest_facets};
pub use rules::{RuleConfig, RuleEntry, RuleTable, recommend_for_scores, FALLBACK_TIP};
pub use planner::{
    build_daily_plan, build_weekly_plan, DEFAULT_DAILY_MINUTES, WEEKLY_SESSION_MINUTES,
    WEEKLY_SESSIONS_PER_RECOMMENDATION,
};
pub use advice::{SignalGuidance, signal_guidance};
