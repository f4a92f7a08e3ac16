//! # Session Store Trait
//!
//! The contract between the pipeline and whatever persists its results.
//! Persistence is owned by the caller; the core only produces values and
//! hands them to a `SessionStore`.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemorySessionStore` | `memory` | In-memory, for tests and embedding |

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{DailyPlan, Recommendation, ScoreSet, WeeklyPlan};
use crate::Result;

pub use memory::MemorySessionStore;

/// Opaque session identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the caller hands over when a session is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub balance_index: f64,
    pub scores: ScoreSet,
}

impl SessionRecord {
    pub fn new(user_id: impl Into<String>, balance_index: f64, scores: ScoreSet) -> Self {
        Self { user_id: user_id.into(), balance_index, scores }
    }
}

/// A saved session as read back from a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub record: SessionRecord,
}

/// Which plan of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    Daily,
    Weekly,
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanKind::Daily => write!(f, "daily"),
            PlanKind::Weekly => write!(f, "weekly"),
        }
    }
}

/// A daily or weekly plan attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "plan")]
pub enum StoredPlan {
    Daily(DailyPlan),
    Weekly(WeeklyPlan),
}

impl StoredPlan {
    pub fn kind(&self) -> PlanKind {
        match self {
            StoredPlan::Daily(_) => PlanKind::Daily,
            StoredPlan::Weekly(_) => PlanKind::Weekly,
        }
    }
}

// ============================================================================
// SessionStore Trait
// ============================================================================

/// Persistence contract for pipeline results.
///
/// Writes against an unknown session fail with `Error::NotFound`. Reads of
/// an unknown session return `None` or an empty list. Stores backed by real
/// I/O report their own failures as `Error::Storage`.
pub trait SessionStore: Send + Sync {
    /// Save a session and assign it an id.
    fn save_session(&self, record: SessionRecord) -> Result<SessionId>;

    /// Attach recommendations to a session, appending to any saved earlier.
    fn save_recommendations(&self, id: SessionId, recs: &[Recommendation]) -> Result<()>;

    /// Attach a plan, replacing an earlier plan of the same kind.
    fn save_plan(&self, id: SessionId, plan: StoredPlan) -> Result<()>;

    fn get_session(&self, id: SessionId) -> Result<Option<StoredSession>>;

    /// Most recent sessions first.
    fn list_sessions(&self, limit: usize) -> Result<Vec<StoredSession>>;

    fn get_recommendations(&self, id: SessionId) -> Result<Vec<Recommendation>>;

    fn get_plan(&self, id: SessionId, kind: PlanKind) -> Result<Option<StoredPlan>>;

    /// Delete a session with its recommendations and plans.
    /// Returns true if it existed.
    fn delete_session(&self, id: SessionId) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_kind() {
        assert_eq!(StoredPlan::Daily(DailyPlan::default()).kind(), PlanKind::Daily);
        assert_eq!(StoredPlan::Weekly(WeeklyPlan::empty()).kind(), PlanKind::Weekly);
        assert_eq!(PlanKind::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_stored_plan_json_shape() {
        let json = serde_json::to_value(StoredPlan::Daily(DailyPlan::default())).unwrap();
        assert_eq!(json["type"], "Daily");
        assert!(json["plan"]["items"].as_array().unwrap().is_empty());
    }
}
