//! In-memory session store.
//!
//! Reference implementation of `SessionStore`, using HashMaps behind
//! `parking_lot::RwLock`s.
//!
//! ## Limitations
//!
//! - **No durability**: everything is lost on drop.
//! - **Per-collection locks**: a session and its plans are written under
//!   separate locks, so concurrent writers can observe a session before its
//!   plans land.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::model::Recommendation;
use crate::{Error, Result};
use super::{PlanKind, SessionId, SessionRecord, SessionStore, StoredPlan, StoredSession};

/// In-memory session storage. Cloning shares the underlying maps.
#[derive(Clone)]
pub struct MemorySessionStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    recommendations: RwLock<HashMap<SessionId, Vec<Recommendation>>>,
    plans: RwLock<HashMap<(SessionId, PlanKind), StoredPlan>>,
    next_id: AtomicU64,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                sessions: RwLock::new(HashMap::new()),
                recommendations: RwLock::new(HashMap::new()),
                plans: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn session_count(&self) -> usize {
        self.inner.sessions.read().len()
    }

    fn ensure_exists(&self, id: SessionId) -> Result<()> {
        if self.inner.sessions.read().contains_key(&id) {
            Ok(())
        } else {
            Err(Error::NotFound(format!("Session {id}")))
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn save_session(&self, record: SessionRecord) -> Result<SessionId> {
        let id = SessionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let session = StoredSession { id, created_at: Utc::now(), record };
        self.inner.sessions.write().insert(id, session);
        Ok(id)
    }

    fn save_recommendations(&self, id: SessionId, recs: &[Recommendation]) -> Result<()> {
        self.ensure_exists(id)?;
        self.inner
            .recommendations
            .write()
            .entry(id)
            .or_default()
            .extend_from_slice(recs);
        Ok(())
    }

    fn save_plan(&self, id: SessionId, plan: StoredPlan) -> Result<()> {
        self.ensure_exists(id)?;
        self.inner.plans.write().insert((id, plan.kind()), plan);
        Ok(())
    }

    fn get_session(&self, id: SessionId) -> Result<Option<StoredSession>> {
        Ok(self.inner.sessions.read().get(&id).cloned())
    }

    fn list_sessions(&self, limit: usize) -> Result<Vec<StoredSession>> {
        let mut sessions: Vec<StoredSession> = self.inner.sessions.read().values().cloned().collect();
        // Ids are monotonic, so they break timestamp ties in creation order.
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sessions.truncate(limit);
        Ok(sessions)
    }

    fn get_recommendations(&self, id: SessionId) -> Result<Vec<Recommendation>> {
        Ok(self.inner.recommendations.read().get(&id).cloned().unwrap_or_default())
    }

    fn get_plan(&self, id: SessionId, kind: PlanKind) -> Result<Option<StoredPlan>> {
        Ok(self.inner.plans.read().get(&(id, kind)).cloned())
    }

    fn delete_session(&self, id: SessionId) -> Result<bool> {
        let removed = self.inner.sessions.write().remove(&id);
        self.inner.recommendations.write().remove(&id);
        self.inner.plans.write().retain(|(sid, _), _| *sid != id);
        Ok(removed.is_some())
    }
}
