//! In-memory session store
//!
//! Keeps completed analysis sessions for later reference (scenario
//! approval, reviewer responses). Bounded: when the store is full the
//! oldest insertion is evicted. Replace with a database-backed store
//! for durable retention.

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use foresight_core::SessionStore;
use foresight_domain::{AnalysisSession, Result, SessionConfig};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Bounded in-memory implementation of [`SessionStore`].
pub struct InMemorySessionStore {
    sessions: DashMap<String, AnalysisSession>,
    // Insertion order, oldest first. Guarded separately from the map;
    // the two are reconciled under this lock on every save.
    order: Mutex<VecDeque<String>>,
    max_sessions: usize,
}

impl InMemorySessionStore {
    /// Create a store retaining at most `config.max_sessions` entries.
    pub fn new(config: &SessionConfig) -> Self {
        info!(max_sessions = config.max_sessions, "session store initialized");
        Self {
            sessions: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            max_sessions: config.max_sessions.max(1),
        }
    }

    /// Number of sessions currently retained.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_session(&self, session: AnalysisSession) -> Result<()> {
        let session_id = session.session_id.clone();

        let mut order = self.order.lock();
        if self.sessions.insert(session_id.clone(), session).is_none() {
            order.push_back(session_id.clone());
        }

        while order.len() > self.max_sessions {
            if let Some(evicted) = order.pop_front() {
                self.sessions.remove(&evicted);
                debug!(session_id = %evicted, "evicted oldest session");
            }
        }
        drop(order);

        debug!(session_id = %session_id, "stored session");
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<AnalysisSession>> {
        Ok(self.sessions.get(session_id).map(|entry| entry.value().clone()))
    }
}
