use crate::domain::DomainChecker;
use crate::error::{NameForgeError, Result};
use crate::llm::NameGenerator;
use crate::orchestrator::Orchestrator;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Sessions untouched for this long are dropped on the next `create`
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on stored sessions before the least recently used idle one goes
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

struct SessionEntry {
    orchestrator: Orchestrator,
    last_seen: Instant,
}

/// In-memory registry of server-side sessions.
///
/// Sessions with a run in flight are never evicted.
pub struct SessionStore {
    generator: Arc<NameGenerator>,
    checker: Arc<DomainChecker>,
    idle_ttl: Duration,
    max_sessions: usize,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(generator: Arc<NameGenerator>, checker: Arc<DomainChecker>) -> Self {
        Self::with_limits(generator, checker, DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }

    pub fn with_limits(
        generator: Arc<NameGenerator>,
        checker: Arc<DomainChecker>,
        idle_ttl: Duration,
        max_sessions: usize,
    ) -> Self {
        Self {
            generator,
            checker,
            idle_ttl,
            max_sessions: max_sessions.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a fresh idle session, pruning stale ones first
    pub fn create(&self) -> (Uuid, Orchestrator) {
        let id = Uuid::new_v4();
        let orchestrator = Orchestrator::new(self.generator.clone(), self.checker.clone());

        let mut sessions = self.sessions.write();
        self.prune(&mut sessions);
        sessions.insert(
            id,
            SessionEntry {
                orchestrator: orchestrator.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(session = %id, total = sessions.len(), "Session created");

        (id, orchestrator)
    }

    pub fn get(&self, id: &Uuid) -> Result<Orchestrator> {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| NameForgeError::session_not_found(id))?;
        entry.last_seen = Instant::now();
        Ok(entry.orchestrator.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, SessionEntry>) {
        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry.last_seen.elapsed() < self.idle_ttl || entry.orchestrator.is_generating()
        });

        // Make room for the new session
        while sessions.len() >= self.max_sessions {
            let oldest_idle = sessions
                .iter()
                .filter(|(_, entry)| !entry.orchestrator.is_generating())
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest_idle {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted = evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
    }
}
