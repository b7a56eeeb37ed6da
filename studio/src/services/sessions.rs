//! In-memory session store.
//!
//! Sessions live until closed, evicted for idleness, or pushed out by the
//! capacity bound (least recently seen first).

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use qr_generator::SessionState;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct SessionEntry {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionStore {
    entries: HashMap<Uuid, SessionEntry>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a new session. Returns its id and the ids pushed out to make room.
    pub fn insert(&mut self, state: SessionState, now: DateTime<Utc>) -> (Uuid, Vec<Uuid>) {
        let mut evicted = Vec::new();
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!(session = %oldest, "Evicted least recently used session");
            evicted.push(oldest);
        }

        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            SessionEntry {
                state,
                last_seen: now,
            },
        );
        (id, evicted)
    }

    /// Snapshot a session and mark it as seen.
    pub fn get(&mut self, id: Uuid, now: DateTime<Utc>) -> Option<SessionState> {
        let entry = self.entries.get_mut(&id)?;
        entry.last_seen = now;
        Some(entry.state.clone())
    }

    /// Mutate a session in place and return the updated snapshot.
    pub fn update<F>(&mut self, id: Uuid, now: DateTime<Utc>, f: F) -> Option<SessionState>
    where
        F: FnOnce(&mut SessionState),
    {
        let entry = self.entries.get_mut(&id)?;
        f(&mut entry.state);
        entry.last_seen = now;
        Some(entry.state.clone())
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drop sessions not seen for longer than `max_idle`. Returns their ids.
    pub fn evict_idle(&mut self, max_idle: TimeDelta, now: DateTime<Utc>) -> Vec<Uuid> {
        let stale: Vec<Uuid> = self
            .entries
            .iter()
            .filter(|(_, e)| now - e.last_seen > max_idle)
            .map(|(id, _)| *id)
            .collect();
        for id in &stale {
            self.entries.remove(id);
        }
        stale
    }
}
