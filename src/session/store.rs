//! Board Session Store
//!
//! Ephemeral per-game records keyed by high-entropy session ids. The store
//! replaces the original's module-global map with an injected abstraction;
//! the in-memory implementation backs a single instance, and horizontal
//! scaling would swap in an externally shared implementation behind the
//! same trait.
//!
//! Calls for different ids run fully in parallel. Calls for the same id
//! are serialized through the per-entry mutex, which callers hold across
//! their whole read-modify-write sequence so the monotonic `score_prev`
//! baseline never interleaves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::board::Params;

/// Per-game session record. Exclusively owned by the store; the simulator,
/// scorer and guard never see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSession {
    /// Session id (opaque high-entropy token).
    pub id: String,
    /// Owning player address. Matched case-insensitively.
    pub player: String,
    /// Fixed board parameters.
    pub params: Params,
    /// Seed the board derives from.
    pub seed: String,
    /// Fairness commitment over (params, seed, layout).
    pub commitment_hash: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Monotonic non-decreasing score baseline.
    pub score_prev: u32,
    /// Safe cells open at the last accepted validation.
    pub last_safe_opens: u32,
    /// Total clicks at the last accepted validation.
    pub last_total_clicks: u32,
    /// Claimed duration at the last accepted validation.
    pub last_duration_ms: u64,
}

/// Partial update merged into an existing record.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    /// New score baseline, if changed.
    pub score_prev: Option<u32>,
    /// New safe-open counter, if changed.
    pub last_safe_opens: Option<u32>,
    /// New click counter, if changed.
    pub last_total_clicks: Option<u32>,
    /// New claimed duration, if changed.
    pub last_duration_ms: Option<u64>,
}

impl SessionPatch {
    /// Merge the set fields into `record`.
    pub fn apply(&self, record: &mut BoardSession) {
        if let Some(v) = self.score_prev {
            record.score_prev = v;
        }
        if let Some(v) = self.last_safe_opens {
            record.last_safe_opens = v;
        }
        if let Some(v) = self.last_total_clicks {
            record.last_total_clicks = v;
        }
        if let Some(v) = self.last_duration_ms {
            record.last_duration_ms = v;
        }
    }
}

/// A session entry shared between the map and in-flight validation calls.
pub type SharedSession = Arc<Mutex<BoardSession>>;

/// Lock a session entry, recovering the record from a poisoned lock.
/// A panic mid-validation leaves the record itself consistent because
/// mutation only happens after every check has passed.
pub(crate) fn lock_session(entry: &SharedSession) -> MutexGuard<'_, BoardSession> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Session storage seam injected into the validation entry points.
pub trait SessionStore: Send + Sync {
    /// Establish a new session. Returns the shared entry.
    fn create(&self, record: BoardSession) -> SharedSession;

    /// Look up a session by id.
    fn get(&self, id: &str) -> Option<SharedSession>;

    /// Merge `patch` into an existing record. No-op (returning false)
    /// when the id is absent.
    fn update_progress(&self, id: &str, patch: SessionPatch) -> bool;

    /// Remove a session on terminal finish. Returns whether it existed.
    fn delete(&self, id: &str) -> bool;

    /// Number of live sessions.
    fn len(&self) -> usize;

    /// Whether the store holds no sessions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store for a single server instance.
pub struct MemoryStore {
    boards: RwLock<HashMap<String, SharedSession>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { boards: RwLock::new(HashMap::new()) }
    }

    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, SharedSession>> {
        self.boards.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, SharedSession>> {
        self.boards.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn create(&self, record: BoardSession) -> SharedSession {
        let entry = Arc::new(Mutex::new(record));
        let id = lock_session(&entry).id.clone();
        self.write_map().insert(id, Arc::clone(&entry));
        entry
    }

    fn get(&self, id: &str) -> Option<SharedSession> {
        self.read_map().get(id).cloned()
    }

    fn update_progress(&self, id: &str, patch: SessionPatch) -> bool {
        // Clone the entry out before locking it: the map guard must never
        // be held while waiting on an entry lock (callers hold entry
        // locks while touching the map).
        let entry = self.read_map().get(id).cloned();
        match entry {
            Some(entry) => {
                patch.apply(&mut lock_session(&entry));
                true
            }
            None => false,
        }
    }

    fn delete(&self, id: &str) -> bool {
        self.write_map().remove(id).is_some()
    }

    fn len(&self) -> usize {
        self.read_map().len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
