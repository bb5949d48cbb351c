//! In-process preview store.
//!
//! The only shared mutable state in the crate: a mutex-guarded map of
//! preview id → pending entry with a fixed TTL. Constructed once at process
//! start and injected wherever it is needed (router state, render path);
//! never reached through a global.
//!
//! The store is per-process. Behind a load balancer a preview created on
//! one instance is invisible to the others; previews are single-editor and
//! short-lived, so this is a documented limitation rather than something
//! the store tries to hide.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::payload::PreviewPayload;
use crate::types::PreviewId;

/// How long a preview entry (and its cookie) lives.
///
/// Single named value: the store computes `expires_at` from it and the
/// middleware derives the cookie `Max-Age` from [`PreviewStore::ttl`].
pub const PREVIEW_TTL: Duration = Duration::from_secs(300);

/// A pending preview as visible to readers.
#[derive(Debug, Clone)]
pub struct PreviewEntry {
    pub id: PreviewId,
    /// Site-relative path the preview is scoped to. Used as the bridge
    /// redirect target and for render-time applicability, never for
    /// authorization.
    pub redirect_path: String,
    pub payload: PreviewPayload,
    pub expires_at: Instant,
}

impl PreviewEntry {
    /// Whether this preview applies to the page identified by `page_path`.
    ///
    /// Exact path equality, or the generic root with a root-applicable
    /// payload kind. No substring matching, so a preview scoped to
    /// `/pref/tokyo` can not leak onto `/pref/tokyo/clubs`.
    #[must_use]
    pub fn applies_to(&self, page_path: &str) -> bool {
        if self.redirect_path == page_path {
            return true;
        }
        self.redirect_path == "/" && self.payload.kind().root_applicable()
    }
}

/// Keyed, TTL-bounded store of pending previews.
///
/// Cheap to clone (shared handle). Writes prune expired entries as they go;
/// reads check expiry themselves, so an entry past its TTL reports absent
/// even before any prune has run.
#[derive(Debug, Clone)]
pub struct PreviewStore {
    inner: Arc<Mutex<HashMap<PreviewId, PreviewEntry>>>,
    ttl: Duration,
}

impl Default for PreviewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewStore {
    /// Store with the standard [`PREVIEW_TTL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(PREVIEW_TTL)
    }

    /// Store with a custom TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Entry lifetime, shared with the cookie `Max-Age`.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Inserts or replaces the entry for `id`; the last write wins.
    ///
    /// Expired entries are pruned on every write, amortizing cleanup into
    /// the (low-traffic) create path instead of a background sweep.
    pub fn set(
        &self,
        id: PreviewId,
        redirect_path: String,
        payload: PreviewPayload,
    ) -> PreviewEntry {
        let entry = PreviewEntry {
            id: id.clone(),
            redirect_path,
            payload,
            expires_at: Instant::now() + self.ttl,
        };
        let mut map = self.lock();
        let now = Instant::now();
        map.retain(|_, existing| existing.expires_at > now);
        map.insert(id, entry.clone());
        entry
    }

    /// Looks up a live entry. Side-effect-free, so a render pipeline that
    /// fetches the same data twice within one navigation sees the preview
    /// both times.
    #[must_use]
    pub fn get(&self, id: &PreviewId) -> Option<PreviewEntry> {
        let map = self.lock();
        map.get(id)
            .filter(|entry| entry.expires_at > Instant::now())
            .cloned()
    }

    /// Like [`get`](Self::get), but removes the entry afterward, for call
    /// sites that want strict one-time semantics.
    pub fn consume(&self, id: &PreviewId) -> Option<PreviewEntry> {
        let mut map = self.lock();
        map.remove(id)
            .filter(|entry| entry.expires_at > Instant::now())
    }

    /// Number of entries currently held, expired ones included until the
    /// next prune.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PreviewId, PreviewEntry>> {
        // A poisoned lock only means another request panicked mid-operation;
        // the map itself is still a valid map of entries.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
