//! In-memory TTL cache for upstream payloads
//!
//! Holds at most one bootstrap payload and one fixture list. Entries older
//! than the TTL are treated as absent; `invalidate` drops both slots.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::CacheConfig;
use crate::models::{BootstrapPayload, RawFixture};

struct Entry<T> {
    value: Arc<T>,
    stored_at: Instant,
}

struct Slot<T> {
    entry: RwLock<Option<Entry<T>>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self { entry: RwLock::new(None) }
    }

    fn get(&self, ttl: Duration) -> Option<Arc<T>> {
        let guard = self.entry.read();
        match guard.as_ref() {
            Some(entry) if entry.stored_at.elapsed() < ttl => Some(entry.value.clone()),
            _ => None,
        }
    }

    fn insert(&self, value: Arc<T>) {
        *self.entry.write() = Some(Entry { value, stored_at: Instant::now() });
    }

    fn clear(&self) -> bool {
        self.entry.write().take().is_some()
    }
}

/// Injectable cache for the bootstrap payload and fixture list
pub struct PayloadCache {
    ttl: Duration,
    bootstrap: Slot<BootstrapPayload>,
    fixtures: Slot<Vec<RawFixture>>,
}

impl PayloadCache {
    /// Create a cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, bootstrap: Slot::new(), fixtures: Slot::new() }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached bootstrap payload, if present and fresh
    pub fn get_bootstrap(&self) -> Option<Arc<BootstrapPayload>> {
        let hit = self.bootstrap.get(self.ttl);
        debug!("Bootstrap cache {}", if hit.is_some() { "hit" } else { "miss" });
        hit
    }

    pub fn insert_bootstrap(&self, payload: Arc<BootstrapPayload>) {
        debug!("Caching bootstrap payload with {} players for {}s", payload.players.len(), self.ttl.as_secs());
        self.bootstrap.insert(payload);
    }

    /// Cached fixture list, if present and fresh
    pub fn get_fixtures(&self) -> Option<Arc<Vec<RawFixture>>> {
        let hit = self.fixtures.get(self.ttl);
        debug!("Fixtures cache {}", if hit.is_some() { "hit" } else { "miss" });
        hit
    }

    pub fn insert_fixtures(&self, fixtures: Arc<Vec<RawFixture>>) {
        self.fixtures.insert(fixtures);
    }

    /// Drop every cached entry. Returns true if anything was cached.
    pub fn invalidate(&self) -> bool {
        let had_bootstrap = self.bootstrap.clear();
        let had_fixtures = self.fixtures.clear();
        debug!("Payload cache invalidated");
        had_bootstrap || had_fixtures
    }
}
