//! In-memory TTL cache shared by every scrape operation.
//!
//! Entries expire lazily: an expired entry is removed by the `get` that finds
//! it. There is no capacity bound and no background sweep.

use log::debug;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

struct Entry<V> {
    data: V,
    expires: Instant,
}

pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.expires > now => {
                    debug!("cache hit: {key}");
                    return Some(entry.data.clone());
                }
                Some(_) => {}
                None => {
                    debug!("cache miss: {key}");
                    return None;
                }
            }
        }

        // Re-check under the write lock; a concurrent `set` may have refreshed it.
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if entry.expires > now {
                return Some(entry.data.clone());
            }
            entries.remove(key);
        }
        debug!("cache expired: {key}");
        None
    }

    /// Stores `data` until `now + ttl`. Last write wins.
    pub fn set(&self, key: impl Into<String>, data: V) {
        let expires = self.clock.now() + self.ttl;
        self.entries.write().insert(key.into(), Entry { data, expires });
    }

    /// Number of stored entries, expired ones included until read.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
