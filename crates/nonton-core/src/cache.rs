//! Explicit TTL cache handles.
//!
//! There is no global cache. The server owns one [`CacheSlot`] per resource
//! that opts into a revalidation window, and consumers pass a [`QueryCache`]
//! into every fetch.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A value with the instant it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, fetched_at: Instant) -> Self {
        Self { value, fetched_at }
    }

    /// True while `now` is strictly within `ttl` of the fetch.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Single shared entry for one server-side resource.
#[derive(Debug)]
pub struct CacheSlot<T> {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> CacheSlot<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// The cached value if still fresh at `now`.
    pub fn get_fresh(&self, now: Instant) -> Option<T> {
        let guard = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .filter(|e| e.is_fresh(now, self.ttl))
            .map(|e| e.value.clone())
    }

    pub fn store(&self, value: T, now: Instant) {
        let mut guard = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(CacheEntry::new(value, now));
    }
}

/// Keyed entries held by a consumer, one per resource path.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry<serde_json::Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_fresh(&self, key: &str, now: Instant, ttl: Duration) -> Option<&serde_json::Value> {
        self.entries
            .get(key)
            .filter(|e| e.is_fresh(now, ttl))
            .map(|e| &e.value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value, now: Instant) {
        self.entries.insert(key.into(), CacheEntry::new(value, now));
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
