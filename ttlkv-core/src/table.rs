use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::entry::Entry;
use crate::snapshot::SnapshotRecord;

/// TTLs are capped to ~100 years so `Instant + ttl` can never overflow.
const MAX_TTL_MS: u64 = 100 * 365 * 24 * 60 * 60 * 1000;

/// Concurrent key → [`Entry`] map; the only owner of stored entries.
///
/// Backed by `DashMap`, so reads of different shards never contend and a
/// write locks only the shard holding its key. Every read path checks expiry
/// itself, so an expired entry is invisible even before the sweeper has
/// reclaimed it.
#[derive(Debug, Default)]
pub struct EntryTable {
    data: DashMap<String, Entry>,
}

impl EntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key` if it exists and has not expired.
    ///
    /// An expired entry found here is removed on the spot.
    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        let entry = self.data.get(key)?;

        if entry.value().is_expired() {
            // Drop the read guard before taking the shard's write lock
            drop(entry);
            // Re-check under the write lock: a concurrent put may have
            // refreshed the key in between.
            self.data.remove_if(key, |_, v| v.is_expired());
            return None;
        }

        Some(entry.value().value_shared())
    }

    /// Inserts or fully replaces `key`, expiring `ttl_ms` milliseconds from now.
    ///
    /// Returns `false` and leaves the table untouched when `ttl_ms <= 0`,
    /// `key` is empty, or `value` is `None`.
    pub fn put(&self, key: &str, value: Option<&str>, ttl_ms: i64) -> bool {
        let Some(value) = value else {
            return false;
        };
        if key.is_empty() || ttl_ms <= 0 {
            return false;
        }

        let ttl = Duration::from_millis((ttl_ms as u64).min(MAX_TTL_MS));
        self.data
            .insert(key.to_owned(), Entry::new(Arc::from(value), ttl));
        true
    }

    /// Removes `key` and returns its value if it was live.
    ///
    /// An expired entry is reclaimed as a side effect but reported as absent.
    pub fn delete(&self, key: &str) -> Option<Arc<str>> {
        if let Some((_, entry)) = self.data.remove_if(key, |_, v| !v.is_expired()) {
            return Some(entry.value_shared());
        }
        self.data.remove_if(key, |_, v| v.is_expired());
        None
    }

    /// Number of live entries. Expired entries awaiting a sweep are not counted.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.data
            .iter()
            .filter(|entry| !entry.value().is_expired_at(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of physically stored entries, including expired ones not yet swept
    #[cfg(test)]
    pub(crate) fn stored_len(&self) -> usize {
        self.data.len()
    }

    /// Copies out every live entry with its remaining lifespan.
    ///
    /// Each entry is read under its shard's read lock, so a record always
    /// carries one complete value; concurrent writers are never blocked for
    /// longer than one shard visit.
    pub fn snapshot_live(&self) -> Vec<SnapshotRecord> {
        let now = Instant::now();
        self.data
            .iter()
            .filter(|entry| !entry.value().is_expired_at(now))
            .map(|entry| {
                let remaining = entry.value().expires_at().saturating_duration_since(now);
                SnapshotRecord {
                    key: entry.key().clone(),
                    value: entry.value().value().to_owned(),
                    remaining_lifespan_ms: u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
                }
            })
            .collect()
    }

    /// Removes all expired entries and returns how many were evicted.
    ///
    /// Not atomic across the table: each shard is locked in turn.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.data.retain(|_, entry| {
            if entry.is_expired_at(now) {
                removed += 1;
                false
            } else {
                true
            }
        });

        removed
    }

    /// Stores an entry that is already expired
    #[cfg(test)]
    pub(crate) fn insert_expired(&self, key: &str, value: &str) {
        let entry = Entry::with_deadline(Arc::from(value), Instant::now() - Duration::from_secs(1));
        self.data.insert(key.to_owned(), entry);
    }
}
