use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::snapshot;
use crate::sweeper::Sweeper;
use crate::table::EntryTable;

/// Internal shared state for the store
#[derive(Debug)]
struct StoreInner {
    table: Arc<EntryTable>,
    sweeper: Sweeper,
    config: StoreConfig,
}

/// Thread-safe in-memory key-value store where every entry has a TTL
///
/// `Store` is a cheap handle: clones share the same entries. Each store spawns
/// its own sweeper task that evicts expired entries every
/// [`StoreConfig::sweep_interval`]; the task stops when the last handle is
/// dropped or [`Store::shutdown`] is called.
///
/// # Example
///
/// ```rust,no_run
/// use ttlkv_core::Store;
///
/// #[tokio::main]
/// async fn main() -> ttlkv_core::Result<()> {
///     let store = Store::new();
///
///     assert!(store.set("user:123", Some("John Doe"), Some(60_000)));
///     assert_eq!(store.get("user:123")?, "John Doe");
///
///     let snapshot = store.dump().await?;
///     println!("{}", snapshot);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Creates a new store with default configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The store requires
    /// a runtime to spawn its sweeper task.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new store with custom configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    pub fn with_config(config: StoreConfig) -> Self {
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "ttlkv_core::Store requires a Tokio runtime. \
                 Create it from within #[tokio::main], #[tokio::test], \
                 or code already running on a Tokio runtime."
            );
        }

        let table = Arc::new(EntryTable::new());
        let sweeper = Sweeper::start(Arc::clone(&table), config.sweep_interval);

        Self {
            inner: Arc::new(StoreInner {
                table,
                sweeper,
                config,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`] if the key is absent or its TTL has elapsed,
    /// whether or not the sweeper has reclaimed it yet.
    pub fn get(&self, key: &str) -> Result<String> {
        self.inner
            .table
            .get(key)
            .map(|value| value.to_string())
            .ok_or_else(|| StoreError::KeyNotFound(key.to_owned()))
    }

    /// Stores `value` under `key` for `ttl_ms` milliseconds.
    ///
    /// When `ttl_ms` is `None` the configured default (10 seconds) applies.
    /// An existing key is fully overwritten: both value and expiry are replaced.
    ///
    /// Unlike the other operations, `set` never returns an error. A
    /// non-positive TTL, an empty key, or a missing value is rejected with
    /// `false` and the store is left unchanged.
    ///
    /// Concurrent writes to the same key race: the write that completes last
    /// wins, regardless of the order the calls were made in.
    pub fn set(&self, key: &str, value: Option<&str>, ttl_ms: Option<i64>) -> bool {
        let ttl_ms = ttl_ms.unwrap_or(self.inner.config.default_ttl_ms);
        self.inner.table.put(key, value, ttl_ms)
    }

    /// Removes `key` and returns the value it held.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`] if the key is absent or already expired.
    pub fn remove(&self, key: &str) -> Result<String> {
        self.inner
            .table
            .delete(key)
            .map(|value| value.to_string())
            .ok_or_else(|| StoreError::KeyNotFound(key.to_owned()))
    }

    /// Number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.table.is_empty()
    }

    /// Writes every live entry to the snapshot file and returns the same text.
    ///
    /// Record order follows the table's iteration order and is not
    /// guaranteed to match insertion order. An empty store produces an empty
    /// string and an empty file.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the snapshot file cannot be created or written.
    #[instrument(skip(self), fields(path = ?self.inner.config.snapshot_path))]
    pub async fn dump(&self) -> Result<String> {
        let records = self.inner.table.snapshot_live();
        let contents = snapshot::encode(&records)?;

        snapshot::write_snapshot(&self.inner.config.snapshot_path, &contents).await?;

        info!(count = records.len(), "Dumped store to snapshot");
        Ok(contents)
    }

    /// Reads the snapshot file and applies each record through `set`.
    ///
    /// Existing keys are overwritten, nothing is cleared first. Each record
    /// expires `remainingLifespanMs` from now; a record with no lifespan left
    /// is rejected like any other zero TTL and stays absent.
    ///
    /// Returns the number of records accepted.
    ///
    /// # Errors
    ///
    /// - [`StoreError::SnapshotNotFound`] if no snapshot has been written
    /// - [`StoreError::Io`] if the file cannot be read
    /// - [`StoreError::MalformedSnapshot`] on the first unparsable line;
    ///   records before that line remain applied
    #[instrument(skip(self), fields(path = ?self.inner.config.snapshot_path))]
    pub async fn load(&self) -> Result<usize> {
        let contents = snapshot::read_snapshot(&self.inner.config.snapshot_path).await?;

        let mut applied = 0;
        let mut skipped = 0;
        for record in snapshot::decode(&contents) {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, applied, "Aborting snapshot load");
                    return Err(e);
                }
            };

            let ttl_ms = i64::try_from(record.remaining_lifespan_ms).unwrap_or(i64::MAX);
            if self.inner.table.put(&record.key, Some(&record.value), ttl_ms) {
                applied += 1;
            } else {
                skipped += 1;
                debug!(key = %record.key, "Skipped snapshot record");
            }
        }

        info!(applied, skipped, "Loaded snapshot");
        Ok(applied)
    }

    /// Stops the sweeper task.
    ///
    /// Entries stay readable and expiry is still enforced on read; expired
    /// entries are just no longer reclaimed in the background. Called
    /// automatically when the last handle is dropped.
    pub fn shutdown(&self) {
        self.inner.sweeper.stop();
    }

    #[cfg(test)]
    fn table(&self) -> &EntryTable {
        &self.inner.table
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
