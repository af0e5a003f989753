//! # ttlkv core
//!
//! An in-memory key-value store where every entry carries a time-to-live,
//! with explicit snapshot persistence.
//!
//! ## Features
//!
//! - Thread-safe storage using `DashMap` (sharded locks, reads never block reads)
//! - Expiry enforced on every read, independent of background sweeping
//! - Background sweeper task per store instance
//! - `dump`/`load` to a line-oriented JSON snapshot file
//!
//! ## Example
//!
//! ```rust,no_run
//! use ttlkv_core::{Store, StoreConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> ttlkv_core::Result<()> {
//!     let config = StoreConfig::default()
//!         .with_sweep_interval(Duration::from_millis(50));
//!     let store = Store::with_config(config);
//!
//!     // 60 second TTL; `None` falls back to the 10 second default
//!     store.set("user:123", Some("John Doe"), Some(60_000));
//!
//!     match store.get("user:123") {
//!         Ok(value) => println!("User: {}", value),
//!         Err(e) if e.is_not_found() => println!("gone"),
//!         Err(e) => return Err(e),
//!     }
//!
//!     store.dump().await?;
//!     store.load().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod entry;
mod error;
mod snapshot;
mod store;
mod sweeper;
mod table;

pub use config::{StoreConfig, DEFAULT_SNAPSHOT_PATH, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL_MS};
pub use entry::Entry;
pub use error::{Result, StoreError};
pub use snapshot::SnapshotRecord;
pub use store::Store;
pub use table::EntryTable;
