use std::path::PathBuf;
use std::time::Duration;

/// Default TTL applied by `Store::set` when the caller omits one (10 seconds)
pub const DEFAULT_TTL_MS: i64 = 10_000;

/// Default interval between expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(100);

/// Well-known snapshot file name shared by `dump` and `load`
pub const DEFAULT_SNAPSHOT_PATH: &str = "dump.txt";

/// Configuration for a [`Store`](crate::Store)
///
/// # Example
///
/// ```rust
/// use ttlkv_core::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_sweep_interval(Duration::from_millis(50))
///     .with_snapshot_path("/var/lib/ttlkv/dump.txt");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Interval between background sweeps (default: 100 ms)
    pub sweep_interval: Duration,
    /// Snapshot file written by `dump` and read by `load` (default: `dump.txt`)
    pub snapshot_path: PathBuf,
    /// TTL in milliseconds used when `set` is called without one (default: 10000)
    pub default_ttl_ms: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            default_ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how often the sweeper evicts expired entries
    ///
    /// Sweeping only reclaims memory; reads never return an expired value
    /// regardless of this interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Sets the snapshot file location
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Sets the TTL used when `set` is called without one
    pub fn with_default_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.default_ttl_ms = ttl_ms;
        self
    }
}
