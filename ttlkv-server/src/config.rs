use std::time::Duration;

use ttlkv_core::{StoreConfig, DEFAULT_SNAPSHOT_PATH, DEFAULT_TTL_MS};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 100;

/// Server settings, read from `TTLKV_*` environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub sweep_interval_ms: u64,
    pub snapshot_path: String,
    pub default_ttl_ms: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
            default_ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

impl ServerConfig {
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("TTLKV_HOST").unwrap_or(defaults.host),
            port: lookup("TTLKV_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            sweep_interval_ms: lookup("TTLKV_SWEEP_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_ms),
            snapshot_path: lookup("TTLKV_SNAPSHOT_PATH").unwrap_or(defaults.snapshot_path),
            default_ttl_ms: lookup("TTLKV_DEFAULT_TTL_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.default_ttl_ms),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_sweep_interval(Duration::from_millis(self.sweep_interval_ms))
            .with_snapshot_path(&self.snapshot_path)
            .with_default_ttl_ms(self.default_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.sweep_interval_ms, 100);
        assert_eq!(config.snapshot_path, "dump.txt");
        assert_eq!(config.default_ttl_ms, 10_000);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TTLKV_HOST", "0.0.0.0"),
            ("TTLKV_PORT", "9000"),
            ("TTLKV_SWEEP_INTERVAL_MS", "50"),
            ("TTLKV_SNAPSHOT_PATH", "/data/snap.txt"),
            ("TTLKV_DEFAULT_TTL_MS", "2500"),
        ]);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);

        let store_config = config.store_config();
        assert_eq!(store_config.sweep_interval, Duration::from_millis(50));
        assert_eq!(store_config.snapshot_path, std::path::PathBuf::from("/data/snap.txt"));
        assert_eq!(store_config.default_ttl_ms, 2500);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("TTLKV_PORT", "not-a-port"),
            ("TTLKV_SWEEP_INTERVAL_MS", "-1"),
            ("TTLKV_DEFAULT_TTL_MS", "0"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.sweep_interval_ms, 100);
        assert_eq!(config.default_ttl_ms, 10_000);
    }
}
