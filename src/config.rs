//! Server settings from the environment.
//!
//! `HOST` (default 0.0.0.0), `PORT` (8080), `INACTIVITY_TIMEOUT_HOURS` (12),
//! `CLEANUP_INTERVAL_MINUTES` (30). Unparseable values fall back to the default.

use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Draws and brackets not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            host: lookup("HOST")
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            inactivity_timeout: parsed("INACTIVITY_TIMEOUT_HOURS")
                .and_then(|h| h.checked_mul(3600))
                .map(Duration::from_secs)
                .unwrap_or(defaults.inactivity_timeout),
            cleanup_interval: parsed("CLEANUP_INTERVAL_MINUTES")
                .filter(|m| *m > 0)
                .and_then(|m| m.checked_mul(60))
                .map(Duration::from_secs)
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]), ServerConfig::default());
    }

    #[test]
    fn values_override_and_garbage_falls_back() {
        let c = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "nope"),
            ("INACTIVITY_TIMEOUT_HOURS", "2"),
            ("CLEANUP_INTERVAL_MINUTES", "0"),
        ]);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 8080);
        assert_eq!(c.inactivity_timeout, Duration::from_secs(7200));
        assert_eq!(c.cleanup_interval, Duration::from_secs(30 * 60));
    }

    #[test]
    fn overflowing_durations_fall_back() {
        let huge = u64::MAX.to_string();
        let c = config(&[
            ("INACTIVITY_TIMEOUT_HOURS", huge.as_str()),
            ("CLEANUP_INTERVAL_MINUTES", huge.as_str()),
        ]);
        assert_eq!(c.inactivity_timeout, ServerConfig::default().inactivity_timeout);
        assert_eq!(c.cleanup_interval, ServerConfig::default().cleanup_interval);
    }
}
