//! Process-wide configuration.
//!
//! Built once at startup from the environment and passed into component
//! constructors; nothing reads env vars at request time.

use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Schema tag embedded in snapshot keys; bumping it invalidates every
    /// stored snapshot on the next deploy.
    pub schema_version: String,
    pub snapshot_ttl_seconds: u64,
    pub lock_ttl_seconds: u64,
    pub ip_limit_per_min: u32,
    pub analyze_limit_per_hour: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: "v1".to_string(),
            snapshot_ttl_seconds: 43_200,
            lock_ttl_seconds: 30,
            ip_limit_per_min: 60,
            analyze_limit_per_hour: 4,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            schema_version: std::env::var("STATS_VERSION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.schema_version),
            snapshot_ttl_seconds: env_number(
                "STATS_SNAPSHOT_TTL_SECONDS",
                defaults.snapshot_ttl_seconds,
            ),
            lock_ttl_seconds: env_number("STATS_LOCK_TTL_SECONDS", defaults.lock_ttl_seconds),
            ip_limit_per_min: env_number("STATS_RL_PER_IP_PER_MIN", defaults.ip_limit_per_min),
            analyze_limit_per_hour: env_number(
                "STATS_RL_ANALYZE_PER_USER_PER_HOUR",
                defaults.analyze_limit_per_hour,
            ),
        }
    }
}

fn env_number<T: std::str::FromStr + Copy>(name: &str, fallback: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "unparseable config value, using default");
            fallback
        }),
        Err(_) => fallback,
    }
}
