//! Process configuration read from the environment.

use std::time::Duration;

use anyhow::{Context, bail};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_INFERENCE_URL: &str = "http://127.0.0.1:8001/predict";
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;
const DEV_JWT_SECRET: &str = "dev-secret";

/// Which store backs the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Seeded with the demo plan on startup.
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub bind_addr: String,
    pub store: StoreBackend,
    pub inference_url: String,
    pub inference_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let persistent = get("USE_PERSISTENT_STORES").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let store = if persistent {
            let Some(database_url) = get("DATABASE_URL") else {
                bail!("USE_PERSISTENT_STORES=true requires DATABASE_URL");
            };
            StoreBackend::Postgres { database_url }
        } else {
            StoreBackend::InMemory
        };

        let inference_timeout = match get("INFERENCE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("INFERENCE_TIMEOUT_SECS={raw}"))
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "invalid inference timeout; using default");
                    DEFAULT_INFERENCE_TIMEOUT_SECS
                }),
            None => DEFAULT_INFERENCE_TIMEOUT_SECS,
        };

        Ok(Self {
            jwt_secret,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            store,
            inference_url: get("INFERENCE_URL").unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()),
            inference_timeout: Duration::from_secs(inference_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.store, StoreBackend::InMemory);
        assert_eq!(cfg.inference_url, DEFAULT_INFERENCE_URL);
        assert_eq!(cfg.inference_timeout, Duration::from_secs(30));
    }

    #[test]
    fn persistent_store_needs_database_url() {
        assert!(config(&[("USE_PERSISTENT_STORES", "true")]).is_err());

        let cfg = config(&[("USE_PERSISTENT_STORES", "TRUE"), ("DATABASE_URL", "postgres://db/strat")]).unwrap();
        assert_eq!(
            cfg.store,
            StoreBackend::Postgres { database_url: "postgres://db/strat".into() }
        );
    }

    #[test]
    fn database_url_alone_keeps_in_memory() {
        let cfg = config(&[("DATABASE_URL", "postgres://db/strat")]).unwrap();
        assert_eq!(cfg.store, StoreBackend::InMemory);
    }

    #[test]
    fn malformed_timeout_falls_back() {
        let cfg = config(&[("INFERENCE_TIMEOUT_SECS", "soon")]).unwrap();
        assert_eq!(cfg.inference_timeout, Duration::from_secs(30));

        let cfg = config(&[("INFERENCE_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(cfg.inference_timeout, Duration::from_secs(5));
    }
}
