use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use quantfolio_core::market_data::DEFAULT_FUNDAMENTALS_TTL_SECS;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// How long fundamentals posted to `/valuation` stay usable.
    pub fundamentals_ttl: chrono::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            fundamentals_ttl: chrono::Duration::seconds(DEFAULT_FUNDAMENTALS_TTL_SECS),
        }
    }
}

impl Config {
    /// Reads `QF_*` variables, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = lookup("QF_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid QF_LISTEN_ADDR")?;
        let cors_allow = lookup("QF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = match lookup("QF_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.parse().context("Invalid QF_REQUEST_TIMEOUT_MS")?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        let ttl_secs: i64 = match lookup("QF_FUNDAMENTALS_TTL_SECS") {
            Some(raw) => raw.parse().context("Invalid QF_FUNDAMENTALS_TTL_SECS")?,
            None => DEFAULT_FUNDAMENTALS_TTL_SECS,
        };
        if ttl_secs < 0 {
            anyhow::bail!("QF_FUNDAMENTALS_TTL_SECS cannot be negative");
        }

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            fundamentals_ttl: chrono::Duration::seconds(ttl_secs),
        })
    }
}
