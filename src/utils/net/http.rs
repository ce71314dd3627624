//! HTTP client construction
//!
//! One client is built per importer and reused for every batch, so
//! connections stay pooled across requests.

use crate::utils::error::{ImportError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client pool
#[derive(Debug, Clone)]
pub struct HttpClientPoolConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TCP keepalive interval
    pub tcp_keepalive: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientPoolConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 8,
            pool_idle_timeout: Duration::from_secs(90),
            connect_timeout: Duration::from_secs(10),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: format!("bulk-import/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build a client whose every request is bounded by `timeout`
pub fn build_client(timeout: Duration) -> Result<Client> {
    build_client_with(timeout, &HttpClientPoolConfig::default())
}

pub fn build_client_with(timeout: Duration, config: &HttpClientPoolConfig) -> Result<Client> {
    debug!(timeout_ms = timeout.as_millis() as u64, "Building HTTP client");

    // connect timeout never exceeds the whole-request timeout
    let connect_timeout = config.connect_timeout.min(timeout);

    ClientBuilder::new()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .tcp_nodelay(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| ImportError::Config(format!("Failed to build HTTP client: {}", e)))
}
