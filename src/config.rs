//! Service configuration.
//!
//! Everything the server and the remote client need is carried in explicit
//! structures handed over at construction. Binaries fill them from command-line
//! arguments and environment variables; nothing below reads the environment.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://api.nobelprize.org/v1/prize.json";

/// Closed interval of award years the dataset is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Result<Self, QueryError> {
        if min > max {
            return Err(QueryError::invalid_range(format!(
                "year bounds {}..={} are reversed",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 2013,
            max: 2023,
        }
    }
}

/// Where the ingest pass reads the prize feed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_FEED_URL.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub year_bounds: YearBounds,
    /// Upper bound on queries executing at the same time.
    pub max_concurrent_requests: usize,
    /// Deadline applied when a request carries none.
    pub default_timeout_ms: u64,
    /// Cap on caller-supplied deadlines.
    pub max_timeout_ms: u64,
    pub source: DataSource,
    /// Re-ingest and republish the snapshot on this period, if set.
    pub refresh_interval_secs: Option<u64>,
}

impl ServiceConfig {
    /// Deadline for one call: the caller's request, capped by `max_timeout_ms`.
    pub fn effective_timeout(&self, requested_ms: Option<u64>) -> Duration {
        let ms = requested_ms
            .unwrap_or(self.default_timeout_ms)
            .min(self.max_timeout_ms);
        Duration::from_millis(ms)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 50051)),
            year_bounds: YearBounds::default(),
            max_concurrent_requests: 10,
            default_timeout_ms: 5_000,
            max_timeout_ms: 30_000,
            source: DataSource::default(),
            refresh_interval_secs: None,
        }
    }
}

/// Settings for the remote binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// e.g. `http://127.0.0.1:50051`
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(candidate: &str) -> String {
    let trimmed = candidate.trim();
    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}
