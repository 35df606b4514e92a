use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{DEFAULT_BASE_URL, DEFAULT_CACHE_TTL_SECS, DEFAULT_TIMEOUT_SECS};

/// Configuration for the FPL fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// API root, without trailing slash (e.g. "https://fantasy.premierleague.com/api")
    pub base_url: String,

    /// Upstream request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent upstream
    pub user_agent: String,

    /// Attach "next 3 fixtures" labels to normalized players
    pub include_fixtures: bool,
}

/// Configuration for the bootstrap payload cache
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable caching of upstream payloads
    pub enabled: bool,

    /// Time-to-live for a cached payload in seconds
    pub ttl_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("fpl-scout/{}", env!("CARGO_PKG_VERSION")),
            include_fixtures: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true, ttl_secs: DEFAULT_CACHE_TTL_SECS }
    }
}

impl FetcherConfig {
    /// Fetcher config pointed at a different API root, other fields default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn bootstrap_url(&self) -> String {
        format!("{}/bootstrap-static/", self.base_url.trim_end_matches('/'))
    }

    pub fn fixtures_url(&self) -> String {
        format!("{}/fixtures/", self.base_url.trim_end_matches('/'))
    }

    pub fn player_history_url(&self, player_id: u32) -> String {
        format!("{}/element-summary/{}/", self.base_url.trim_end_matches('/'), player_id)
    }

    pub fn league_standings_url(&self, league_id: u32) -> String {
        format!("{}/leagues-classic/{}/standings/", self.base_url.trim_end_matches('/'), league_id)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
