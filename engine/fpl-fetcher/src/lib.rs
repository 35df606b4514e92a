//! FPL Fetcher
//!
//! Retrieves the Fantasy Premier League bootstrap payload (players, teams and
//! position categories), the fixture list and per-player gameweek history
//! from the public FPL API. An optional [`PayloadCache`] can be injected to
//! reuse a recent payload instead of going upstream on every call.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;

pub use cache::PayloadCache;
pub use config::{CacheConfig, FetcherConfig};
pub use error::{FetchError, FetcherError, ParseError};
pub use fetcher::{FplFetcher, FplSource};
pub use models::*;

/// Public FPL API root
pub const DEFAULT_BASE_URL: &str = "https://fantasy.premierleague.com/api";

/// Default upstream request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default payload cache TTL in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
