use crate::cache::PayloadCache;
use crate::config::FetcherConfig;
use crate::error::{FetchError, FetchResult, FetcherError, ParseError};
use crate::models::*;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Source of upstream FPL data
///
/// Implemented by [`FplFetcher`]; the pipeline only depends on this trait so
/// a fixed in-memory source can stand in for the network.
#[async_trait]
pub trait FplSource: Send + Sync {
    /// Players, teams and position categories for the current season
    async fn bootstrap(&self) -> FetchResult<Arc<BootstrapPayload>>;

    /// Every fixture of the season, finished or not
    async fn fixtures(&self) -> FetchResult<Arc<Vec<RawFixture>>>;

    /// Per-gameweek history of one player
    async fn player_history(&self, player_id: u32) -> FetchResult<PlayerHistory>;

    /// First page of a classic league's standings
    async fn league_standings(&self, league_id: u32) -> FetchResult<LeagueStandings>;

    /// Drop any cached upstream data. Returns true if something was dropped.
    fn invalidate_cache(&self) -> bool {
        false
    }
}

/// HTTP client for the FPL API
pub struct FplFetcher {
    config: FetcherConfig,
    client: Client,
    cache: Option<Arc<PayloadCache>>,
}

impl FplFetcher {
    /// Create a fetcher with no cache; every call goes upstream
    pub fn new(config: FetcherConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Network {
                url: config.base_url.clone(),
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { config, client, cache: None })
    }

    /// Attach a payload cache consulted before every bootstrap/fixtures fetch
    pub fn with_cache(mut self, cache: Arc<PayloadCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&Arc<PayloadCache>> {
        self.cache.as_ref()
    }

    /// Fetch the bootstrap payload (one GET, or a cache hit)
    pub async fn fetch_bootstrap(&self) -> FetchResult<Arc<BootstrapPayload>> {
        if let Some(payload) = self.cache.as_ref().and_then(|c| c.get_bootstrap()) {
            return Ok(payload);
        }

        let url = self.config.bootstrap_url();
        info!("Fetching bootstrap payload from: {}", url);

        let payload: BootstrapPayload = self.get_json(&url).await?;
        info!(
            "Fetched {} players, {} teams, {} positions",
            payload.players.len(),
            payload.teams.len(),
            payload.positions.len()
        );

        let payload = Arc::new(payload);
        if let Some(cache) = &self.cache {
            cache.insert_bootstrap(payload.clone());
        }
        Ok(payload)
    }

    /// Fetch the season fixture list (one GET, or a cache hit)
    pub async fn fetch_fixtures(&self) -> FetchResult<Arc<Vec<RawFixture>>> {
        if let Some(fixtures) = self.cache.as_ref().and_then(|c| c.get_fixtures()) {
            return Ok(fixtures);
        }

        let url = self.config.fixtures_url();
        info!("Fetching fixtures from: {}", url);

        let fixtures: Vec<RawFixture> = self.get_json(&url).await?;
        info!("Fetched {} fixtures", fixtures.len());

        let fixtures = Arc::new(fixtures);
        if let Some(cache) = &self.cache {
            cache.insert_fixtures(fixtures.clone());
        }
        Ok(fixtures)
    }

    /// Fetch one player's gameweek history; never cached
    pub async fn fetch_player_history(&self, player_id: u32) -> FetchResult<PlayerHistory> {
        let url = self.config.player_history_url(player_id);
        debug!("Fetching history for player {} from: {}", player_id, url);

        let history: PlayerHistory = self.get_json(&url).await?;
        debug!("Fetched {} gameweeks for player {}", history.history.len(), player_id);
        Ok(history)
    }

    /// Fetch the first standings page of a classic league; never cached
    pub async fn fetch_league_standings(&self, league_id: u32) -> FetchResult<LeagueStandings> {
        let url = self.config.league_standings_url(league_id);
        info!("Fetching standings for league {} from: {}", league_id, url);

        let standings: LeagueStandings = self.get_json(&url).await?;
        info!("Fetched {} standings rows for league {}", standings.standings.results.len(), league_id);
        Ok(standings)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let response =
            self.client.get(url).send().await.map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Upstream request to {} failed with status: {}", url, status);
            return Err(FetchError::Http { url: url.to_string(), status: status.as_u16() }.into());
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(url, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to parse payload from {}: {}", url, e);
            FetcherError::from(ParseError { url: url.to_string(), message: e.to_string() })
        })
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> FetcherError {
        let fetch_error = if err.is_timeout() {
            FetchError::Timeout { url: url.to_string(), timeout_secs: self.config.timeout_secs }
        } else {
            FetchError::Network { url: url.to_string(), message: err.to_string() }
        };
        error!("{}", fetch_error);
        fetch_error.into()
    }
}

#[async_trait]
impl FplSource for FplFetcher {
    async fn bootstrap(&self) -> FetchResult<Arc<BootstrapPayload>> {
        self.fetch_bootstrap().await
    }

    async fn fixtures(&self) -> FetchResult<Arc<Vec<RawFixture>>> {
        self.fetch_fixtures().await
    }

    async fn player_history(&self, player_id: u32) -> FetchResult<PlayerHistory> {
        self.fetch_player_history(player_id).await
    }

    async fn league_standings(&self, league_id: u32) -> FetchResult<LeagueStandings> {
        self.fetch_league_standings(league_id).await
    }

    fn invalidate_cache(&self) -> bool {
        self.cache.as_ref().map(|c| c.invalidate()).unwrap_or(false)
    }
}
