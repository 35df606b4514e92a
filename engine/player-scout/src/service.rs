use crate::error::{ScoutError, ScoutResult};
use crate::league::{summarize_league, LeagueSummary};
use crate::normalizer::{normalize, normalize_with_fixtures};
use crate::query::{query, FilterSpec};
use crate::types::PlayerRecord;
use fpl_fetcher::{FplSource, PlayerHistory};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs fetch → normalize → query for one request
///
/// Holds no per-request state; every call normalizes fresh from whatever the
/// source returns (upstream, or the source's own cache).
#[derive(Clone)]
pub struct ScoutService {
    source: Arc<dyn FplSource>,
    include_fixtures: bool,
}

impl ScoutService {
    pub fn new(source: Arc<dyn FplSource>) -> Self {
        Self { source, include_fixtures: false }
    }

    /// Also fetch fixtures and attach each team's next three
    pub fn with_fixtures(mut self, include_fixtures: bool) -> Self {
        self.include_fixtures = include_fixtures;
        self
    }

    /// Fetch and normalize every player
    pub async fn players(&self) -> ScoutResult<Vec<PlayerRecord>> {
        let payload = self.source.bootstrap().await.map_err(|e| {
            error!("Bootstrap fetch failed: {}", e);
            ScoutError::from(e)
        })?;

        let normalized = if self.include_fixtures {
            let fixtures = self.source.fixtures().await.map_err(|e| {
                error!("Fixtures fetch failed: {}", e);
                ScoutError::from(e)
            })?;
            normalize_with_fixtures(&payload, &fixtures)
        } else {
            normalize(&payload)
        };
        let players = normalized.map_err(|e| {
            error!("Upstream payload is inconsistent: {}", e);
            ScoutError::from(e)
        })?;

        Ok(players)
    }

    /// Run the full pipeline for one ranking query.
    ///
    /// The query is validated before anything is fetched.
    pub async fn rank(&self, filters: &FilterSpec) -> ScoutResult<Vec<PlayerRecord>> {
        if let Err(e) = filters.validate() {
            warn!("Rejected query: {}", e);
            return Err(e.into());
        }

        let players = self.players().await?;
        let ranked: Vec<PlayerRecord> = query(&players, filters)?.into_iter().cloned().collect();

        info!(
            "Ranked {} of {} players by {} (position={:?}, min_minutes={}, max_cost={:?})",
            ranked.len(),
            players.len(),
            filters.sort_by,
            filters.position,
            filters.min_minutes,
            filters.max_cost
        );
        Ok(ranked)
    }

    pub async fn player_history(&self, player_id: u32) -> ScoutResult<PlayerHistory> {
        Ok(self.source.player_history(player_id).await?)
    }

    /// Standings of a classic league with the leaders' average total
    pub async fn league_standings(&self, league_id: u32) -> ScoutResult<LeagueSummary> {
        let raw = self.source.league_standings(league_id).await.map_err(|e| {
            error!("League {} standings fetch failed: {}", league_id, e);
            ScoutError::from(e)
        })?;

        let summary = summarize_league(league_id, &raw);
        info!(
            "League {}: {} teams, top {} average {:.1}",
            league_id,
            summary.teams_analyzed,
            summary.standings.len().min(crate::league::LEADERS_AVERAGED),
            summary.top_average
        );
        Ok(summary)
    }

    /// Drop cached upstream data so the next request refetches
    pub fn invalidate_cache(&self) -> bool {
        let dropped = self.source.invalidate_cache();
        info!("Cache invalidation requested (dropped: {})", dropped);
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;
    use crate::testutil::{fixture, payload, raw_player, standing, FakeSource};
    use crate::types::Position;
    use crate::InvalidQueryError;
    use fpl_fetcher::{FetchError, FetcherError};
    use std::sync::atomic::Ordering;

    fn scenario_source() -> Arc<FakeSource> {
        Arc::new(FakeSource::serving(payload(vec![
            raw_player(1, 3, 80, 900, 90),
            raw_player(2, 3, 50, 0, 0),
            raw_player(3, 4, 100, 1800, 180),
        ])))
    }

    #[tokio::test]
    async fn test_rank_midfielders() {
        let service = ScoutService::new(scenario_source());
        let filters = FilterSpec {
            position: Some(Position::Midfielder),
            min_minutes: 1,
            ..Default::default()
        };

        let ranked = service.rank(&filters).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[0].ppm, 11.25);
    }

    #[tokio::test]
    async fn test_upstream_500_propagates_as_fetch_error() {
        let source = Arc::new(FakeSource::failing_with_status(500));
        let service = ScoutService::new(source.clone());

        let err = service.rank(&FilterSpec::default()).await.unwrap_err();
        match err {
            ScoutError::Fetch(FetcherError::Fetch(FetchError::Http { status, .. })) => {
                assert_eq!(status, 500)
            }
            other => panic!("expected HTTP fetch error, got {other:?}"),
        }
        assert_eq!(source.bootstrap_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_query_skips_upstream() {
        let source = scenario_source();
        let service = ScoutService::new(source.clone());
        let filters = FilterSpec { top_n: 0, sort_by: SortKey::Cost, ..Default::default() };

        let err = service.rank(&filters).await.unwrap_err();
        assert!(matches!(err, ScoutError::InvalidQuery(InvalidQueryError::OutOfRange { .. })));
        assert_eq!(source.bootstrap_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_error_propagates() {
        let mut orphan = raw_player(5, 3, 60, 100, 4);
        orphan.team = 42;
        let service = ScoutService::new(Arc::new(FakeSource::serving(payload(vec![orphan]))));

        let err = service.players().await.unwrap_err();
        assert!(matches!(err, ScoutError::Lookup(_)));
    }

    #[tokio::test]
    async fn test_fixtures_attached_when_enabled() {
        let mut source = FakeSource::serving(payload(vec![raw_player(1, 3, 80, 900, 90)]));
        source.fixtures = Ok(Arc::new(vec![fixture(1, 2, 1, false, Some("2025-09-13T14:00:00Z"))]));
        let source = Arc::new(source);

        let plain = ScoutService::new(source.clone()).players().await.unwrap();
        assert_eq!(plain[0].next_fixtures, None);

        let enriched = ScoutService::new(source).with_fixtures(true).players().await.unwrap();
        assert_eq!(enriched[0].next_fixtures.as_deref(), Some("@ AVL (A)"));
    }

    #[tokio::test]
    async fn test_each_call_refetches() {
        let source = scenario_source();
        let service = ScoutService::new(source.clone());
        service.players().await.unwrap();
        service.players().await.unwrap();
        assert_eq!(source.bootstrap_calls.load(Ordering::SeqCst), 2);
        assert!(!service.invalidate_cache());
    }

    #[tokio::test]
    async fn test_fixtures_failure_propagates_when_enabled() {
        let mut source = FakeSource::serving(payload(vec![raw_player(1, 3, 80, 900, 90)]));
        source.fixtures =
            Err(FetchError::Timeout { url: "http://upstream/fixtures/".to_string(), timeout_secs: 10 }.into());
        let source = Arc::new(source);

        assert!(ScoutService::new(source.clone()).players().await.is_ok());
        let err = ScoutService::new(source).with_fixtures(true).players().await.unwrap_err();
        assert!(matches!(err, ScoutError::Fetch(FetcherError::Fetch(FetchError::Timeout { .. }))));
    }

    #[tokio::test]
    async fn test_league_standings_summary() {
        let mut source = FakeSource::serving(payload(vec![]));
        source.standings.standings.results = vec![standing(1, "Ann", 1200), standing(2, "Bob", 1100)];
        let service = ScoutService::new(Arc::new(source));

        let summary = service.league_standings(99).await.unwrap();
        assert_eq!(summary.league_id, 99);
        assert_eq!(summary.teams_analyzed, 2);
        assert_eq!(summary.top_average, 1150.0);
        assert_eq!(summary.standings[1].manager, "Bob");
    }
}
