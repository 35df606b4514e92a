//! Payload builders shared by unit tests

use async_trait::async_trait;
use fpl_fetcher::error::FetchResult;
use fpl_fetcher::{
    BootstrapPayload, FetchError, FetcherError, FplSource, LeagueStandings, PlayerHistory, RawFixture,
    RawPlayer, RawPosition, RawStanding, RawTeam, StandingsPage,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Player on team 1 with the given element type, cost (tenths), minutes and points
pub fn raw_player(id: u32, element_type: u32, now_cost: u32, minutes: u32, total_points: i32) -> RawPlayer {
    RawPlayer {
        id,
        code: 100_000 + id,
        first_name: "Player".to_string(),
        second_name: id.to_string(),
        web_name: format!("P{id}"),
        team: 1,
        element_type,
        now_cost,
        total_points,
        minutes,
        goals_scored: 0,
        assists: 0,
        clean_sheets: 0,
        saves: 0,
        starts: None,
        form: "0.0".to_string(),
        selected_by_percent: "0.0".to_string(),
        photo: format!("{}.jpg", 100_000 + id),
        influence: "0.0".to_string(),
        creativity: "0.0".to_string(),
        threat: "0.0".to_string(),
        ict_index: "0.0".to_string(),
    }
}

/// Bootstrap payload with four teams and the four standard element types
pub fn payload(players: Vec<RawPlayer>) -> BootstrapPayload {
    let team = |id: u32, name: &str, short_name: &str| RawTeam {
        id,
        name: name.to_string(),
        short_name: short_name.to_string(),
    };
    let position = |id: u32, name: &str, short: &str| RawPosition {
        id,
        singular_name: name.to_string(),
        singular_name_short: short.to_string(),
    };

    BootstrapPayload {
        players,
        teams: vec![
            team(1, "Arsenal", "ARS"),
            team(2, "Aston Villa", "AVL"),
            team(3, "Chelsea", "CHE"),
            team(4, "Liverpool", "LIV"),
        ],
        positions: vec![
            position(1, "Goalkeeper", "GKP"),
            position(2, "Defender", "DEF"),
            position(3, "Midfielder", "MID"),
            position(4, "Forward", "FWD"),
        ],
    }
}

pub fn fixture(id: u32, team_h: u32, team_a: u32, finished: bool, kickoff: Option<&str>) -> RawFixture {
    RawFixture {
        id,
        event: None,
        team_h,
        team_a,
        finished,
        kickoff_time: kickoff.map(|k| k.parse().unwrap()),
    }
}

/// In-memory source that counts upstream calls
pub struct FakeSource {
    pub payload: Result<Arc<BootstrapPayload>, FetcherError>,
    pub fixtures: Result<Arc<Vec<RawFixture>>, FetcherError>,
    pub standings: LeagueStandings,
    pub bootstrap_calls: AtomicUsize,
}

impl FakeSource {
    pub fn serving(payload: BootstrapPayload) -> Self {
        Self {
            payload: Ok(Arc::new(payload)),
            fixtures: Ok(Arc::new(vec![])),
            standings: LeagueStandings { league: None, standings: StandingsPage::default() },
            bootstrap_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_with_status(status: u16) -> Self {
        let err = FetchError::Http { url: "http://upstream/bootstrap-static/".to_string(), status };
        Self { payload: Err(err.into()), ..Self::serving(payload(vec![])) }
    }
}

/// Standings row for `manager` with the given rank and total
pub fn standing(rank: u32, manager: &str, total: i32) -> RawStanding {
    RawStanding {
        rank,
        player_name: manager.to_string(),
        entry_name: format!("{manager} XI"),
        total,
        entry: rank,
    }
}

#[async_trait]
impl FplSource for FakeSource {
    async fn bootstrap(&self) -> FetchResult<Arc<BootstrapPayload>> {
        self.bootstrap_calls.fetch_add(1, Ordering::SeqCst);
        self.payload.clone()
    }

    async fn fixtures(&self) -> FetchResult<Arc<Vec<RawFixture>>> {
        self.fixtures.clone()
    }

    async fn player_history(&self, _player_id: u32) -> FetchResult<PlayerHistory> {
        Ok(PlayerHistory { history: vec![] })
    }

    async fn league_standings(&self, _league_id: u32) -> FetchResult<LeagueStandings> {
        Ok(self.standings.clone())
    }
}
