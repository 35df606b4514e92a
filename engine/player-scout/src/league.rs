//! Classic league standings summary

use fpl_fetcher::LeagueStandings;
use serde::Serialize;

/// Number of leading managers averaged in [`LeagueSummary::top_average`]
pub const LEADERS_AVERAGED: usize = 10;

/// One row of a league table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStanding {
    pub rank: u32,
    pub manager: String,
    pub team_name: String,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueSummary {
    pub league_id: u32,
    pub league_name: Option<String>,
    pub teams_analyzed: usize,
    /// Mean total of the first ten rows; 0 for an empty table
    pub top_average: f64,
    /// More rows exist upstream beyond this page
    pub has_more: bool,
    pub standings: Vec<LeagueStanding>,
}

/// Table rows in upstream order plus the leaders' average total
pub fn summarize_league(league_id: u32, raw: &LeagueStandings) -> LeagueSummary {
    let standings: Vec<LeagueStanding> = raw
        .standings
        .results
        .iter()
        .map(|r| LeagueStanding {
            rank: r.rank,
            manager: r.player_name.clone(),
            team_name: r.entry_name.clone(),
            total: r.total,
        })
        .collect();

    let leaders = &standings[..standings.len().min(LEADERS_AVERAGED)];
    let top_average = if leaders.is_empty() {
        0.0
    } else {
        leaders.iter().map(|s| f64::from(s.total)).sum::<f64>() / leaders.len() as f64
    };

    LeagueSummary {
        league_id,
        league_name: raw.league.as_ref().map(|l| l.name.clone()),
        teams_analyzed: standings.len(),
        top_average,
        has_more: raw.standings.has_next,
        standings,
    }
}
