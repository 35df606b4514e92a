use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `bootstrap-static` aggregate: every player, team and position
/// category for the current season
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BootstrapPayload {
    #[serde(rename = "elements")]
    pub players: Vec<RawPlayer>,

    pub teams: Vec<RawTeam>,

    #[serde(rename = "element_types")]
    pub positions: Vec<RawPosition>,
}

/// One entry of `elements`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawPlayer {
    pub id: u32,

    /// Stable cross-season player code (used for photo URLs)
    #[serde(default)]
    pub code: u32,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub second_name: String,

    /// Short display name (e.g. "Salah")
    pub web_name: String,

    /// Team id, resolved against `teams`
    pub team: u32,

    /// Position id, resolved against `element_types`
    pub element_type: u32,

    /// Cost in tenths of a million (e.g. 80 = £8.0m)
    pub now_cost: u32,

    pub total_points: i32,

    pub minutes: u32,

    #[serde(default)]
    pub goals_scored: u32,

    #[serde(default)]
    pub assists: u32,

    #[serde(default)]
    pub clean_sheets: u32,

    #[serde(default)]
    pub saves: u32,

    /// Games started; absent in older payloads
    #[serde(default)]
    pub starts: Option<u32>,

    /// Recent form, serialized upstream as a decimal string
    #[serde(default)]
    pub form: String,

    /// Ownership percentage, serialized upstream as a decimal string
    #[serde(default)]
    pub selected_by_percent: String,

    /// Photo file name (e.g. "118748.jpg")
    #[serde(default)]
    pub photo: String,

    /// ICT index components, serialized upstream as decimal strings
    #[serde(default)]
    pub influence: String,

    #[serde(default)]
    pub creativity: String,

    #[serde(default)]
    pub threat: String,

    #[serde(default)]
    pub ict_index: String,
}

/// One entry of `teams`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawTeam {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

/// One entry of `element_types`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawPosition {
    pub id: u32,

    /// e.g. "Midfielder"
    pub singular_name: String,

    /// e.g. "MID"
    #[serde(default)]
    pub singular_name_short: String,
}

/// One entry of the `fixtures` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawFixture {
    pub id: u32,

    /// Gameweek; `None` for unscheduled fixtures
    #[serde(default)]
    pub event: Option<u32>,

    pub team_h: u32,
    pub team_a: u32,

    #[serde(default)]
    pub finished: bool,

    #[serde(default)]
    pub kickoff_time: Option<DateTime<Utc>>,
}

/// The `element-summary/{id}` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerHistory {
    pub history: Vec<GameweekHistory>,
}

/// Points scored by a player in one gameweek
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameweekHistory {
    pub round: u32,
    pub total_points: i32,
    #[serde(default)]
    pub minutes: u32,
}

/// The `leagues-classic/{id}/standings` response (first page)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeagueStandings {
    #[serde(default)]
    pub league: Option<RawLeague>,

    #[serde(default)]
    pub standings: StandingsPage,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawLeague {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StandingsPage {
    #[serde(default)]
    pub has_next: bool,

    #[serde(default)]
    pub results: Vec<RawStanding>,
}

/// One manager's row in a classic league table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawStanding {
    pub rank: u32,

    /// Manager name
    pub player_name: String,

    /// FPL team name
    pub entry_name: String,

    pub total: i32,

    #[serde(default)]
    pub entry: u32,
}

impl BootstrapPayload {
    pub fn team(&self, team_id: u32) -> Option<&RawTeam> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}
