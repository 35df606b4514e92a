use crate::error::InvalidQueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position category of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// All positions in squad order
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    /// FPL short code (e.g. "MID")
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }

    /// Match a full name, plural or short code, ignoring case
    pub fn from_label(label: &str) -> Option<Position> {
        let label = label.trim();
        Position::ALL.into_iter().find(|p| {
            label.eq_ignore_ascii_case(p.name())
                || label.eq_ignore_ascii_case(p.plural())
                || label.eq_ignore_ascii_case(p.code())
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_label(s).ok_or_else(|| InvalidQueryError::UnknownPosition(s.to_string()))
    }
}

/// Team lookup entry (id → display names)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub id: u32,
    pub name: String,
    pub short_name: String,
}

/// Position lookup entry (element type id → category)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRecord {
    pub id: u32,
    pub name: String,
    pub position: Position,
}

/// A normalized player with derived value metrics
///
/// Built once per fetch by the normalizer and only handed out by shared
/// reference afterwards. Every derived metric is finite; a zero denominator
/// yields 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub id: u32,
    /// Short display name (e.g. "Salah")
    pub name: String,
    /// "First Second"
    pub full_name: String,
    pub team: String,
    pub team_short: String,
    pub position: Position,
    /// Cost in millions (e.g. 8.0)
    pub cost: f64,
    pub total_points: i32,
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub saves: u32,
    /// Games started, or estimated from minutes when the payload has no starts
    pub games: u32,
    pub form: f64,
    pub selected_by_percent: f64,
    pub photo_url: String,
    /// e.g. "vs ARS (H), @ CHE (A)"; `None` when fixtures were not loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_fixtures: Option<String>,

    /// Points per million
    pub ppm: f64,
    /// Points per game
    pub ppg: f64,
    pub goals_per_90: f64,
    pub assists_per_90: f64,
    pub points_per_90: f64,
    pub goal_involvements_per_90: f64,
    pub clean_sheets_per_90: f64,
    pub saves_per_90: f64,
    /// Form per million
    pub form_value: f64,

    /// ICT index and its components, as published upstream
    pub influence: f64,
    pub creativity: f64,
    pub threat: f64,
    pub ict_index: f64,
}
