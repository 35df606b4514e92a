//! Error types for the scout pipeline

use fpl_fetcher::FetcherError;
use thiserror::Error;

/// Payload inconsistency: a player references a team or position that the
/// same payload does not define
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Player {player_id} references unknown team {team_id}")]
    UnknownTeam { player_id: u32, team_id: u32 },

    #[error("Player {player_id} references unknown position type {position_id}")]
    UnknownPosition { player_id: u32, position_id: u32 },
}

/// Caller supplied a parameter that cannot be turned into a valid query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidQueryError {
    #[error("Unknown query parameter '{0}'")]
    UnknownParameter(String),

    #[error("Unknown sort key '{0}'")]
    UnknownSortKey(String),

    #[error("Unknown position '{0}'")]
    UnknownPosition(String),

    #[error("Parameter '{param}' must be a number, got '{value}'")]
    InvalidNumber { param: String, value: String },

    #[error("Parameter '{param}' is out of range: {reason}")]
    OutOfRange { param: String, reason: String },

    #[error("min_cost {min_cost} is greater than max_cost {max_cost}")]
    CostRange { min_cost: f64, max_cost: f64 },

    #[error("Unknown formation '{0}'")]
    UnknownFormation(String),

    #[error("No player with id {0}")]
    UnknownPlayer(u32),
}

/// Any failure of a pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoutError {
    #[error(transparent)]
    Fetch(#[from] FetcherError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    InvalidQuery(#[from] InvalidQueryError),
}

impl InvalidQueryError {
    pub(crate) fn out_of_range(param: &str, reason: impl Into<String>) -> Self {
        InvalidQueryError::OutOfRange { param: param.to_string(), reason: reason.into() }
    }

    pub(crate) fn invalid_number(param: &str, value: &str) -> Self {
        InvalidQueryError::InvalidNumber { param: param.to_string(), value: value.to_string() }
    }

    /// Name of the offending request parameter, when there is one
    pub fn parameter(&self) -> Option<&str> {
        match self {
            InvalidQueryError::UnknownParameter(name) => Some(name),
            InvalidQueryError::UnknownSortKey(_) => Some("sort_by"),
            InvalidQueryError::UnknownPosition(_) => Some("position"),
            InvalidQueryError::InvalidNumber { param, .. }
            | InvalidQueryError::OutOfRange { param, .. } => Some(param),
            InvalidQueryError::CostRange { .. } => Some("min_cost"),
            InvalidQueryError::UnknownFormation(_) => Some("formation"),
            InvalidQueryError::UnknownPlayer(_) => Some("ids"),
        }
    }
}

/// Result type for scout operations
pub type ScoutResult<T> = Result<T, ScoutError>;
