//! Filter, sort and limit queries over normalized players

use crate::error::InvalidQueryError;
use crate::types::{PlayerRecord, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Result size when the caller does not ask for one
pub const DEFAULT_TOP_N: usize = 50;

/// Largest result size a caller may ask for
pub const MAX_TOP_N: usize = 500;

/// Field a ranking is ordered by (always descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Ppm,
    Ppg,
    TotalPoints,
    Cost,
    GoalsPer90,
    AssistsPer90,
    Minutes,
    PointsPer90,
    Form,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Ppm,
        SortKey::Ppg,
        SortKey::TotalPoints,
        SortKey::Cost,
        SortKey::GoalsPer90,
        SortKey::AssistsPer90,
        SortKey::Minutes,
        SortKey::PointsPer90,
        SortKey::Form,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Ppm => "ppm",
            SortKey::Ppg => "ppg",
            SortKey::TotalPoints => "total_points",
            SortKey::Cost => "cost",
            SortKey::GoalsPer90 => "goals_per_90",
            SortKey::AssistsPer90 => "assists_per_90",
            SortKey::Minutes => "minutes",
            SortKey::PointsPer90 => "points_per_90",
            SortKey::Form => "form",
        }
    }

    /// The player's value for this key
    pub fn value(&self, player: &PlayerRecord) -> f64 {
        match self {
            SortKey::Ppm => player.ppm,
            SortKey::Ppg => player.ppg,
            SortKey::TotalPoints => f64::from(player.total_points),
            SortKey::Cost => player.cost,
            SortKey::GoalsPer90 => player.goals_per_90,
            SortKey::AssistsPer90 => player.assists_per_90,
            SortKey::Minutes => f64::from(player.minutes),
            SortKey::PointsPer90 => player.points_per_90,
            SortKey::Form => player.form,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| wanted.eq_ignore_ascii_case(key.as_str()))
            .ok_or_else(|| InvalidQueryError::UnknownSortKey(s.to_string()))
    }
}

/// A validated ranking query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    /// Keep only this position; `None` keeps all
    pub position: Option<Position>,
    /// Keep players with at least this many minutes
    pub min_minutes: u32,
    /// Keep players costing at most this much
    pub max_cost: Option<f64>,
    /// Keep players costing at least this much
    pub min_cost: Option<f64>,
    pub sort_by: SortKey,
    /// Truncate the sorted result to this many players
    pub top_n: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            position: None,
            min_minutes: 0,
            max_cost: None,
            min_cost: None,
            sort_by: SortKey::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl FilterSpec {
    /// Build a query from loosely typed request parameters.
    ///
    /// Recognized keys: `position`, `min_minutes`, `max_cost`, `min_cost`,
    /// `sort_by`, `top_n`. Empty values count as absent. Anything else, or
    /// any value that does not parse into a valid query, is rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, InvalidQueryError> {
        let mut spec = FilterSpec::default();

        for (key, value) in params {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "position" => spec.position = Some(value.parse()?),
                "min_minutes" => spec.min_minutes = parse_count("min_minutes", value)?,
                "max_cost" => spec.max_cost = Some(parse_cost("max_cost", value)?),
                "min_cost" => spec.min_cost = Some(parse_cost("min_cost", value)?),
                "sort_by" => spec.sort_by = value.parse()?,
                "top_n" => spec.top_n = parse_count("top_n", value)? as usize,
                other => return Err(InvalidQueryError::UnknownParameter(other.to_string())),
            }
        }

        spec.validate()?;
        Ok(spec)
    }

    /// Check ranges that the type system does not enforce
    pub fn validate(&self) -> Result<(), InvalidQueryError> {
        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            return Err(InvalidQueryError::out_of_range(
                "top_n",
                format!("must be between 1 and {MAX_TOP_N}, got {}", self.top_n),
            ));
        }
        for (param, cost) in [("max_cost", self.max_cost), ("min_cost", self.min_cost)] {
            if let Some(cost) = cost {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(InvalidQueryError::out_of_range(
                        param,
                        format!("must be a non-negative number, got {cost}"),
                    ));
                }
            }
        }
        if let (Some(min_cost), Some(max_cost)) = (self.min_cost, self.max_cost) {
            if min_cost > max_cost {
                return Err(InvalidQueryError::CostRange { min_cost, max_cost });
            }
        }
        Ok(())
    }

    /// Whether a player passes every filter
    pub fn matches(&self, player: &PlayerRecord) -> bool {
        self.position.map_or(true, |p| player.position == p)
            && player.minutes >= self.min_minutes
            && self.max_cost.map_or(true, |max| player.cost <= max)
            && self.min_cost.map_or(true, |min| player.cost >= min)
    }
}

/// Filter, sort descending by `sort_by` and truncate to `top_n`.
///
/// Ties keep their input order. The result borrows from `players`.
pub fn query<'a>(
    players: &'a [PlayerRecord],
    filters: &FilterSpec,
) -> Result<Vec<&'a PlayerRecord>, InvalidQueryError> {
    filters.validate()?;

    let key = filters.sort_by;
    let mut selected: Vec<&PlayerRecord> = players.iter().filter(|p| filters.matches(p)).collect();
    selected.sort_by(|a, b| key.value(b).total_cmp(&key.value(a)));
    selected.truncate(filters.top_n);
    Ok(selected)
}

fn parse_count(param: &str, value: &str) -> Result<u32, InvalidQueryError> {
    let parsed: i64 = value.parse().map_err(|_| InvalidQueryError::invalid_number(param, value))?;
    u32::try_from(parsed).map_err(|_| {
        InvalidQueryError::out_of_range(param, format!("must be a non-negative integer, got {parsed}"))
    })
}

fn parse_cost(param: &str, value: &str) -> Result<f64, InvalidQueryError> {
    let parsed: f64 = value.parse().map_err(|_| InvalidQueryError::invalid_number(param, value))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(InvalidQueryError::out_of_range(
            param,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(parsed)
}
