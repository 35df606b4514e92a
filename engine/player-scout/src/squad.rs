//! Dream team builder
//!
//! Picks one goalkeeper plus the formation's outfield counts, taking the
//! highest scorers of each position. The budget is reported against, not
//! enforced.

use crate::error::InvalidQueryError;
use crate::types::{PlayerRecord, Position};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Budget used when the caller gives none, in millions
pub const DEFAULT_BUDGET: f64 = 100.0;

const SUPPORTED_FORMATIONS: [(u8, u8, u8); 4] = [(3, 4, 3), (3, 5, 2), (4, 4, 2), (4, 3, 3)];

/// Outfield shape, e.g. 3-4-3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Formation {
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
}

impl Formation {
    pub fn count(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => 1,
            Position::Defender => self.defenders as usize,
            Position::Midfielder => self.midfielders as usize,
            Position::Forward => self.forwards as usize,
        }
    }
}

impl Default for Formation {
    fn default() -> Self {
        Self { defenders: 3, midfielders: 4, forwards: 3 }
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }
}

impl FromStr for Formation {
    type Err = InvalidQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || InvalidQueryError::UnknownFormation(s.to_string());
        let parts = s
            .trim()
            .split('-')
            .map(|part| part.parse::<u8>().map_err(|_| unknown()))
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [d, m, f] if SUPPORTED_FORMATIONS.contains(&(*d, *m, *f)) => {
                Ok(Formation { defenders: *d, midfielders: *m, forwards: *f })
            }
            _ => Err(unknown()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Squad<'a> {
    pub formation: Formation,
    pub budget: f64,
    /// Goalkeeper, defenders, midfielders, forwards
    pub picks: Vec<&'a PlayerRecord>,
    pub total_points: i64,
    pub total_cost: f64,
    /// Budget minus total cost; negative when over budget
    pub remaining_budget: f64,
}

pub fn build_squad<'a>(
    players: &'a [PlayerRecord],
    formation: Formation,
    budget: f64,
) -> Result<Squad<'a>, InvalidQueryError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(InvalidQueryError::out_of_range(
            "budget",
            format!("must be a positive number, got {budget}"),
        ));
    }

    let mut picks = Vec::with_capacity(11);
    for position in Position::ALL {
        let mut candidates: Vec<&PlayerRecord> =
            players.iter().filter(|p| p.position == position).collect();
        candidates.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        picks.extend(candidates.into_iter().take(formation.count(position)));
    }

    let total_points = picks.iter().map(|p| i64::from(p.total_points)).sum();
    let total_cost: f64 = picks.iter().map(|p| p.cost).sum();

    Ok(Squad { formation, budget, picks, total_points, total_cost, remaining_budget: budget - total_cost })
}
