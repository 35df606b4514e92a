//! Player Scout - value rankings over FPL player data
//!
//! Turns the raw bootstrap payload into immutable [`PlayerRecord`]s with
//! derived per-cost, per-game and per-90 metrics, then answers filter, sort
//! and limit queries over them.
//!
//! Pipeline: [`fpl_fetcher::FplSource`] → [`normalizer::normalize`] →
//! [`query::query`], wired together by [`ScoutService`].

pub mod compare;
pub mod error;
pub mod league;
pub mod normalizer;
pub mod query;
pub mod report;
pub mod search;
pub mod service;
pub mod squad;
pub mod types;

#[cfg(test)]
mod testutil;

pub use compare::{compare_players, parse_compare_ids, CompareMetric, ComparedPlayer, MetricScore};
pub use error::{InvalidQueryError, LookupError, ScoutError};
pub use league::{summarize_league, LeagueStanding, LeagueSummary};
pub use normalizer::{normalize, normalize_with_fixtures};
pub use query::{query, FilterSpec, SortKey, DEFAULT_TOP_N, MAX_TOP_N};
pub use report::{position_report, PositionReport};
pub use search::{parse_smart_query, SmartQuery};
pub use service::ScoutService;
pub use squad::{build_squad, Formation, Squad, DEFAULT_BUDGET};
pub use types::{PlayerRecord, Position, PositionRecord, TeamRecord};
