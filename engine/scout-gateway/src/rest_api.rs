//! REST API endpoints for the scout
//!
//! JSON endpoints for rankings, smart search, per-position reports, the
//! dream team builder, head-to-head comparison, player history and classic
//! league standings, plus an HTML rendering of the ranking table.

use crate::error::{handle_rejection, ApiError};
use crate::html;
use player_scout::{
    build_squad, compare_players, parse_compare_ids, parse_smart_query, position_report, FilterSpec,
    Formation, InvalidQueryError, PlayerRecord, ScoutService, DEFAULT_BUDGET,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;
use warp::Filter;

/// Defaults for the per-position report
pub const REPORT_MIN_MINUTES: u32 = 500;
pub const REPORT_TOP_N: usize = 10;

const REPORT_PARAMS: [&str; 3] = ["min_minutes", "max_cost", "top_n"];

/// Smart search response
#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub message: String,
    pub filters: FilterSpec,
    pub players: Vec<PlayerRecord>,
}

/// One gameweek of a player's history
#[derive(Debug, Serialize, PartialEq)]
pub struct GameweekPoints {
    pub round: u32,
    pub points: i64,
}

/// Player history response
#[derive(Debug, Serialize)]
pub struct PlayerHistoryResponse {
    pub player_id: u32,
    pub cumulative: bool,
    pub gameweeks: Vec<GameweekPoints>,
}

fn reject(err: impl Into<ApiError>) -> warp::Rejection {
    warp::reject::custom(err.into())
}

/// Rankings as JSON
pub async fn get_players(
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let filters = FilterSpec::from_params(&params).map_err(reject)?;
    let players = service.rank(&filters).await.map_err(reject)?;
    Ok(warp::reply::json(&players))
}

/// Rankings as an HTML table; failures render as an error page
pub async fn get_players_page(
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let ranked = match FilterSpec::from_params(&params) {
        Ok(filters) => service.rank(&filters).await.map(|players| (filters, players)).map_err(ApiError::from),
        Err(e) => Err(ApiError::from(e)),
    };

    let reply = match ranked {
        Ok((filters, players)) => warp::reply::with_status(
            warp::reply::html(html::render_players_page(&filters, &players)),
            StatusCode::OK,
        ),
        Err(e) => warp::reply::with_status(
            warp::reply::html(html::render_error_page(e.code, &e.message)),
            e.status,
        ),
    };
    Ok(reply)
}

/// Free-text search, e.g. `?q=best mid under 6.0`
pub async fn search_players(
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Some(key) = params.keys().find(|k| k.as_str() != "q") {
        return Err(reject(InvalidQueryError::UnknownParameter(key.clone())));
    }
    let text = params.get("q").map(String::as_str).unwrap_or_default();
    let smart = parse_smart_query(text);
    let players = service.rank(&smart.filters).await.map_err(reject)?;

    info!("Smart search '{}' matched {} players", text, players.len());
    Ok(warp::reply::json(&SearchResponse {
        query: text.to_string(),
        message: smart.message(),
        filters: smart.filters,
        players,
    }))
}

fn report_filters(params: &HashMap<String, String>) -> Result<FilterSpec, InvalidQueryError> {
    if let Some(key) = params.keys().find(|k| !REPORT_PARAMS.contains(&k.as_str())) {
        return Err(InvalidQueryError::UnknownParameter(key.clone()));
    }

    let mut merged = HashMap::from([
        ("min_minutes".to_string(), REPORT_MIN_MINUTES.to_string()),
        ("top_n".to_string(), REPORT_TOP_N.to_string()),
    ]);
    merged.extend(
        params
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    FilterSpec::from_params(&merged)
}

/// Top players per position by points per million
pub async fn positions_report(
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let filters = report_filters(&params).map_err(reject)?;
    let players = service.players().await.map_err(reject)?;
    let report =
        position_report(&players, filters.min_minutes, filters.max_cost, filters.top_n).map_err(reject)?;
    Ok(warp::reply::json(&report))
}

fn squad_params(params: &HashMap<String, String>) -> Result<(Formation, f64), InvalidQueryError> {
    let mut formation = Formation::default();
    let mut budget = DEFAULT_BUDGET;

    for (key, value) in params {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "formation" => formation = value.parse()?,
            "budget" => {
                budget = value.parse().map_err(|_| InvalidQueryError::InvalidNumber {
                    param: "budget".to_string(),
                    value: value.to_string(),
                })?
            }
            other => return Err(InvalidQueryError::UnknownParameter(other.to_string())),
        }
    }
    Ok((formation, budget))
}

/// Best eleven for a formation, reported against a budget
pub async fn get_squad(
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let (formation, budget) = squad_params(&params).map_err(reject)?;
    let players = service.players().await.map_err(reject)?;
    let squad = build_squad(&players, formation, budget).map_err(reject)?;

    info!(
        "Built {} squad: {} points for £{:.1}m (budget £{:.1}m)",
        formation, squad.total_points, squad.total_cost, budget
    );
    Ok(warp::reply::json(&squad))
}

fn parse_flag(param: &str, value: Option<&String>) -> Result<bool, InvalidQueryError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(InvalidQueryError::OutOfRange {
            param: param.to_string(),
            reason: format!("expected true or false, got '{other}'"),
        }),
    }
}

/// Gameweek points ordered by round, optionally as a running total
pub fn gameweek_points(history: &fpl_fetcher::PlayerHistory, cumulative: bool) -> Vec<GameweekPoints> {
    let mut rounds: Vec<(u32, i32)> = history.history.iter().map(|g| (g.round, g.total_points)).collect();
    rounds.sort_by_key(|(round, _)| *round);

    let mut running = 0i64;
    rounds
        .into_iter()
        .map(|(round, points)| {
            running += i64::from(points);
            let points = if cumulative { running } else { i64::from(points) };
            GameweekPoints { round, points }
        })
        .collect()
}

/// Per-gameweek points for one player
pub async fn player_history(
    player_id: u32,
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Some(key) = params.keys().find(|k| k.as_str() != "cumulative") {
        return Err(reject(InvalidQueryError::UnknownParameter(key.clone())));
    }
    let cumulative = parse_flag("cumulative", params.get("cumulative")).map_err(reject)?;
    let history = service.player_history(player_id).await.map_err(reject)?;

    Ok(warp::reply::json(&PlayerHistoryResponse {
        player_id,
        cumulative,
        gameweeks: gameweek_points(&history, cumulative),
    }))
}

/// Two players side by side, each metric scaled 0-100 between them
pub async fn compare(
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Some(key) = params.keys().find(|k| k.as_str() != "ids") {
        return Err(reject(InvalidQueryError::UnknownParameter(key.clone())));
    }
    let ids = parse_compare_ids(params.get("ids").map(String::as_str).unwrap_or_default()).map_err(reject)?;
    let players = service.players().await.map_err(reject)?;
    let compared = compare_players(&players, &ids).map_err(reject)?;

    info!("Compared players {} and {}", ids[0], ids[1]);
    Ok(warp::reply::json(&compared))
}

/// Classic league table with the leaders' average total
pub async fn league_standings(
    league_id: u32,
    params: HashMap<String, String>,
    service: Arc<ScoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Some(key) = params.keys().next() {
        return Err(reject(InvalidQueryError::UnknownParameter(key.clone())));
    }
    let summary = service.league_standings(league_id).await.map_err(reject)?;
    Ok(warp::reply::json(&summary))
}

/// Drop the cached upstream payload
pub async fn invalidate_cache(service: Arc<ScoutService>) -> Result<impl warp::Reply, warp::Rejection> {
    let invalidated = service.invalidate_cache();
    Ok(warp::reply::json(&serde_json::json!({ "invalidated": invalidated })))
}

/// Create all REST API routes
pub fn create_routes(
    service: Arc<ScoutService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let service_filter = warp::any().map(move || service.clone());

    // Rankings
    let players = warp::path!("api" / "players")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(get_players);

    let players_page = warp::path!("players")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(get_players_page);

    let search = warp::path!("api" / "search")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(search_players);

    let report = warp::path!("api" / "positions" / "report")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(positions_report);

    let squad = warp::path!("api" / "squad")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(get_squad);

    let history = warp::path!("api" / "players" / u32 / "history")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(player_history);

    let compare = warp::path!("api" / "players" / "compare")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(compare);

    let league = warp::path!("api" / "leagues" / u32 / "standings")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(service_filter.clone())
        .and_then(league_standings);

    let invalidate = warp::path!("api" / "admin" / "cache" / "invalidate")
        .and(warp::post())
        .and(service_filter.clone())
        .and_then(invalidate_cache);

    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    players
        .or(players_page)
        .or(search)
        .or(report)
        .or(squad)
        .or(history)
        .or(compare)
        .or(league)
        .or(invalidate)
        .or(health)
        .recover(handle_rejection)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST", "OPTIONS"]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_fetcher::{GameweekHistory, PlayerHistory};

    fn history(rounds: &[(u32, i32)]) -> PlayerHistory {
        PlayerHistory {
            history: rounds
                .iter()
                .map(|&(round, total_points)| GameweekHistory { round, total_points, minutes: 90 })
                .collect(),
        }
    }

    #[test]
    fn test_gameweek_points_sorted_and_cumulative() {
        let h = history(&[(3, 2), (1, 6), (2, -1)]);

        let plain: Vec<(u32, i64)> = gameweek_points(&h, false).iter().map(|g| (g.round, g.points)).collect();
        assert_eq!(plain, vec![(1, 6), (2, -1), (3, 2)]);

        let running: Vec<i64> = gameweek_points(&h, true).iter().map(|g| g.points).collect();
        assert_eq!(running, vec![6, 5, 7]);
    }

    #[test]
    fn test_report_filters_defaults_and_overrides() {
        let filters = report_filters(&HashMap::new()).unwrap();
        assert_eq!(filters.min_minutes, REPORT_MIN_MINUTES);
        assert_eq!(filters.top_n, REPORT_TOP_N);

        let params = HashMap::from([
            ("top_n".to_string(), "3".to_string()),
            ("min_minutes".to_string(), "".to_string()),
        ]);
        let filters = report_filters(&params).unwrap();
        assert_eq!(filters.top_n, 3);
        assert_eq!(filters.min_minutes, REPORT_MIN_MINUTES);

        let params = HashMap::from([("sort_by".to_string(), "cost".to_string())]);
        assert_eq!(
            report_filters(&params).unwrap_err(),
            InvalidQueryError::UnknownParameter("sort_by".to_string())
        );
    }

    #[test]
    fn test_squad_params() {
        let (formation, budget) = squad_params(&HashMap::new()).unwrap();
        assert_eq!(formation, Formation::default());
        assert_eq!(budget, DEFAULT_BUDGET);

        let params = HashMap::from([("budget".to_string(), "lots".to_string())]);
        assert!(matches!(
            squad_params(&params).unwrap_err(),
            InvalidQueryError::InvalidNumber { .. }
        ));

        let params = HashMap::from([("formation".to_string(), "5-4-1".to_string())]);
        assert_eq!(
            squad_params(&params).unwrap_err(),
            InvalidQueryError::UnknownFormation("5-4-1".to_string())
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag("cumulative", None).unwrap());
        assert!(parse_flag("cumulative", Some(&"TRUE".to_string())).unwrap());
        assert!(!parse_flag("cumulative", Some(&"0".to_string())).unwrap());
        assert!(parse_flag("cumulative", Some(&"maybe".to_string())).is_err());
    }
}
