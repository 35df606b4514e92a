//! Raw payload → [`PlayerRecord`] conversion
//!
//! Resolves team and position ids against the lookup tables carried by the
//! same payload, converts cost from tenths into millions and computes the
//! derived metrics. Output keeps the upstream player order.

use crate::error::LookupError;
use crate::types::{PlayerRecord, Position, PositionRecord, TeamRecord};
use fpl_fetcher::{BootstrapPayload, RawFixture, RawPlayer};
use std::collections::{HashMap, HashSet};
use tracing::debug;

const PHOTO_BASE_URL: &str = "https://resources.premierleague.com/premierleague/photos/players/110x140";
const FIXTURES_SHOWN: usize = 3;
const NO_FIXTURES: &str = "No fixtures scheduled";

/// Team and position lookup tables built from one payload
///
/// Element types that are none of the four playing positions (the
/// "Manager" type, for one) are remembered but carry no record; players of
/// those types are left out of the normalized output.
#[derive(Debug, Clone)]
pub struct LookupTables {
    teams: HashMap<u32, TeamRecord>,
    positions: HashMap<u32, PositionRecord>,
    other_types: HashSet<u32>,
}

impl LookupTables {
    pub fn from_payload(raw: &BootstrapPayload) -> Self {
        let teams = raw
            .teams
            .iter()
            .map(|t| {
                let record = TeamRecord { id: t.id, name: t.name.clone(), short_name: t.short_name.clone() };
                (t.id, record)
            })
            .collect();

        let mut positions = HashMap::with_capacity(raw.positions.len());
        let mut other_types = HashSet::new();
        for p in &raw.positions {
            let position = Position::from_label(&p.singular_name_short)
                .or_else(|| Position::from_label(&p.singular_name));
            match position {
                Some(position) => {
                    positions.insert(p.id, PositionRecord { id: p.id, name: p.singular_name.clone(), position });
                }
                None => {
                    debug!("Skipping non-playing element type {} ({})", p.id, p.singular_name);
                    other_types.insert(p.id);
                }
            }
        }

        Self { teams, positions, other_types }
    }

    pub fn team(&self, team_id: u32) -> Option<&TeamRecord> {
        self.teams.get(&team_id)
    }

    pub fn position(&self, position_id: u32) -> Option<&PositionRecord> {
        self.positions.get(&position_id)
    }

    /// Element type defined by the payload but not one of the four positions
    pub fn is_other_type(&self, position_id: u32) -> bool {
        self.other_types.contains(&position_id)
    }
}

/// Normalize every player of the payload
pub fn normalize(raw: &BootstrapPayload) -> Result<Vec<PlayerRecord>, LookupError> {
    let tables = LookupTables::from_payload(raw);
    let players = normalize_all(raw, &tables, None)?;

    debug!("Normalized {} players", players.len());
    Ok(players)
}

/// Normalize every player and attach the team's next fixtures
pub fn normalize_with_fixtures(
    raw: &BootstrapPayload,
    fixtures: &[RawFixture],
) -> Result<Vec<PlayerRecord>, LookupError> {
    let tables = LookupTables::from_payload(raw);
    let labels = next_fixtures_by_team(&tables, fixtures);
    let players = normalize_all(raw, &tables, Some(&labels))?;

    debug!("Normalized {} players with fixtures for {} teams", players.len(), labels.len());
    Ok(players)
}

fn normalize_all(
    raw: &BootstrapPayload,
    tables: &LookupTables,
    fixture_labels: Option<&HashMap<u32, String>>,
) -> Result<Vec<PlayerRecord>, LookupError> {
    let mut players = Vec::with_capacity(raw.players.len());
    for p in &raw.players {
        if tables.is_other_type(p.element_type) {
            continue;
        }
        players.push(normalize_player(p, tables, fixture_labels)?);
    }
    Ok(players)
}

fn normalize_player(
    raw: &RawPlayer,
    tables: &LookupTables,
    fixture_labels: Option<&HashMap<u32, String>>,
) -> Result<PlayerRecord, LookupError> {
    let team = tables
        .team(raw.team)
        .ok_or(LookupError::UnknownTeam { player_id: raw.id, team_id: raw.team })?;
    let position = tables
        .position(raw.element_type)
        .ok_or(LookupError::UnknownPosition { player_id: raw.id, position_id: raw.element_type })?
        .position;

    let cost = cost_from_tenths(raw.now_cost);
    let games = games_played(raw);
    let points = f64::from(raw.total_points);
    let form = parse_decimal(&raw.form);
    let goals_per_90 = per_90(raw.goals_scored, raw.minutes);
    let assists_per_90 = per_90(raw.assists, raw.minutes);

    let next_fixtures = fixture_labels.map(|labels| {
        labels.get(&raw.team).cloned().unwrap_or_else(|| NO_FIXTURES.to_string())
    });

    Ok(PlayerRecord {
        id: raw.id,
        name: raw.web_name.clone(),
        full_name: format!("{} {}", raw.first_name, raw.second_name).trim().to_string(),
        team: team.name.clone(),
        team_short: team.short_name.clone(),
        position,
        cost,
        total_points: raw.total_points,
        minutes: raw.minutes,
        goals: raw.goals_scored,
        assists: raw.assists,
        clean_sheets: raw.clean_sheets,
        saves: raw.saves,
        games,
        form,
        selected_by_percent: parse_decimal(&raw.selected_by_percent),
        photo_url: photo_url(&raw.photo, raw.code),
        next_fixtures,
        ppm: ratio(points, cost),
        ppg: ratio(points, f64::from(games)),
        goals_per_90,
        assists_per_90,
        points_per_90: ratio(points * 90.0, f64::from(raw.minutes)),
        goal_involvements_per_90: goals_per_90 + assists_per_90,
        clean_sheets_per_90: per_90(raw.clean_sheets, raw.minutes),
        saves_per_90: per_90(raw.saves, raw.minutes),
        form_value: ratio(form, cost),
        influence: parse_decimal(&raw.influence),
        creativity: parse_decimal(&raw.creativity),
        threat: parse_decimal(&raw.threat),
        ict_index: parse_decimal(&raw.ict_index),
    })
}

/// Upstream cost is in tenths of a million
pub fn cost_from_tenths(now_cost: u32) -> f64 {
    f64::from(now_cost) / 10.0
}

/// Starts when the payload reports them, else minutes / 90 rounded
fn games_played(raw: &RawPlayer) -> u32 {
    match raw.starts {
        Some(starts) if starts > 0 => starts,
        _ => (f64::from(raw.minutes) / 90.0).round() as u32,
    }
}

fn per_90(count: u32, minutes: u32) -> f64 {
    ratio(f64::from(count) * 90.0, f64::from(minutes))
}

/// `num / den`, or 0 when the result would not be finite
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return 0.0;
    }
    let value = num / den;
    if value.is_finite() { value } else { 0.0 }
}

fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Headshot URL from the payload's `photo` file name, falling back to the
/// player code
pub fn photo_url(photo: &str, code: u32) -> String {
    let stem = photo.trim_end_matches(".jpg").trim_end_matches(".png");
    let stem = if stem.is_empty() { code.to_string() } else { stem.to_string() };
    let id = if stem.starts_with('p') { stem } else { format!("p{stem}") };
    format!("{PHOTO_BASE_URL}/{id}.png")
}

/// "vs ARS (H), @ CHE (A), ..." per team, from unfinished fixtures in
/// kickoff order; fixtures without a kickoff time sort last
pub fn next_fixtures_by_team(tables: &LookupTables, fixtures: &[RawFixture]) -> HashMap<u32, String> {
    let mut upcoming: Vec<&RawFixture> = fixtures.iter().filter(|f| !f.finished).collect();
    upcoming.sort_by_key(|f| (f.kickoff_time.is_none(), f.kickoff_time));

    let short_name = |team_id: u32| {
        tables.team(team_id).map(|t| t.short_name.as_str()).unwrap_or("UNK").to_string()
    };

    let mut per_team: HashMap<u32, Vec<String>> = HashMap::new();
    for fixture in upcoming {
        let home = per_team.entry(fixture.team_h).or_default();
        if home.len() < FIXTURES_SHOWN {
            home.push(format!("vs {} (H)", short_name(fixture.team_a)));
        }
        let away = per_team.entry(fixture.team_a).or_default();
        if away.len() < FIXTURES_SHOWN {
            away.push(format!("@ {} (A)", short_name(fixture.team_h)));
        }
    }

    per_team.into_iter().map(|(team_id, labels)| (team_id, labels.join(", "))).collect()
}
