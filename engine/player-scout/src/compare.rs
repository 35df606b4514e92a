//! Head-to-head player comparison
//!
//! Each metric is min-max scaled across the compared players onto 0-100, so
//! the leader on a metric scores 100 and the other 0. Equal values score 0.

use crate::error::InvalidQueryError;
use crate::types::PlayerRecord;
use serde::Serialize;

/// Metric scaled in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMetric {
    Creativity,
    Influence,
    Threat,
    IctIndex,
    PointsPerGame,
}

impl CompareMetric {
    pub const ALL: [CompareMetric; 5] = [
        CompareMetric::Creativity,
        CompareMetric::Influence,
        CompareMetric::Threat,
        CompareMetric::IctIndex,
        CompareMetric::PointsPerGame,
    ];

    pub fn value(&self, player: &PlayerRecord) -> f64 {
        match self {
            CompareMetric::Creativity => player.creativity,
            CompareMetric::Influence => player.influence,
            CompareMetric::Threat => player.threat,
            CompareMetric::IctIndex => player.ict_index,
            CompareMetric::PointsPerGame => player.ppg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    pub metric: CompareMetric,
    pub value: f64,
    /// 0-100 relative to the other compared players
    pub scaled: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparedPlayer<'a> {
    pub player: &'a PlayerRecord,
    pub scores: Vec<MetricScore>,
}

/// Parse `"a,b"` into two distinct player ids
pub fn parse_compare_ids(raw: &str) -> Result<[u32; 2], InvalidQueryError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u32>().map_err(|_| InvalidQueryError::invalid_number("ids", part)))
        .collect::<Result<Vec<_>, _>>()?;

    match ids.as_slice() {
        [a, b] if a == b => Err(InvalidQueryError::out_of_range("ids", "the two players must differ")),
        [a, b] => Ok([*a, *b]),
        _ => Err(InvalidQueryError::out_of_range(
            "ids",
            format!("expected exactly two player ids, got {}", ids.len()),
        )),
    }
}

/// Compare the given players, in the order their ids were given
pub fn compare_players<'a>(
    players: &'a [PlayerRecord],
    ids: &[u32],
) -> Result<Vec<ComparedPlayer<'a>>, InvalidQueryError> {
    let selected = ids
        .iter()
        .map(|id| players.iter().find(|p| p.id == *id).ok_or(InvalidQueryError::UnknownPlayer(*id)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut compared: Vec<ComparedPlayer> =
        selected.iter().map(|&player| ComparedPlayer { player, scores: Vec::new() }).collect();

    for metric in CompareMetric::ALL {
        let values: Vec<f64> = selected.iter().map(|p| metric.value(p)).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };

        for (entry, value) in compared.iter_mut().zip(values) {
            entry.scores.push(MetricScore { metric, value, scaled: (value - min) / range * 100.0 });
        }
    }

    Ok(compared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::testutil::{payload, raw_player};

    fn pair() -> Vec<PlayerRecord> {
        let mut a = raw_player(1, 3, 100, 1800, 120);
        a.creativity = "800.0".to_string();
        a.influence = "500.0".to_string();
        a.threat = "300.0".to_string();
        a.ict_index = "160.0".to_string();
        let mut b = raw_player(2, 3, 80, 1800, 60);
        b.creativity = "200.0".to_string();
        b.influence = "500.0".to_string();
        b.threat = "900.0".to_string();
        b.ict_index = "160.0".to_string();
        normalize(&payload(vec![a, b, raw_player(3, 4, 60, 90, 2)])).unwrap()
    }

    fn scaled(entry: &ComparedPlayer, metric: CompareMetric) -> f64 {
        entry.scores.iter().find(|s| s.metric == metric).map(|s| s.scaled).unwrap()
    }

    #[test]
    fn test_scores_are_min_max_scaled() {
        let players = pair();
        let result = compare_players(&players, &[1, 2]).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].player.id, 1);

        assert_eq!(scaled(&result[0], CompareMetric::Creativity), 100.0);
        assert_eq!(scaled(&result[1], CompareMetric::Creativity), 0.0);
        assert_eq!(scaled(&result[0], CompareMetric::Threat), 0.0);
        assert_eq!(scaled(&result[1], CompareMetric::Threat), 100.0);
        // both played 20 games: 6.0 vs 3.0 points per game
        assert_eq!(scaled(&result[0], CompareMetric::PointsPerGame), 100.0);
        assert_eq!(result[1].scores.len(), CompareMetric::ALL.len());
    }

    #[test]
    fn test_equal_values_scale_to_zero() {
        let players = pair();
        let result = compare_players(&players, &[2, 1]).unwrap();
        for entry in &result {
            assert_eq!(scaled(entry, CompareMetric::Influence), 0.0);
            assert_eq!(scaled(entry, CompareMetric::IctIndex), 0.0);
        }
        assert_eq!(result[0].player.id, 2);
    }

    #[test]
    fn test_unknown_player() {
        let players = pair();
        let err = compare_players(&players, &[1, 99]).unwrap_err();
        assert_eq!(err, InvalidQueryError::UnknownPlayer(99));
        assert_eq!(err.parameter(), Some("ids"));
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_compare_ids("4, 17").unwrap(), [4, 17]);
        assert!(matches!(
            parse_compare_ids("4,x").unwrap_err(),
            InvalidQueryError::InvalidNumber { .. }
        ));
        assert!(matches!(parse_compare_ids("4").unwrap_err(), InvalidQueryError::OutOfRange { .. }));
        assert!(matches!(parse_compare_ids("1,2,3").unwrap_err(), InvalidQueryError::OutOfRange { .. }));
        assert!(matches!(parse_compare_ids("5,5").unwrap_err(), InvalidQueryError::OutOfRange { .. }));
        assert!(parse_compare_ids("").is_err());
    }
}
