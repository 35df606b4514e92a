use crate::error::InvalidQueryError;
use crate::query::{query, FilterSpec, SortKey};
use crate::types::{PlayerRecord, Position};
use serde::Serialize;

/// Top players of one position by points per million
#[derive(Debug, Clone, Serialize)]
pub struct PositionReport<'a> {
    pub position: Position,
    pub players: Vec<&'a PlayerRecord>,
}

/// Best value players for every position, goalkeepers first
pub fn position_report<'a>(
    players: &'a [PlayerRecord],
    min_minutes: u32,
    max_cost: Option<f64>,
    top_n: usize,
) -> Result<Vec<PositionReport<'a>>, InvalidQueryError> {
    Position::ALL
        .into_iter()
        .map(|position| {
            let filters = FilterSpec {
                position: Some(position),
                min_minutes,
                max_cost,
                min_cost: None,
                sort_by: SortKey::Ppm,
                top_n,
            };
            Ok(PositionReport { position, players: query(players, &filters)? })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::testutil::{payload, raw_player};

    #[test]
    fn test_report_covers_every_position() {
        let players = normalize(&payload(vec![
            raw_player(1, 3, 80, 900, 90),
            raw_player(2, 3, 50, 900, 70),
            raw_player(3, 4, 100, 1800, 180),
            raw_player(4, 2, 45, 100, 5),
        ]))
        .unwrap();

        let report = position_report(&players, 500, None, 10).unwrap();
        let positions: Vec<Position> = report.iter().map(|r| r.position).collect();
        assert_eq!(positions, Position::ALL.to_vec());

        assert!(report[0].players.is_empty());
        assert!(report[1].players.is_empty());
        let mids: Vec<u32> = report[2].players.iter().map(|p| p.id).collect();
        assert_eq!(mids, vec![2, 1]);
        assert_eq!(report[3].players[0].id, 3);
    }

    #[test]
    fn test_report_respects_price_cap_and_limit() {
        let players = normalize(&payload(vec![
            raw_player(1, 3, 80, 900, 90),
            raw_player(2, 3, 50, 900, 70),
            raw_player(3, 3, 55, 900, 30),
        ]))
        .unwrap();

        let report = position_report(&players, 0, Some(6.0), 1).unwrap();
        let mids: Vec<u32> = report[2].players.iter().map(|p| p.id).collect();
        assert_eq!(mids, vec![2]);
    }

    #[test]
    fn test_report_rejects_zero_limit() {
        assert!(position_report(&[], 0, None, 0).is_err());
    }
}
