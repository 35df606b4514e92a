//! Free-text "ask the scout" queries
//!
//! Recognizes a position keyword, an "under N" / "< N" price cap and a
//! "value" / "best" / "top" ordering hint. Everything else in the text is
//! ignored.

use crate::query::{FilterSpec, SortKey};
use crate::types::Position;
use serde::Serialize;

/// Checked in order; the first keyword found in the text wins
const POSITION_KEYWORDS: [(&str, Position); 5] = [
    ("gkp", Position::Goalkeeper),
    ("mid", Position::Midfielder),
    ("def", Position::Defender),
    ("fwd", Position::Forward),
    ("fw", Position::Forward),
];

/// A parsed free-text query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartQuery {
    pub filters: FilterSpec,
    /// Human-readable description of each recognized filter, in match order
    pub applied: Vec<String>,
}

impl SmartQuery {
    /// "Midfielders, under £6.0m, and sorted by value"; empty when nothing matched
    pub fn message(&self) -> String {
        match self.applied.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{first} and {second}"),
            [init @ .., last] => format!("{}, and {}", init.join(", "), last),
        }
    }
}

pub fn parse_smart_query(text: &str) -> SmartQuery {
    let mut filters = FilterSpec::default();
    let mut applied = Vec::new();
    let lower = text.to_lowercase();

    if lower.trim().is_empty() {
        return SmartQuery { filters, applied };
    }

    if let Some((_, position)) = POSITION_KEYWORDS.iter().find(|(kw, _)| lower.contains(kw)) {
        filters.position = Some(*position);
        applied.push(position.plural().to_string());
    }

    if let Some(limit) = price_cap(&lower) {
        filters.max_cost = Some(limit);
        applied.push(format!("under £{limit:.1}m"));
    }

    if lower.contains("value") {
        filters.sort_by = SortKey::Ppm;
        applied.push("sorted by value".to_string());
    } else if lower.contains("best") || lower.contains("top") {
        filters.sort_by = SortKey::TotalPoints;
        applied.push("sorted by points".to_string());
    }

    SmartQuery { filters, applied }
}

/// First "under N" or "< N" (optional £) in the text
fn price_cap(text: &str) -> Option<f64> {
    let mut markers: Vec<(usize, usize)> = text
        .match_indices("under")
        .chain(text.match_indices('<'))
        .map(|(at, marker)| (at, marker.len()))
        .collect();
    markers.sort_unstable();

    markers.into_iter().find_map(|(at, len)| leading_number(&text[at + len..]))
}

/// Parse `\s*£?\s*\d+(\.\d+)?` at the start of `rest`
fn leading_number(rest: &str) -> Option<f64> {
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('£').unwrap_or(rest).trim_start();

    let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if int_len == 0 {
        return None;
    }

    let mut end = int_len;
    if let Some(frac) = rest[int_len..].strip_prefix('.') {
        let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }

    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_mid_under_price() {
        let q = parse_smart_query("Best MID under 6.0");
        assert_eq!(q.filters.position, Some(Position::Midfielder));
        assert_eq!(q.filters.max_cost, Some(6.0));
        assert_eq!(q.filters.sort_by, SortKey::TotalPoints);
        assert_eq!(q.message(), "Midfielders, under £6.0m, and sorted by points");
    }

    #[test]
    fn test_value_beats_best() {
        let q = parse_smart_query("best value fwd < £7.5");
        assert_eq!(q.filters.position, Some(Position::Forward));
        assert_eq!(q.filters.max_cost, Some(7.5));
        assert_eq!(q.filters.sort_by, SortKey::Ppm);
    }

    #[test]
    fn test_two_filters_joined_with_and() {
        let q = parse_smart_query("cheap def under 5");
        assert_eq!(q.filters.max_cost, Some(5.0));
        assert_eq!(q.message(), "Defenders and under £5.0m");
    }

    #[test]
    fn test_first_price_marker_with_a_number_wins() {
        assert_eq!(price_cap("under budget but < 4.5 or under 9"), Some(4.5));
        assert_eq!(price_cap("under 8. please"), Some(8.0));
        assert_eq!(price_cap("nothing here"), None);
    }

    #[test]
    fn test_unrecognized_text() {
        let q = parse_smart_query("who should I captain?");
        assert!(q.applied.is_empty());
        assert_eq!(q.message(), "");
        assert_eq!(q.filters, FilterSpec::default());
    }

    #[test]
    fn test_empty_text() {
        let q = parse_smart_query("   ");
        assert!(q.applied.is_empty());
        assert_eq!(q.filters, FilterSpec::default());
    }

    #[test]
    fn test_goalkeeper_keyword() {
        let q = parse_smart_query("top gkp");
        assert_eq!(q.filters.position, Some(Position::Goalkeeper));
        assert_eq!(q.message(), "Goalkeepers and sorted by points");
    }
}
