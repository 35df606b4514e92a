//! Plain HTML rendering for the browser-facing pages

use player_scout::{FilterSpec, PlayerRecord, Position, SortKey};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th,td{padding:4px 8px;border-bottom:1px solid #ddd;text-align:right}\
td.l,th.l{text-align:left}\
.error{color:#b00020}";

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head>\
         <body><h1>{}</h1>{body}</body></html>",
        escape(title),
        escape(title)
    )
}

fn filter_form(filters: &FilterSpec) -> String {
    let mut form = String::from("<form method=\"get\" action=\"/players\">");

    form.push_str("<label>Position <select name=\"position\"><option value=\"\">All</option>");
    for position in Position::ALL {
        let selected = if filters.position == Some(position) { " selected" } else { "" };
        let _ = write!(form, "<option value=\"{}\"{selected}>{}</option>", position.code(), position.plural());
    }
    form.push_str("</select></label> ");

    let _ = write!(
        form,
        "<label>Min minutes <input name=\"min_minutes\" type=\"number\" min=\"0\" value=\"{}\"></label> ",
        filters.min_minutes
    );
    let bounds = [("min_cost", "Min price", filters.min_cost), ("max_cost", "Max price", filters.max_cost)];
    for (name, label, value) in bounds {
        let value = value.map(|c| c.to_string()).unwrap_or_default();
        let _ = write!(
            form,
            "<label>{label} <input name=\"{name}\" type=\"number\" step=\"any\" min=\"0\" value=\"{value}\"></label> "
        );
    }

    form.push_str("<label>Sort by <select name=\"sort_by\">");
    for key in SortKey::ALL {
        let selected = if filters.sort_by == key { " selected" } else { "" };
        let _ = write!(form, "<option value=\"{key}\"{selected}>{key}</option>");
    }
    form.push_str("</select></label> ");

    let _ = write!(
        form,
        "<label>Show <input name=\"top_n\" type=\"number\" min=\"1\" value=\"{}\"></label> \
         <button type=\"submit\">Scout</button></form>",
        filters.top_n
    );
    form
}

/// Ranking table page with the filter form on top
pub fn render_players_page(filters: &FilterSpec, players: &[PlayerRecord]) -> String {
    let mut body = filter_form(filters);

    if players.is_empty() {
        body.push_str("<p>No players match the selected criteria.</p>");
        return page("FPL Scout", &body);
    }

    let _ = write!(body, "<p>{} players sorted by {}</p>", players.len(), filters.sort_by);
    body.push_str(
        "<table><thead><tr><th>#</th><th class=\"l\">Player</th><th class=\"l\">Team</th>\
         <th class=\"l\">Pos</th><th>Price</th><th>Points</th><th>Minutes</th><th>PPM</th>\
         <th>PPG</th><th>G/90</th><th>A/90</th><th class=\"l\">Next fixtures</th></tr></thead><tbody>",
    );

    for (rank, p) in players.iter().enumerate() {
        let _ = write!(
            body,
            "<tr><td>{}</td><td class=\"l\">{}</td><td class=\"l\">{}</td><td class=\"l\">{}</td>\
             <td>£{:.1}m</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td>\
             <td>{:.2}</td><td class=\"l\">{}</td></tr>",
            rank + 1,
            escape(&p.name),
            escape(&p.team),
            p.position.code(),
            p.cost,
            p.total_points,
            p.minutes,
            p.ppm,
            p.ppg,
            p.goals_per_90,
            p.assists_per_90,
            escape(p.next_fixtures.as_deref().unwrap_or("")),
        );
    }
    body.push_str("</tbody></table>");

    page("FPL Scout", &body)
}

/// Failure page shown instead of a table
pub fn render_error_page(code: &str, message: &str) -> String {
    let body = format!(
        "<p class=\"error\"><strong>{}</strong>: {}</p><p><a href=\"/players\">Back to rankings</a></p>",
        escape(code),
        escape(message)
    );
    page("FPL Scout - error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape("O'Brien"), "O&#39;Brien");
    }

    #[test]
    fn test_empty_table_message() {
        let html = render_players_page(&FilterSpec::default(), &[]);
        assert!(html.contains("No players match"));
        assert!(html.contains("<form"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error_page("INVALID_QUERY", "Unknown sort key '<foo>'");
        assert!(html.contains("&lt;foo&gt;"));
        assert!(!html.contains("<foo>"));
    }

    #[test]
    fn test_form_marks_current_selection() {
        let filters = FilterSpec {
            position: Some(Position::Defender),
            sort_by: SortKey::Minutes,
            max_cost: Some(5.5),
            ..Default::default()
        };
        let html = render_players_page(&filters, &[]);
        assert!(html.contains("<option value=\"DEF\" selected>"));
        assert!(html.contains("<option value=\"minutes\" selected>"));
        assert!(html.contains("value=\"5.5\""));
    }

    #[test]
    fn test_form_keeps_exact_cost_bounds() {
        let filters = FilterSpec { min_cost: Some(4.5), max_cost: Some(7.25), ..Default::default() };
        let html = render_players_page(&filters, &[]);
        assert!(html.contains("name=\"max_cost\" type=\"number\" step=\"any\" min=\"0\" value=\"7.25\""));
        assert!(html.contains("name=\"min_cost\" type=\"number\" step=\"any\" min=\"0\" value=\"4.5\""));

        let html = render_players_page(&FilterSpec::default(), &[]);
        assert!(html.contains("name=\"min_cost\" type=\"number\" step=\"any\" min=\"0\" value=\"\""));
    }
}
