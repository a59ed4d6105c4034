//! Output formatting for unit listings and highlight results.
//!
//! Renderers return strings so callers decide where they are written.

use std::fmt::Write;

use clap::ValueEnum;
use unitmap_lib::{HighlightSummary, Marker, QueryMode, RangeQuery};

use crate::terminal::ColorPalette;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render a unit listing.
pub fn render_units_text(markers: &[Marker], palette: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} units:", markers.len());
    for marker in markers {
        render_marker_line(&mut out, marker, palette);
    }
    out
}

/// Render the result of one range query.
pub fn render_highlight_text(summary: &HighlightSummary, palette: &ColorPalette) -> String {
    let mut out = String::new();
    if let Some(query) = &summary.query {
        let _ = writeln!(
            out,
            "Query: {}{}{}",
            palette.cyan,
            describe_query(query),
            palette.reset
        );
    }
    let _ = writeln!(
        out,
        "Highlighted {} of {} units:",
        summary.in_range_count, summary.unit_count
    );
    for marker in &summary.markers {
        render_marker_line(&mut out, marker, palette);
    }
    out
}

/// Render a unit-to-unit distance.
pub fn render_distance_text(from: &str, to: &str, distance_km: f64) -> String {
    format!("{from} -> {to}: {distance_km:.3} km\n")
}

/// One-line description of a query, e.g. `peer-relative within 10.00 km`.
pub fn describe_query(query: &RangeQuery) -> String {
    match (query.mode, query.reference_point) {
        (QueryMode::CenterRelative, Some(reference)) => {
            format!("within {:.2} km of {}", query.radius_km, reference)
        }
        (QueryMode::CenterRelative, None) => format!("within {:.2} km of center", query.radius_km),
        (QueryMode::PeerRelative, _) => {
            format!("peer-relative within {:.2} km", query.radius_km)
        }
    }
}

fn render_marker_line(out: &mut String, marker: &Marker, palette: &ColorPalette) {
    let tag = if marker.highlighted {
        format!("{}[*]{}", palette.tag_highlight, palette.reset)
    } else {
        "[ ]".to_string()
    };
    let _ = writeln!(
        out,
        "  {} {}{}{}{} {}{:.5},{:.5}{} {}",
        tag,
        palette.swatch(marker.color),
        palette.white_bold,
        marker.id,
        palette.reset,
        palette.gray,
        marker.latitude,
        marker.longitude,
        palette.reset,
        marker.css_color
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitmap_lib::{GeoCoordinate, Rgb, Unit};

    fn summary() -> HighlightSummary {
        let mut lit = Unit::new(
            "ALPHA-1",
            GeoCoordinate::new(32.0, -84.0).unwrap(),
            Rgb::new(255, 0, 0),
        );
        lit.highlighted = true;
        let dim = Unit::new(
            "BRAVO-1",
            GeoCoordinate::new(40.0, -90.0).unwrap(),
            Rgb::new(0, 0, 255),
        );
        HighlightSummary::from_units(&[lit, dim], Some(RangeQuery::peer(10.0)))
    }

    #[test]
    fn plain_highlight_text_marks_members() {
        let text = render_highlight_text(&summary(), &ColorPalette::plain());
        assert!(text.contains("Query: peer-relative within 10.00 km"));
        assert!(text.contains("Highlighted 1 of 2 units:"));
        assert!(text.contains("[*] ALPHA-1 32.00000,-84.00000 rgb(255, 0, 0)"));
        assert!(text.contains("[ ] BRAVO-1 40.00000,-90.00000 rgb(0, 0, 255)"));
    }

    #[test]
    fn center_query_description_names_reference() {
        let query = RangeQuery::center(GeoCoordinate::new(1.0, 2.0).unwrap(), 5.0);
        assert_eq!(
            describe_query(&query),
            "within 5.00 km of 1.00000,2.00000"
        );
    }

    #[test]
    fn distance_text_uses_three_decimals() {
        assert_eq!(render_distance_text("a", "b", 5.55975), "a -> b: 5.560 km\n");
    }
}
