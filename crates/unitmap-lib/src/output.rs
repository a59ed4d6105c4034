//! Snapshots handed to the map renderer.

use serde::Serialize;

use crate::query::RangeQuery;
use crate::unit::{Rgb, Unit, UnitId};

/// Per-unit view for rendering a marker.
///
/// Coordinates are plain latitude/longitude degrees; any reprojection into a
/// map frame is the renderer's job.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub id: UnitId,
    pub latitude: f64,
    pub longitude: f64,
    pub color: Rgb,
    /// CSS form of `color`, e.g. `rgb(255, 0, 0)`.
    pub css_color: String,
    pub highlighted: bool,
}

impl From<&Unit> for Marker {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id.clone(),
            latitude: unit.coordinate.latitude(),
            longitude: unit.coordinate.longitude(),
            color: unit.color,
            css_color: unit.color.to_css(),
            highlighted: unit.highlighted,
        }
    }
}

/// Result of one query evaluation, ready for serialisation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HighlightSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<RangeQuery>,
    pub unit_count: usize,
    pub in_range_count: usize,
    pub markers: Vec<Marker>,
}

impl HighlightSummary {
    /// Summarise a projected batch and the query that produced it.
    pub fn from_units(units: &[Unit], query: Option<RangeQuery>) -> Self {
        let markers: Vec<Marker> = units.iter().map(Marker::from).collect();
        Self {
            query,
            unit_count: markers.len(),
            in_range_count: markers.iter().filter(|m| m.highlighted).count(),
            markers,
        }
    }

    /// Serialise as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoCoordinate;

    #[test]
    fn summary_counts_highlighted_markers() {
        let mut lit = Unit::new("a", GeoCoordinate::new(1.0, 2.0).unwrap(), Rgb::new(1, 2, 3));
        lit.highlighted = true;
        let dim = Unit::new("b", GeoCoordinate::new(3.0, 4.0).unwrap(), Rgb::new(4, 5, 6));

        let summary = HighlightSummary::from_units(&[lit, dim], Some(RangeQuery::peer(5.0)));
        assert_eq!(summary.unit_count, 2);
        assert_eq!(summary.in_range_count, 1);
        assert_eq!(summary.markers[0].css_color, "rgb(1, 2, 3)");
    }

    #[test]
    fn json_carries_query_mode_and_markers() {
        let unit = Unit::new("a", GeoCoordinate::new(1.0, 2.0).unwrap(), Rgb::new(1, 2, 3));
        let summary = HighlightSummary::from_units(&[unit], Some(RangeQuery::peer(5.0)));
        let json: serde_json::Value =
            serde_json::from_str(&summary.to_json().unwrap()).unwrap();

        assert_eq!(json["query"]["mode"], "peer_relative");
        assert_eq!(json["query"]["radius_km"], 5.0);
        assert_eq!(json["markers"][0]["id"], "a");
        assert_eq!(json["markers"][0]["highlighted"], false);
    }
}
