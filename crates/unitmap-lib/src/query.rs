use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::geo::GeoCoordinate;

/// How range membership is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Distance to a fixed reference point, such as the map center.
    CenterRelative,
    /// Distance to any other unit in the batch.
    PeerRelative,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueryMode::CenterRelative => "center",
            QueryMode::PeerRelative => "peer",
        };
        f.write_str(value)
    }
}

/// A range query over the current batch.
///
/// `reference_point` is only consulted for [`QueryMode::CenterRelative`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub mode: QueryMode,
    pub radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_point: Option<GeoCoordinate>,
}

impl RangeQuery {
    /// Query for units strictly closer than `radius_km` to `reference`.
    pub fn center(reference: GeoCoordinate, radius_km: f64) -> Self {
        Self {
            mode: QueryMode::CenterRelative,
            radius_km,
            reference_point: Some(reference),
        }
    }

    /// Query for units with at least one other unit strictly closer than `radius_km`.
    pub fn peer(radius_km: f64) -> Self {
        Self {
            mode: QueryMode::PeerRelative,
            radius_km,
            reference_point: None,
        }
    }

    /// Check the query is evaluable.
    ///
    /// Negative radii are rejected rather than clamped.
    pub fn validate(&self) -> Result<(), QueryError> {
        if !self.radius_km.is_finite() {
            return Err(QueryError::NonFiniteRadius);
        }
        if self.radius_km < 0.0 {
            return Err(QueryError::NegativeRadius(self.radius_km));
        }
        if self.mode == QueryMode::CenterRelative && self.reference_point.is_none() {
            return Err(QueryError::MissingReferencePoint);
        }
        Ok(())
    }

    /// Reference point for center-relative queries.
    pub(crate) fn reference(&self) -> Result<GeoCoordinate, QueryError> {
        self.reference_point
            .ok_or(QueryError::MissingReferencePoint)
    }
}
