//! Geographic coordinates and great-circle distance.
//!
//! Distances use the haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. That is accurate enough for deciding whether a marker
//! sits inside a highlight radius; it is not a geodetic survey model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in degrees.
///
/// Both components are finite, latitude lies in `[-90, 90]` and longitude in
/// `[-180, 180]`. Values are immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = GeometryError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        GeoCoordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<GeoCoordinate> for RawCoordinate {
    fn from(coord: GeoCoordinate) -> Self {
        RawCoordinate {
            latitude: coord.latitude,
            longitude: coord.longitude,
        }
    }
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeometryError::OutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeometryError::OutOfRange {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_km(&self, other: &Self) -> Result<f64, GeometryError> {
        distance_km(*self, *other)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"` (whitespace around either component is ignored).
impl FromStr for GeoCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LON but got '{s}'"))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude '{}': {e}", lon.trim()))?;
        GeoCoordinate::new(latitude, longitude).map_err(|e| e.to_string())
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Symmetric, and zero for identical inputs.
pub fn distance_km(a: GeoCoordinate, b: GeoCoordinate) -> Result<f64, GeometryError> {
    haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Haversine distance between two raw latitude/longitude pairs in degrees.
///
/// Fails with [`GeometryError::NonFinite`] if any component is NaN or infinite.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, GeometryError> {
    if ![lat1, lon1, lat2, lon2].iter().all(|v| v.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = ((d_lat / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Ok(EARTH_RADIUS_KM * c)
}
