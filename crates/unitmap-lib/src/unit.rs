use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::GeoCoordinate;

/// Identifier of a unit, unique within one loaded batch.
pub type UnitId = String;

/// Base display color of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// CSS functional notation, e.g. `rgb(255, 0, 0)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// One normalised unit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub coordinate: GeoCoordinate,
    pub color: Rgb,
    #[serde(default)]
    pub highlighted: bool,
}

impl Unit {
    /// Create an unhighlighted unit.
    pub fn new(id: impl Into<UnitId>, coordinate: GeoCoordinate, color: Rgb) -> Self {
        Self {
            id: id.into(),
            coordinate,
            color,
            highlighted: false,
        }
    }
}
