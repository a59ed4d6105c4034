//! Unit map library entry points.
//!
//! This crate turns loosely structured unit records (as parsed from an XML
//! document) into typed [`Unit`]s, computes great-circle distances between
//! them, and decides which units to highlight under a range query: either
//! distance from a fixed reference point or distance to any other unit.
//! Higher-level consumers (the CLI, map front-ends) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod classify;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod geo;
pub mod highlight;
pub mod normalize;
pub mod output;
pub mod query;
pub mod record;
pub mod spatial;
pub mod unit;

pub use classify::{classify, classify_with, ClassifierStrategy, InRangeSet};
pub use config::EngineConfig;
pub use document::{parse_units_json, parse_units_xml, read_unit_records};
pub use engine::HighlightEngine;
pub use error::{Error, GeometryError, NormalizationError, QueryError, Result};
pub use geo::{distance_km, haversine_km, GeoCoordinate, EARTH_RADIUS_KM};
pub use highlight::project;
pub use normalize::normalize;
pub use output::{HighlightSummary, Marker};
pub use query::{QueryMode, RangeQuery};
pub use record::{RawRecord, RawValue};
pub use spatial::UnitIndex;
pub use unit::{Rgb, Unit, UnitId};
