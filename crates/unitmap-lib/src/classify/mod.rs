//! Range classification of a unit batch.
//!
//! This module provides:
//! - [`ClassifierStrategy`] - How candidate pairs are found (brute force or KD-tree)
//! - [`RangeClassifier`] - Strategy trait implemented by each classifier
//! - [`classify`] / [`classify_with`] - Entry points returning the in-range ids
//!
//! Membership uses strict inequality in both modes, so a unit exactly on the
//! radius boundary is out of range and a zero radius matches nothing.
//!
//! # Example
//!
//! ```
//! use unitmap_lib::{classify, GeoCoordinate, RangeQuery, Rgb, Unit};
//!
//! let units = vec![
//!     Unit::new("a", GeoCoordinate::new(32.0, -84.0).unwrap(), Rgb::new(255, 0, 0)),
//!     Unit::new("b", GeoCoordinate::new(32.05, -84.0).unwrap(), Rgb::new(0, 255, 0)),
//!     Unit::new("c", GeoCoordinate::new(40.0, -90.0).unwrap(), Rgb::new(0, 0, 255)),
//! ];
//! let in_range = classify(&units, &RangeQuery::peer(10.0)).unwrap();
//! assert_eq!(in_range.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

mod classifier;

pub use classifier::{
    select_classifier, BruteForceClassifier, IndexedClassifier, RangeClassifier,
};

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::query::{QueryMode, RangeQuery};
use crate::unit::{Unit, UnitId};

/// Set of unit ids found in range, in ascending order.
pub type InRangeSet = BTreeSet<UnitId>;

/// Supported classification strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierStrategy {
    /// Pick by batch size using [`EngineConfig::index_threshold`].
    #[default]
    Auto,
    /// Pairwise scan.
    BruteForce,
    /// KD-tree over unit-sphere positions.
    Indexed,
}

impl fmt::Display for ClassifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ClassifierStrategy::Auto => "auto",
            ClassifierStrategy::BruteForce => "brute-force",
            ClassifierStrategy::Indexed => "indexed",
        };
        f.write_str(value)
    }
}

/// Classify `units` under `query` using the default configuration.
pub fn classify(units: &[Unit], query: &RangeQuery) -> Result<InRangeSet> {
    classify_with(units, query, ClassifierStrategy::Auto, &EngineConfig::default())
}

/// Classify `units` under `query` with an explicit strategy and configuration.
///
/// The query is validated first; an invalid query never touches the batch.
pub fn classify_with(
    units: &[Unit],
    query: &RangeQuery,
    strategy: ClassifierStrategy,
    config: &EngineConfig,
) -> Result<InRangeSet> {
    query.validate()?;

    if query.radius_km == 0.0 || units.is_empty() {
        return Ok(InRangeSet::new());
    }

    let classifier = select_classifier(strategy, units.len(), config.index_threshold);
    debug!(
        mode = %query.mode,
        radius_km = query.radius_km,
        units = units.len(),
        strategy = %classifier.strategy(),
        "classifying units"
    );

    match query.mode {
        QueryMode::CenterRelative => {
            classifier.center_relative(units, query.reference()?, query.radius_km)
        }
        QueryMode::PeerRelative => classifier.peer_relative(units, query.radius_km),
    }
}
