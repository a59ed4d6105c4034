//! Range classification strategies.
//!
//! This module provides the `RangeClassifier` trait and its implementations.
//! Both strategies honour exactly the same predicates; they differ only in how
//! candidate pairs are found.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::geo::{distance_km, GeoCoordinate};
use crate::spatial::UnitIndex;
use crate::unit::{Unit, UnitId};

use super::ClassifierStrategy;

/// Trait for range classification strategies.
pub trait RangeClassifier: Send + Sync {
    /// The strategy identifier for this classifier.
    fn strategy(&self) -> ClassifierStrategy;

    /// Units strictly closer than `radius_km` to `reference`.
    fn center_relative(
        &self,
        units: &[Unit],
        reference: GeoCoordinate,
        radius_km: f64,
    ) -> Result<BTreeSet<UnitId>>;

    /// Units with at least one other unit strictly closer than `radius_km`.
    fn peer_relative(&self, units: &[Unit], radius_km: f64) -> Result<BTreeSet<UnitId>>;
}

/// Pairwise scan over the batch. O(n) for center queries, O(n²) for peer queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceClassifier;

impl RangeClassifier for BruteForceClassifier {
    fn strategy(&self) -> ClassifierStrategy {
        ClassifierStrategy::BruteForce
    }

    fn center_relative(
        &self,
        units: &[Unit],
        reference: GeoCoordinate,
        radius_km: f64,
    ) -> Result<BTreeSet<UnitId>> {
        let mut in_range = BTreeSet::new();
        for unit in units {
            if distance_km(unit.coordinate, reference)? < radius_km {
                in_range.insert(unit.id.clone());
            }
        }
        Ok(in_range)
    }

    fn peer_relative(&self, units: &[Unit], radius_km: f64) -> Result<BTreeSet<UnitId>> {
        let mut flagged = vec![false; units.len()];

        for (i, a) in units.iter().enumerate() {
            for (j, b) in units.iter().enumerate().skip(i + 1) {
                if flagged[i] && flagged[j] {
                    continue;
                }
                if distance_km(a.coordinate, b.coordinate)? < radius_km {
                    flagged[i] = true;
                    flagged[j] = true;
                }
            }
        }

        Ok(units
            .iter()
            .zip(flagged)
            .filter(|(_, hit)| *hit)
            .map(|(unit, _)| unit.id.clone())
            .collect())
    }
}

/// KD-tree backed classifier for larger batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedClassifier;

impl RangeClassifier for IndexedClassifier {
    fn strategy(&self) -> ClassifierStrategy {
        ClassifierStrategy::Indexed
    }

    fn center_relative(
        &self,
        units: &[Unit],
        reference: GeoCoordinate,
        radius_km: f64,
    ) -> Result<BTreeSet<UnitId>> {
        let index = UnitIndex::build(units);
        Ok(index
            .within_km(reference, radius_km)?
            .into_iter()
            .map(|(i, _)| units[i].id.clone())
            .collect())
    }

    fn peer_relative(&self, units: &[Unit], radius_km: f64) -> Result<BTreeSet<UnitId>> {
        let index = UnitIndex::build(units);
        let mut in_range = BTreeSet::new();

        for (i, unit) in units.iter().enumerate() {
            let neighbours = index.within_km(unit.coordinate, radius_km)?;
            if neighbours.iter().any(|(j, _)| *j != i) {
                in_range.insert(unit.id.clone());
            }
        }

        Ok(in_range)
    }
}

/// Select a classifier for a batch of `unit_count` units.
///
/// `Auto` switches to the indexed classifier once the batch reaches
/// `index_threshold` units.
pub fn select_classifier(
    strategy: ClassifierStrategy,
    unit_count: usize,
    index_threshold: usize,
) -> Box<dyn RangeClassifier> {
    match strategy {
        ClassifierStrategy::BruteForce => Box::new(BruteForceClassifier),
        ClassifierStrategy::Indexed => Box::new(IndexedClassifier),
        ClassifierStrategy::Auto if unit_count >= index_threshold => Box::new(IndexedClassifier),
        ClassifierStrategy::Auto => Box::new(BruteForceClassifier),
    }
}
