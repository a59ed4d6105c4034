//! KD-tree spatial index over a unit batch.
//!
//! # Overview
//!
//! Each unit is embedded on the unit sphere as a 3D Cartesian point and stored
//! in a KD-tree (k=3). A great-circle radius maps monotonically onto a chord
//! length through the sphere:
//!
//! ```text
//! chord = 2 * sin(min(d / R, PI) / 2)
//! ```
//!
//! so a Euclidean radius query on the embedded points returns every unit whose
//! great-circle distance is within `d`. Candidates are then confirmed with the
//! exact haversine distance, which keeps results identical to a brute-force
//! scan.
//!
//! # Example
//!
//! ```
//! use unitmap_lib::{GeoCoordinate, Rgb, Unit, UnitIndex};
//!
//! let units = vec![
//!     Unit::new("a", GeoCoordinate::new(32.0, -84.0).unwrap(), Rgb::new(255, 0, 0)),
//!     Unit::new("b", GeoCoordinate::new(40.0, -90.0).unwrap(), Rgb::new(0, 0, 255)),
//! ];
//! let index = UnitIndex::build(&units);
//! let near = index.within_km(GeoCoordinate::new(32.01, -84.0).unwrap(), 5.0).unwrap();
//! assert_eq!(near.len(), 1);
//! assert_eq!(units[near[0].0].id, "a");
//! ```

use std::collections::HashMap;
use std::f64::consts::PI;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::error::GeometryError;
use crate::geo::{distance_km, GeoCoordinate, EARTH_RADIUS_KM};
use crate::unit::Unit;

/// KD-tree bucket size.
///
/// Kept generous because the float tree cannot split a bucket whose items all
/// share one axis value (e.g. many units on the equator).
const BUCKET_SIZE: usize = 256;

/// Relative slack added to the chord threshold so rounding never drops a
/// candidate that the exact check would accept.
const CHORD_SLACK: f64 = 1e-9;

/// Spatial index borrowing a unit batch.
///
/// The tree holds one item per distinct embedded position; coincident units
/// share that item. A leaf cannot hold more than `BUCKET_SIZE` items at one
/// exact point, so inserting stacked units individually would overflow.
pub struct UnitIndex<'a> {
    /// KD-tree over unit-sphere positions. Items are indices into `positions`.
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    /// Unit indices (into `units`) found at each distinct position.
    positions: Vec<Vec<usize>>,
    units: &'a [Unit],
}

impl<'a> UnitIndex<'a> {
    /// Build an index over `units`.
    pub fn build(units: &'a [Unit]) -> Self {
        let mut slots: HashMap<[u64; 3], usize> = HashMap::with_capacity(units.len());
        let mut positions: Vec<Vec<usize>> = Vec::new();
        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();

        for (index, unit) in units.iter().enumerate() {
            let point = to_unit_sphere(unit.coordinate);
            let key = point.map(normalized_bits);
            match slots.get(&key) {
                Some(&slot) => positions[slot].push(index),
                None => {
                    let slot = positions.len();
                    slots.insert(key, slot);
                    positions.push(vec![index]);
                    tree.add(&point, slot);
                }
            }
        }

        debug!(
            node_count = units.len(),
            distinct_positions = positions.len(),
            "built unit spatial index"
        );

        Self {
            tree,
            positions,
            units,
        }
    }

    /// Number of indexed units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of distinct positions stored in the tree.
    pub fn distinct_positions(&self) -> usize {
        self.positions.len()
    }

    /// Find all units strictly closer than `radius_km` to `center`.
    ///
    /// Returns `(index into the batch, distance_km)` pairs sorted by distance.
    pub fn within_km(
        &self,
        center: GeoCoordinate,
        radius_km: f64,
    ) -> Result<Vec<(usize, f64)>, GeometryError> {
        if radius_km <= 0.0 || self.units.is_empty() {
            return Ok(Vec::new());
        }

        let query_point = to_unit_sphere(center);
        let candidates = self
            .tree
            .within::<SquaredEuclidean>(&query_point, squared_chord(radius_km));

        let mut results = Vec::new();
        for neighbour in candidates {
            // Units sharing an embedded point may still differ in raw lat/lon
            // (e.g. longitude at a pole), so each is checked on its own.
            for &unit_index in &self.positions[neighbour.item] {
                let distance = distance_km(center, self.units[unit_index].coordinate)?;
                if distance < radius_km {
                    results.push((unit_index, distance));
                }
            }
        }

        results.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        Ok(results)
    }
}

impl std::fmt::Debug for UnitIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitIndex")
            .field("node_count", &self.units.len())
            .field("distinct_positions", &self.positions.len())
            .finish()
    }
}

/// Embed a coordinate on the unit sphere.
fn to_unit_sphere(coord: GeoCoordinate) -> [f64; 3] {
    let lat = coord.latitude().to_radians();
    let lon = coord.longitude().to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Bit pattern of a coordinate with `-0.0` folded into `0.0`.
fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Squared chord length on the unit sphere covering a great-circle radius.
fn squared_chord(radius_km: f64) -> f64 {
    let angle = (radius_km / EARTH_RADIUS_KM).min(PI);
    let chord = 2.0 * (angle / 2.0).sin();
    chord * chord * (1.0 + CHORD_SLACK) + CHORD_SLACK
}
