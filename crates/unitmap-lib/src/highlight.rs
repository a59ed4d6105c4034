//! Projection of classifier output onto a unit batch.

use crate::classify::InRangeSet;
use crate::unit::Unit;

/// Return a copy of `units` with `highlighted` set exactly for members of `in_range`.
///
/// Every other field is left unchanged. The result depends only on `units`
/// and `in_range`, so projecting twice with the same set is a no-op.
pub fn project(units: &[Unit], in_range: &InRangeSet) -> Vec<Unit> {
    units
        .iter()
        .map(|unit| Unit {
            highlighted: in_range.contains(&unit.id),
            ..unit.clone()
        })
        .collect()
}

/// Clear every highlight flag.
pub fn clear(units: &[Unit]) -> Vec<Unit> {
    project(units, &InRangeSet::new())
}
