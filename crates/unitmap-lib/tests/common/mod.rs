//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use unitmap_lib::{GeoCoordinate, Rgb, Unit};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to a named fixture file.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Convenience constructor for a black unit.
#[allow(dead_code)]
pub fn unit(id: &str, lat: f64, lon: f64) -> Unit {
    Unit::new(
        id,
        GeoCoordinate::new(lat, lon).expect("valid test coordinate"),
        Rgb::new(0, 0, 0),
    )
}

/// Deterministic pseudo-random batch scattered around a center point.
///
/// Uses a fixed linear congruential generator so runs are reproducible.
#[allow(dead_code)]
pub fn scattered_units(count: usize, center: (f64, f64), spread_deg: f64, seed: u64) -> Vec<Unit> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64) / ((1u64 << 53) as f64)
    };

    (0..count)
        .map(|i| {
            let lat = (center.0 + (next() - 0.5) * spread_deg).clamp(-90.0, 90.0);
            let lon = (center.1 + (next() - 0.5) * spread_deg).clamp(-180.0, 180.0);
            unit(&format!("U-{i:04}"), lat, lon)
        })
        .collect()
}
