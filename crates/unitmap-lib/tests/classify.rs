//! Range classification under both query modes and both strategies.

mod common;

use common::{scattered_units, unit};
use unitmap_lib::{
    classify, classify_with, distance_km, ClassifierStrategy, EngineConfig, GeoCoordinate,
    InRangeSet, RangeQuery,
};

const STRATEGIES: [ClassifierStrategy; 2] =
    [ClassifierStrategy::BruteForce, ClassifierStrategy::Indexed];

fn ids(set: &InRangeSet) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[test]
fn center_relative_matches_distance_predicate() {
    let units = scattered_units(200, (45.0, 7.0), 4.0, 7);
    let reference = GeoCoordinate::new(45.0, 7.0).unwrap();

    for radius in [0.5, 25.0, 120.0, 400.0] {
        for strategy in STRATEGIES {
            let query = RangeQuery::center(reference, radius);
            let set = classify_with(&units, &query, strategy, &EngineConfig::default())
                .expect("valid query");

            for u in &units {
                let expected = distance_km(u.coordinate, reference).unwrap() < radius;
                assert_eq!(
                    set.contains(&u.id),
                    expected,
                    "{} with radius {radius} via {strategy}",
                    u.id
                );
            }
        }
    }
}

#[test]
fn peer_relative_pair_is_highlighted_iff_closer_than_radius() {
    let units = vec![unit("a", 10.0, 10.0), unit("b", 10.0, 10.1)];
    let d = distance_km(units[0].coordinate, units[1].coordinate).unwrap();

    for strategy in STRATEGIES {
        let config = EngineConfig::default();
        let inside = classify_with(&units, &RangeQuery::peer(d + 0.001), strategy, &config).unwrap();
        assert_eq!(ids(&inside), vec!["a", "b"]);

        let at_boundary = classify_with(&units, &RangeQuery::peer(d), strategy, &config).unwrap();
        assert!(at_boundary.is_empty());

        let outside = classify_with(&units, &RangeQuery::peer(d / 2.0), strategy, &config).unwrap();
        assert!(outside.is_empty());
    }
}

#[test]
fn zero_radius_matches_nothing_in_either_mode() {
    let units = vec![unit("a", 0.0, 0.0), unit("b", 0.0, 0.0), unit("c", 1.0, 1.0)];
    let origin = GeoCoordinate::new(0.0, 0.0).unwrap();

    assert!(classify(&units, &RangeQuery::peer(0.0)).unwrap().is_empty());
    assert!(classify(&units, &RangeQuery::center(origin, 0.0))
        .unwrap()
        .is_empty());
}

#[test]
fn end_to_end_peer_scenario() {
    let units = vec![
        unit("red", 32.0, -84.0),
        unit("green", 32.05, -84.0),
        unit("blue", 40.0, -90.0),
    ];

    let ten_km = classify(&units, &RangeQuery::peer(10.0)).unwrap();
    assert_eq!(ids(&ten_km), vec!["green", "red"]);

    let one_km = classify(&units, &RangeQuery::peer(1.0)).unwrap();
    assert!(one_km.is_empty());
}

#[test]
fn strategies_agree_on_scattered_batches() {
    let config = EngineConfig::default();
    for seed in [1, 2, 3] {
        let units = scattered_units(300, (-33.0, 151.0), 2.0, seed);
        for radius in [1.0, 5.0, 15.0] {
            let query = RangeQuery::peer(radius);
            let brute =
                classify_with(&units, &query, ClassifierStrategy::BruteForce, &config).unwrap();
            let indexed =
                classify_with(&units, &query, ClassifierStrategy::Indexed, &config).unwrap();
            assert_eq!(brute, indexed, "seed {seed}, radius {radius}");
        }
    }
}

#[test]
fn strategies_agree_across_the_antimeridian() {
    let units = vec![
        unit("west", 0.0, 179.99),
        unit("east", 0.0, -179.99),
        unit("far", 0.0, 0.0),
    ];
    let config = EngineConfig::default();

    for strategy in STRATEGIES {
        let set = classify_with(&units, &RangeQuery::peer(5.0), strategy, &config).unwrap();
        assert_eq!(ids(&set), vec!["east", "west"], "{strategy}");
    }
}

#[test]
fn classification_is_deterministic() {
    let units = scattered_units(50, (0.0, 0.0), 1.0, 42);
    let query = RangeQuery::peer(10.0);
    let first = classify(&units, &query).unwrap();
    for _ in 0..5 {
        assert_eq!(classify(&units, &query).unwrap(), first);
    }
}

#[test]
fn stacked_units_classify_under_auto_strategy() {
    // Past the default index threshold, so `Auto` uses the KD-tree.
    let mut units: Vec<_> = (0..300).map(|i| unit(&format!("S-{i:03}"), 10.0, 10.0)).collect();
    units.push(unit("LONE", 20.0, 20.0));

    let peers = classify(&units, &RangeQuery::peer(1.0)).expect("valid query");
    assert_eq!(peers.len(), 300);
    assert!(!peers.contains("LONE"));

    let reference = GeoCoordinate::new(10.0, 10.0).unwrap();
    let near = classify(&units, &RangeQuery::center(reference, 1.0)).expect("valid query");
    assert_eq!(near.len(), 300);

    for strategy in STRATEGIES {
        let set = classify_with(
            &units,
            &RangeQuery::peer(1.0),
            strategy,
            &EngineConfig::default(),
        )
        .expect("valid query");
        assert_eq!(set, peers, "{strategy} disagrees on stacked units");
    }
}
