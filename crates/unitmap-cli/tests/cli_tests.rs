//! Integration tests for the `units`, `highlight` and `distance` commands.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("unitmap-cli").expect("binary exists");
    cmd.env("RUST_LOG", "error").env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn units_lists_every_unit_in_text() {
    cli()
        .arg("units")
        .arg(fixture_path("units.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 units:"))
        .stdout(predicate::str::contains(
            "[ ] ALPHA-1 32.00000,-84.00000 rgb(255, 0, 0)",
        ))
        .stdout(predicate::str::contains("BRAVO-1"));
}

#[test]
fn units_accepts_json_documents() {
    let value = json_stdout(
        cli()
            .args(["--format", "json", "units"])
            .arg(fixture_path("units.json")),
    );
    let markers = value.as_array().expect("marker array");
    assert!(markers
        .iter()
        .any(|m| m["id"] == "BRAVO-1" && m["css_color"] == "rgb(0, 0, 255)"));
}

#[test]
fn peer_highlight_marks_nearby_pair() {
    let value = json_stdout(
        cli()
            .args(["--format", "json", "highlight"])
            .arg(fixture_path("units.xml"))
            .args(["--mode", "peer", "--radius", "10"]),
    );
    assert_eq!(value["unit_count"], 3);
    assert_eq!(value["in_range_count"], 2);
    assert_eq!(value["query"]["mode"], "peer_relative");

    let highlighted: Vec<&str> = value["markers"]
        .as_array()
        .expect("markers")
        .iter()
        .filter(|m| m["highlighted"] == true)
        .filter_map(|m| m["id"].as_str())
        .collect();
    assert_eq!(highlighted, ["ALPHA-1", "ALPHA-2"]);
}

#[test]
fn peer_highlight_strategies_agree() {
    let run = |strategy: &str| {
        json_stdout(
            cli()
                .args(["--format", "json", "highlight"])
                .arg(fixture_path("units.xml"))
                .args(["--radius", "6", "--strategy", strategy]),
        )
    };
    assert_eq!(run("brute-force")["markers"], run("indexed")["markers"]);
}

#[test]
fn strategy_is_only_accepted_by_highlight() {
    cli()
        .arg("units")
        .arg(fixture_path("units.xml"))
        .args(["--strategy", "indexed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--strategy"));

    cli()
        .arg("distance")
        .arg(fixture_path("units.xml"))
        .args(["ALPHA-1", "ALPHA-2", "--strategy", "indexed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--strategy"));
}

#[test]
fn center_highlight_text_output() {
    cli()
        .arg("highlight")
        .arg(fixture_path("units.xml"))
        .args(["--mode", "center", "--radius", "1", "--center", "32,-84"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Query: within 1.00 km of 32.00000,-84.00000",
        ))
        .stdout(predicate::str::contains("Highlighted 1 of 3 units:"))
        .stdout(predicate::str::contains("[*] ALPHA-1"))
        .stdout(predicate::str::contains("[ ] ALPHA-2"));
}

#[test]
fn negative_radius_is_rejected() {
    cli()
        .arg("highlight")
        .arg(fixture_path("units.xml"))
        .args(["--radius", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius must not be negative"));
}

#[test]
fn center_mode_requires_reference_point() {
    cli()
        .arg("highlight")
        .arg(fixture_path("units.xml"))
        .args(["--mode", "center", "--radius", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a reference point"));
}

#[test]
fn invalid_center_argument_is_a_usage_error() {
    cli()
        .arg("highlight")
        .arg(fixture_path("units.xml"))
        .args(["--mode", "center", "--radius", "5", "--center", "95,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--center"));
}

#[test]
fn record_without_location_fails_to_load() {
    cli()
        .arg("units")
        .arg(fixture_path("units_missing_location.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load units"))
        .stderr(predicate::str::contains("missing required field 'location'"));
}

#[test]
fn missing_file_reports_path() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("absent.xml");
    cli()
        .arg("units")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.xml"));
}

#[test]
fn malformed_document_fails() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("broken.xml");
    fs::write(&path, "<Root><Unit><ID>X</ID>").expect("write fixture");
    cli()
        .arg("units")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse unit document"));
}

#[test]
fn distance_between_fixture_pair() {
    cli()
        .arg("distance")
        .arg(fixture_path("units.xml"))
        .args(["ALPHA-1", "ALPHA-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALPHA-1 -> ALPHA-2: 5.560 km"));
}

#[test]
fn distance_json_output() {
    let value = json_stdout(
        cli()
            .args(["--format", "json", "distance"])
            .arg(fixture_path("units.xml"))
            .args(["ALPHA-1", "ALPHA-2"]),
    );
    let km = value["distance_km"].as_f64().expect("distance");
    assert!((km - 5.5597).abs() < 1e-3, "got {km}");
}

#[test]
fn unknown_unit_suggests_close_ids() {
    cli()
        .arg("distance")
        .arg(fixture_path("units.xml"))
        .args(["ALPHA-3", "BRAVO-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown unit id: ALPHA-3"))
        .stderr(predicate::str::contains("Did you mean"));
}
