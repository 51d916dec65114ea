//! Integration tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Path to the checked-in small town map.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/small_town.json")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("routeplanner-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("ROUTEPLANNER_MAP");
    cmd
}

/// Write a map with two unconnected streets into a temporary directory.
fn split_map() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("split.json");
    fs::write(
        &path,
        r#"{
            "bounds": {"min_lat": 10.0, "max_lat": 10.01, "min_lon": 20.0, "max_lon": 20.01},
            "nodes": [
                {"id": "w1", "lat": 10.0, "lon": 20.0},
                {"id": "w2", "lat": 10.0, "lon": 20.003},
                {"id": "e1", "lat": 10.01, "lon": 20.007},
                {"id": "e2", "lat": 10.01, "lon": 20.01}
            ],
            "ways": [
                {"id": "west", "highway": "residential", "nodes": ["w1", "w2"]},
                {"id": "east", "highway": "residential", "nodes": ["e1", "e2"]}
            ]
        }"#,
    )
    .expect("write map");
    (dir, path)
}

#[test]
fn route_prints_path_and_distance() {
    cli()
        .arg("--map")
        .arg(fixture_path())
        .args(["route", "--start", "0", "0", "--end", "100", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route from node 0 to node 6 (4 hops):"))
        .stdout(predicate::str::contains("STRT"))
        .stdout(predicate::str::contains("GOAL"))
        .stdout(predicate::str::contains("Distance: 1260.7 m"));
}

#[test]
fn route_json_output_is_parseable() {
    let output = cli()
        .args(["--format", "json", "--map"])
        .arg(fixture_path())
        .args(["route", "--start", "0", "0", "--end", "100", "100"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["status"], "found");
    let nodes: Vec<u64> = value["route"]["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["node"].as_u64().expect("node id"))
        .collect();
    assert_eq!(nodes, vec![0, 1, 8, 9, 6]);
}

#[test]
fn map_path_can_come_from_environment() {
    cli()
        .env("ROUTEPLANNER_MAP", fixture_path())
        .args(["route", "--start", "0", "0", "--end", "0", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 hops)"))
        .stdout(predicate::str::contains("Distance: 0.0 m"));
}

#[test]
fn disconnected_points_exit_with_no_path_status() {
    let (_dir, path) = split_map();
    cli()
        .arg("--map")
        .arg(&path)
        .args(["route", "--start", "0", "0", "--end", "100", "100"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("No path found"));
}

#[test]
fn out_of_range_coordinate_is_reported() {
    cli()
        .arg("--map")
        .arg(fixture_path())
        .args(["route", "--start", "0", "0", "--end", "150", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid x coordinate 150"));
}

#[test]
fn missing_map_fails_with_context() {
    let dir = TempDir::new().expect("create temp dir");
    cli()
        .arg("--map")
        .arg(dir.path().join("nowhere.json"))
        .arg("inspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load map from"));
}

#[test]
fn inspect_summarises_fixture() {
    cli()
        .arg("--map")
        .arg(fixture_path())
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:        10"))
        .stdout(predicate::str::contains("Roads:        6 (1 footways)"));
}
