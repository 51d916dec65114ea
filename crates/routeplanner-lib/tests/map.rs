use std::fs;

use routeplanner_lib::{load_map, plan_route, Error, RoutePlanner, SearchOutcome};
use tempfile::tempdir;

mod common;

use common::{brute_force_cost, fixture_path};

#[test]
fn fixture_loads_road_nodes_only() {
    let model = load_map(&fixture_path()).expect("fixture loads");

    // Eleven declared nodes; the town hall corner is only on a building outline.
    assert_eq!(model.len(), 10);
    assert_eq!(model.roads().len(), 6);
    assert!((model.metric_scale() - 744.82).abs() < 0.01);
}

#[test]
fn fixture_route_uses_the_market_footway() {
    let model = load_map(&fixture_path()).expect("fixture loads");
    let mut planner = RoutePlanner::new(&model, [0.0, 0.0], [100.0, 100.0]).unwrap();

    assert_eq!(planner.run().unwrap(), SearchOutcome::Found);
    // high_street a -> b, cross_street b -> e, market_walk e -> x -> i.
    assert_eq!(planner.path(), &[0, 1, 8, 9, 6]);
    assert!(
        (planner.distance() - 1260.71).abs() < 0.05,
        "distance {}",
        planner.distance()
    );

    let best = brute_force_cost(&model, 0, 6).unwrap() * model.metric_scale();
    assert!(planner.distance() <= best + 1e-9);
}

#[test]
fn footway_only_node_is_never_an_endpoint() {
    let model = load_map(&fixture_path()).expect("fixture loads");
    // The market bench (node 9) sits at roughly (0.76, 0.75).
    let closest = model.find_closest_node(0.76, 0.75).unwrap();
    assert_ne!(closest, 9);
}

#[test]
fn load_map_from_temporary_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("village.json");
    fs::write(
        &path,
        r#"{
            "nodes": [
                {"id": "well", "lat": 51.0, "lon": -1.0},
                {"id": "inn", "lat": 51.0, "lon": -0.99},
                {"id": "farm", "lat": 51.005, "lon": -0.99}
            ],
            "ways": [
                {"id": "lane", "highway": "unclassified", "nodes": ["well", "inn"]},
                {"id": "track", "highway": "track", "nodes": ["inn", "farm"]}
            ]
        }"#,
    )
    .expect("write map");

    let model = load_map(&path).expect("map loads");
    // Tracks are not roads, so the farm is not part of the graph.
    assert_eq!(model.len(), 2);

    let route = plan_route(&model, [0.0, 0.0], [100.0, 0.0])
        .unwrap()
        .expect("well and inn connect");
    assert_eq!(route.hop_count(), 1);
}

#[test]
fn missing_map_file_is_an_io_error() {
    let dir = tempdir().expect("create temp dir");
    let result = load_map(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
