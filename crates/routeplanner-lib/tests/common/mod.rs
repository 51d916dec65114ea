//! Shared graph fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;

use routeplanner_lib::{NodeId, RoadKind, RouteModel};

/// Path to the checked-in small town map.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/small_town.json")
}

/// Unit square with roads along its four sides only.
///
/// Node ids: 0 = (0,0), 1 = (1,0), 2 = (1,1), 3 = (0,1).
pub fn square_model(metric_scale: f64) -> RouteModel {
    let mut builder = RouteModel::builder().metric_scale(metric_scale);
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    let ids: Vec<NodeId> = corners
        .iter()
        .map(|&(x, y)| builder.add_node(x, y))
        .collect();
    for i in 0..ids.len() {
        builder.add_road(RoadKind::Residential, [ids[i], ids[(i + 1) % ids.len()]]);
    }
    builder.build().expect("square model builds")
}

/// Four-by-four lattice over the unit square with a handful of missing
/// street segments. Node `(col, row)` has id `row * 4 + col` and sits at
/// `(col / 3, row / 3)`.
pub fn maze_model(metric_scale: f64) -> RouteModel {
    const SIZE: usize = 4;
    let closed: HashSet<((usize, usize), (usize, usize))> = [
        ((1, 0), (1, 1)),
        ((2, 1), (2, 2)),
        ((0, 2), (1, 2)),
        ((2, 3), (3, 3)),
        ((1, 1), (2, 1)),
    ]
    .into_iter()
    .collect();

    let mut builder = RouteModel::builder().metric_scale(metric_scale);
    for row in 0..SIZE {
        for col in 0..SIZE {
            builder.add_node(col as f64 / 3.0, row as f64 / 3.0);
        }
    }
    for row in 0..SIZE {
        for col in 0..SIZE {
            for (next_col, next_row) in [(col + 1, row), (col, row + 1)] {
                if next_col >= SIZE || next_row >= SIZE {
                    continue;
                }
                if closed.contains(&((col, row), (next_col, next_row))) {
                    continue;
                }
                builder.add_road(
                    RoadKind::Residential,
                    [row * SIZE + col, next_row * SIZE + next_col],
                );
            }
        }
    }
    builder.build().expect("maze model builds")
}

/// Percentage coordinates that resolve exactly onto `node`.
pub fn percent_of(model: &RouteModel, node: NodeId) -> [f64; 2] {
    let position = model.node(node).expect("node exists");
    [position.x * 100.0, position.y * 100.0]
}

/// Cheapest route cost between two nodes, in native units, found by
/// enumerating every simple path over consecutive road nodes.
pub fn brute_force_cost(model: &RouteModel, start: NodeId, goal: NodeId) -> Option<f64> {
    let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); model.len()];
    for road in model.roads() {
        for pair in road.nodes.windows(2) {
            adjacency[pair[0]].push(pair[1]);
            adjacency[pair[1]].push(pair[0]);
        }
    }

    fn walk(
        model: &RouteModel,
        adjacency: &[Vec<NodeId>],
        current: NodeId,
        goal: NodeId,
        seen: &mut Vec<bool>,
        cost: f64,
        best: &mut Option<f64>,
    ) {
        if best.is_some_and(|best| cost >= best) {
            return;
        }
        if current == goal {
            *best = Some(cost);
            return;
        }
        for &next in &adjacency[current] {
            if seen[next] {
                continue;
            }
            seen[next] = true;
            let step = model.distance(current, next);
            walk(model, adjacency, next, goal, seen, cost + step, best);
            seen[next] = false;
        }
    }

    let mut seen = vec![false; model.len()];
    seen[start] = true;
    let mut best = None;
    walk(model, &adjacency, start, goal, &mut seen, 0.0, &mut best);
    best
}

/// Sum of node-to-node distances along `path`, in native units.
pub fn path_length(model: &RouteModel, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|pair| model.distance(pair[0], pair[1]))
        .sum()
}
