//! A* route search over a [`RouteModel`].
//!
//! [`RoutePlanner`] resolves a start and end coordinate to graph nodes, runs
//! the A* loop, and keeps the reconstructed path together with its length in
//! metres.
//!
//! # Expansion policy
//!
//! Every neighbour the model reports is pushed onto the frontier with its
//! parent, cost and estimate overwritten. There is no decrease-key step:
//! a node is marked visited when it is first pushed and the model stops
//! reporting it afterwards, so its first discovery is final. On graphs where
//! a node is first discovered through a more expensive predecessor the
//! returned route can be longer than the optimum.
//!
//! # Example
//!
//! ```
//! use routeplanner_lib::{RoadKind, RouteModel, RoutePlanner, SearchOutcome};
//!
//! # fn main() -> routeplanner_lib::Result<()> {
//! let mut builder = RouteModel::builder().metric_scale(100.0);
//! let a = builder.add_node(0.0, 0.0);
//! let b = builder.add_node(1.0, 0.0);
//! builder.add_road(RoadKind::Residential, [a, b]);
//! let model = builder.build()?;
//!
//! let mut planner = RoutePlanner::new(&model, [0.0, 0.0], [100.0, 0.0])?;
//! assert_eq!(planner.run()?, SearchOutcome::Found);
//! assert_eq!(planner.path(), &[a, b]);
//! assert!((planner.distance() - 100.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::model::{NodeId, RouteModel};

/// Per-node values owned by a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeState {
    /// Cost from the start node along the path that discovered this node.
    pub g_value: f64,
    /// Straight-line estimate of the remaining cost to the goal.
    pub h_value: f64,
    /// Set once the node has entered the frontier.
    pub visited: bool,
    /// Predecessor on the discovering path; `None` for the start node.
    pub parent: Option<NodeId>,
}

/// Side table of [`NodeState`] keyed by node id.
///
/// Keeping this outside the model lets several searches share one graph.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    nodes: Vec<NodeState>,
}

impl SearchState {
    /// Fresh state for a graph with `len` nodes.
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![NodeState::default(); len],
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(id)
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|state| state.visited)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|state| state.parent)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeState> {
        self.nodes.get_mut(id).ok_or(Error::UnknownNode { id })
    }
}

/// Terminal state of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The goal was reached; the path and distance are populated.
    Found,
    /// The frontier ran dry before the goal was reached.
    NoPath,
}

/// One node along a route, with its position in normalised map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteStep {
    pub node: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Route found by a successful search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub start: NodeId,
    pub goal: NodeId,
    pub steps: Vec<RouteStep>,
    /// Route length in metres.
    pub distance: f64,
}

impl Route {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// A* search between two points on a [`RouteModel`].
pub struct RoutePlanner<'a> {
    model: &'a RouteModel,
    state: SearchState,
    frontier: Frontier,
    start_node: NodeId,
    end_node: NodeId,
    path: Vec<NodeId>,
    distance: f64,
    expanded: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> RoutePlanner<'a> {
    /// Resolve `start` and `end` to their nearest nodes.
    ///
    /// Both points are `[x, y]` percentages (0 to 100) of the map extent and
    /// are divided by 100 to reach the model's normalised units.
    pub fn new(model: &'a RouteModel, start: [f64; 2], end: [f64; 2]) -> Result<Self> {
        let [start_x, start_y] = normalise(start)?;
        let [end_x, end_y] = normalise(end)?;

        let start_node = model.find_closest_node(start_x, start_y)?;
        let end_node = model.find_closest_node(end_x, end_y)?;

        Ok(Self {
            model,
            state: SearchState::new(model.len()),
            frontier: Frontier::new(),
            start_node,
            end_node,
            path: Vec::new(),
            distance: 0.0,
            expanded: 0,
            cancel: None,
        })
    }

    /// Poll `flag` once per loop iteration and stop with
    /// [`Error::Cancelled`] once it is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    /// Nodes from start to end of the last successful run; empty otherwise.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Length in metres of the last path found, `0.0` if none was found.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of nodes expanded by the last run.
    pub fn expanded_nodes(&self) -> usize {
        self.expanded
    }

    /// Search state of the last run.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Owned summary of the last successful run.
    pub fn route(&self) -> Option<Route> {
        if self.path.is_empty() {
            return None;
        }

        let steps = self
            .path
            .iter()
            .filter_map(|&node| {
                self.model
                    .node(node)
                    .map(|position| RouteStep {
                        node,
                        x: position.x,
                        y: position.y,
                    })
            })
            .collect();

        Some(Route {
            start: self.start_node,
            goal: self.end_node,
            steps,
            distance: self.distance,
        })
    }

    /// Run the search to completion.
    ///
    /// Each call starts from a clean state, so a planner can be run again.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        self.reset();
        debug!(
            start = self.start_node,
            goal = self.end_node,
            "starting A* search"
        );

        let start_h = self.heuristic(self.start_node);
        let start = self.state.get_mut(self.start_node)?;
        start.visited = true;
        start.h_value = start_h;
        self.frontier.push(self.start_node, 0.0, start_h);

        loop {
            if self.is_cancelled() {
                debug!(expanded = self.expanded, "search cancelled");
                return Err(Error::Cancelled);
            }

            let Some(current) = self.frontier.pop() else {
                break;
            };

            if current == self.end_node {
                self.path = self.reconstruct(current)?;
                self.distance = self.measure(&self.path);
                debug!(
                    hops = self.path.len().saturating_sub(1),
                    distance = self.distance,
                    expanded = self.expanded,
                    "route found"
                );
                return Ok(SearchOutcome::Found);
            }

            self.expand(current)?;
        }

        debug!(expanded = self.expanded, "frontier exhausted before reaching goal");
        Ok(SearchOutcome::NoPath)
    }

    fn reset(&mut self) {
        self.state = SearchState::new(self.model.len());
        self.frontier.clear();
        self.path.clear();
        self.distance = 0.0;
        self.expanded = 0;
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn heuristic(&self, node: NodeId) -> f64 {
        self.model.distance(node, self.end_node)
    }

    fn expand(&mut self, current: NodeId) -> Result<()> {
        self.expanded += 1;
        let current_g = self.state.get(current).map_or(0.0, |state| state.g_value);

        let state = &self.state;
        let neighbours = self
            .model
            .neighbours(current, |node| state.is_visited(node));

        for next in neighbours {
            let step = self.model.distance(current, next);
            if !step.is_finite() || step < 0.0 {
                return Err(Error::InvalidEdgeDistance {
                    from: current,
                    to: next,
                    distance: step,
                });
            }

            let h_value = self.heuristic(next);
            let g_value = current_g + step;
            let entry = self.state.get_mut(next)?;
            entry.parent = Some(current);
            entry.h_value = h_value;
            entry.g_value = g_value;
            entry.visited = true;
            self.frontier.push(next, g_value, h_value);
        }

        Ok(())
    }

    fn reconstruct(&self, goal: NodeId) -> Result<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(node) = current {
            if path.len() >= self.model.len() {
                return Err(Error::ParentCycle { node });
            }
            path.push(node);
            current = self.state.parent(node);
        }
        path.reverse();
        Ok(path)
    }

    fn measure(&self, path: &[NodeId]) -> f64 {
        let native: f64 = path
            .windows(2)
            .map(|pair| self.model.distance(pair[0], pair[1]))
            .sum();
        native * self.model.metric_scale()
    }
}

/// Resolve, search and summarise in one call.
///
/// Returns `Ok(None)` when the two points are not connected.
pub fn plan_route(model: &RouteModel, start: [f64; 2], end: [f64; 2]) -> Result<Option<Route>> {
    let mut planner = RoutePlanner::new(model, start, end)?;
    match planner.run()? {
        SearchOutcome::Found => Ok(planner.route()),
        SearchOutcome::NoPath => Ok(None),
    }
}

fn normalise([x, y]: [f64; 2]) -> Result<[f64; 2]> {
    Ok([percentage("x", x)? / 100.0, percentage("y", y)? / 100.0])
}

fn percentage(axis: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidCoordinate { axis, value })
    }
}
