//! Road-network graph consumed by the search engine.
//!
//! A [`RouteModel`] is immutable once built: nodes live in a table addressed
//! by [`NodeId`], roads are ordered node sequences, and every per-search
//! value (costs, visited flags, parent links) is kept by the search itself.
//! That keeps a single model shareable between concurrent searches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spatial::SpatialIndex;

/// Index of a node in the model's node table.
pub type NodeId = usize;

/// Index of a road in the model's road table.
pub type RoadId = usize;

/// Position of a node in normalised map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Calculate the Euclidean distance to another node.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Classification of a road, derived from the map's `highway` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadKind {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Unclassified,
    Footway,
}

impl RoadKind {
    /// Map a `highway` tag value onto a road kind.
    ///
    /// Link roads collapse onto their base kind. Returns `None` for tags that
    /// do not describe a road (those ways are ignored by the map loader).
    pub fn from_highway(tag: &str) -> Option<Self> {
        let base = tag.strip_suffix("_link").unwrap_or(tag);
        let kind = match base {
            "motorway" => RoadKind::Motorway,
            "trunk" => RoadKind::Trunk,
            "primary" => RoadKind::Primary,
            "secondary" => RoadKind::Secondary,
            "tertiary" => RoadKind::Tertiary,
            "residential" | "living_street" => RoadKind::Residential,
            "service" => RoadKind::Service,
            "unclassified" => RoadKind::Unclassified,
            "footway" | "pedestrian" | "path" | "steps" => RoadKind::Footway,
            _ => return None,
        };
        Some(kind)
    }

    /// Footways connect nodes but never serve as route endpoints.
    pub fn is_footway(self) -> bool {
        self == RoadKind::Footway
    }
}

impl fmt::Display for RoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RoadKind::Motorway => "motorway",
            RoadKind::Trunk => "trunk",
            RoadKind::Primary => "primary",
            RoadKind::Secondary => "secondary",
            RoadKind::Tertiary => "tertiary",
            RoadKind::Residential => "residential",
            RoadKind::Service => "service",
            RoadKind::Unclassified => "unclassified",
            RoadKind::Footway => "footway",
        };
        f.write_str(value)
    }
}

/// Ordered run of nodes along one road.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub kind: RoadKind,
    pub nodes: Vec<NodeId>,
}

/// Immutable road-network graph.
#[derive(Debug)]
pub struct RouteModel {
    nodes: Vec<Node>,
    roads: Vec<Road>,
    node_to_road: Vec<Vec<RoadId>>,
    metric_scale: f64,
    index: SpatialIndex,
}

impl RouteModel {
    /// Start building a model node by node.
    pub fn builder() -> RouteModelBuilder {
        RouteModelBuilder::default()
    }

    /// Number of nodes in the node table.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the model has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node's position.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All roads in the model.
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Roads passing through a node.
    pub fn roads_through(&self, id: NodeId) -> &[RoadId] {
        self.node_to_road
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Factor converting normalised map units into metres.
    pub fn metric_scale(&self) -> f64 {
        self.metric_scale
    }

    /// Euclidean distance between two nodes in normalised map units.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the node table.
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.nodes[a].distance_to(&self.nodes[b])
    }

    /// Resolve a normalised coordinate to the closest routable node.
    ///
    /// Nodes that only lie on footways are never returned; nodes on no road
    /// at all are.
    pub fn find_closest_node(&self, x: f64, y: f64) -> Result<NodeId> {
        self.index
            .nearest([x, y])
            .map(|(id, _)| id)
            .ok_or(Error::EmptyGraph)
    }

    /// Discover the neighbours of `id` that the search has not visited yet.
    ///
    /// Each road through the node contributes at most one neighbour: the
    /// closest other node on that road that is not visited and not at zero
    /// distance. A node reachable over several roads is reported once.
    pub fn neighbours<F>(&self, id: NodeId, is_visited: F) -> Vec<NodeId>
    where
        F: Fn(NodeId) -> bool,
    {
        let Some(origin) = self.nodes.get(id) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for &road_id in self.roads_through(id) {
            let mut closest: Option<(NodeId, f64)> = None;
            for &candidate in &self.roads[road_id].nodes {
                if candidate == id || is_visited(candidate) {
                    continue;
                }
                let distance = origin.distance_to(&self.nodes[candidate]);
                if distance == 0.0 {
                    continue;
                }
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((candidate, distance));
                }
            }

            if let Some((neighbour, _)) = closest {
                if !found.contains(&neighbour) {
                    found.push(neighbour);
                }
            }
        }
        found
    }
}

/// Incremental constructor for [`RouteModel`].
#[derive(Debug, Clone)]
pub struct RouteModelBuilder {
    nodes: Vec<Node>,
    roads: Vec<Road>,
    metric_scale: f64,
}

impl Default for RouteModelBuilder {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roads: Vec::new(),
            metric_scale: 1.0,
        }
    }
}

impl RouteModelBuilder {
    /// Add a node and return its id.
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        self.nodes.push(Node { x, y });
        self.nodes.len() - 1
    }

    /// Add a road running through `nodes` in order and return its id.
    ///
    /// Node ids are validated when the model is built.
    pub fn add_road<I>(&mut self, kind: RoadKind, nodes: I) -> RoadId
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.roads.push(Road {
            kind,
            nodes: nodes.into_iter().collect(),
        });
        self.roads.len() - 1
    }

    /// Set the factor converting normalised units into metres (default 1.0).
    pub fn metric_scale(mut self, scale: f64) -> Self {
        self.metric_scale = scale;
        self
    }

    /// Validate the collected nodes and roads and build the model.
    pub fn build(self) -> Result<RouteModel> {
        if !self.metric_scale.is_finite() || self.metric_scale <= 0.0 {
            return Err(Error::InvalidMetricScale {
                value: self.metric_scale,
            });
        }

        for node in &self.nodes {
            if !node.x.is_finite() {
                return Err(Error::InvalidCoordinate {
                    axis: "x",
                    value: node.x,
                });
            }
            if !node.y.is_finite() {
                return Err(Error::InvalidCoordinate {
                    axis: "y",
                    value: node.y,
                });
            }
        }

        let mut node_to_road: Vec<Vec<RoadId>> = vec![Vec::new(); self.nodes.len()];
        for (road_id, road) in self.roads.iter().enumerate() {
            for &node in &road.nodes {
                let roads = node_to_road
                    .get_mut(node)
                    .ok_or(Error::UnknownNode { id: node })?;
                if !roads.contains(&road_id) {
                    roads.push(road_id);
                }
            }
        }

        let roads = &self.roads;
        let index = SpatialIndex::build(self.nodes.iter().enumerate().filter_map(|(id, node)| {
            let through = &node_to_road[id];
            let routable =
                through.is_empty() || through.iter().any(|&road| !roads[road].kind.is_footway());
            routable.then_some((id, [node.x, node.y]))
        }));

        Ok(RouteModel {
            nodes: self.nodes,
            roads: self.roads,
            node_to_road,
            metric_scale: self.metric_scale,
            index,
        })
    }
}
