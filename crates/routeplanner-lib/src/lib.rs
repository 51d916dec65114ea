//! Route planner library entry points.
//!
//! This crate exposes the road-network model, the nearest-node index, map
//! loading, and the A* search engine that finds and measures the shortest
//! route between two points. Higher-level consumers (the CLI) should only
//! depend on the items exported here instead of reimplementing behavior.

pub mod error;
pub mod frontier;
pub mod map;
pub mod model;
pub mod search;
pub mod spatial;

pub use error::{Error, Result};
pub use frontier::Frontier;
pub use map::{
    default_map_path, load_map, parse_map, resolve_map_path, MapBounds, MapDocument, MAP_ENV_VAR,
};
pub use model::{Node, NodeId, Road, RoadId, RoadKind, RouteModel, RouteModelBuilder};
pub use search::{
    plan_route, NodeState, Route, RoutePlanner, RouteStep, SearchOutcome, SearchState,
};
pub use spatial::SpatialIndex;
