use thiserror::Error;

use crate::model::NodeId;

/// Convenient result alias for the route planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The graph has no node that a coordinate could resolve to.
    #[error("graph contains no routable nodes")]
    EmptyGraph,

    /// A start or end coordinate was not a percentage in 0..=100.
    #[error("invalid {axis} coordinate {value}; expected a percentage between 0 and 100")]
    InvalidCoordinate { axis: &'static str, value: f64 },

    /// A road or lookup referenced a node that is not in the node table.
    #[error("unknown node id {id}")]
    UnknownNode { id: NodeId },

    /// The native-to-metric scale must be finite and positive.
    #[error("invalid metric scale {value}")]
    InvalidMetricScale { value: f64 },

    /// A way in a map document referenced a node that was never declared.
    #[error("way {way} references unknown node {node}")]
    UnknownMapNode { way: String, node: String },

    /// No platform data directory could be resolved for the default map path.
    #[error("failed to resolve a default map location; pass --map or set ROUTEPLANNER_MAP")]
    MapPathUnavailable,

    /// Following parent links revisited a node.
    #[error("parent links form a cycle at node {node}")]
    ParentCycle { node: NodeId },

    /// The graph produced an edge with a negative or non-finite length.
    #[error("invalid edge distance {distance} between nodes {from} and {to}")]
    InvalidEdgeDistance {
        from: NodeId,
        to: NodeId,
        distance: f64,
    },

    /// The caller requested cancellation while the search was running.
    #[error("search was cancelled")]
    Cancelled,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for map document parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
