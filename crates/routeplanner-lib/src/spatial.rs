//! KD-tree index answering nearest-node queries over normalised map
//! coordinates.
//!
//! The index is built once per [`RouteModel`](crate::RouteModel) from the
//! nodes that may serve as route endpoints and is queried whenever a raw
//! coordinate has to be resolved to a graph node.

use std::collections::HashSet;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::model::NodeId;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Static 2-D nearest-neighbour index over node positions.
pub struct SpatialIndex {
    /// KD-tree storing the position of each entry in `ids`.
    tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
    /// Node identifier for each indexed entry.
    ids: Vec<NodeId>,
}

impl SpatialIndex {
    /// Build an index from `(node, [x, y])` pairs.
    ///
    /// Each distinct position is indexed once, under the first node that
    /// has it. A KD-tree bucket cannot be split when more than
    /// `BUCKET_SIZE` entries share one position.
    pub fn build<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, [f64; 2])>,
    {
        let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        let mut coincident = 0_usize;
        for (id, coords) in points {
            // `+ 0.0` folds -0.0 into 0.0 so both share one key.
            let key = [(coords[0] + 0.0).to_bits(), (coords[1] + 0.0).to_bits()];
            if !seen.insert(key) {
                coincident += 1;
                continue;
            }
            tree.add(&coords, ids.len());
            ids.push(id);
        }

        debug!(
            node_count = ids.len(),
            coincident,
            "built nearest-node index"
        );

        Self { tree, ids }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Find the node closest to a point.
    ///
    /// Returns the node id and its Euclidean distance to `point`, or `None`
    /// when nothing is indexed.
    pub fn nearest(&self, point: [f64; 2]) -> Option<(NodeId, f64)> {
        if self.ids.is_empty() {
            return None;
        }

        let neighbour = self.tree.nearest_one::<SquaredEuclidean>(&point);
        let id = *self.ids.get(neighbour.item)?;
        Some((id, neighbour.distance.sqrt()))
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.ids.len())
            .finish()
    }
}
