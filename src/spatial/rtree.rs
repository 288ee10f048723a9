//! R-tree over laid-out node boxes using the rstar crate.
//!
//! Provides O(log n) queries for:
//! - Boxes containing a point
//! - Boxes intersecting a rectangle
//! - Pairs of boxes that overlap (layout verification)

use rstar::{AABB, RTree, RTreeObject};

use crate::graph::{NodeId, Tree};
use crate::layout::TidyTree;

/// A node's laid-out box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// The node identifier.
    pub id: NodeId,
    /// Top-left corner.
    pub min: [f64; 2],
    /// Bottom-right corner.
    pub max: [f64; 2],
}

impl NodeBox {
    /// Create a box from its top-left corner and size.
    pub fn new(id: NodeId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            min: [x, y],
            max: [x + width, y + height],
        }
    }

    /// Whether the interiors of two boxes intersect. Touching edges do not
    /// count, and empty boxes (see [`NodeBox::is_empty`]) never overlap
    /// anything.
    pub fn overlaps(&self, other: &NodeBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (0..2).all(|axis| self.min[axis] < other.max[axis] && other.min[axis] < self.max[axis])
    }

    /// Zero extent along either axis.
    pub fn is_empty(&self) -> bool {
        (0..2).any(|axis| self.max[axis] <= self.min[axis])
    }
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Spatial index for laid-out tree nodes.
pub struct BoxIndex {
    tree: RTree<NodeBox>,
}

impl BoxIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load the boxes of every node of a laid-out tree.
    pub fn from_tree(tree: &Tree) -> Self {
        let boxes: Vec<_> = tree
            .node_ids()
            .map(|id| {
                let state = tree.state(id);
                NodeBox::new(id, state.x, state.y, tree.width(id), tree.height(id))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(boxes),
        }
    }

    /// Insert a box.
    pub fn insert(&mut self, node_box: NodeBox) {
        self.tree.insert(node_box);
    }

    /// All nodes whose box contains the point (edges inclusive).
    pub fn at_point(&self, x: f64, y: f64) -> Vec<NodeId> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|node_box| node_box.id)
            .collect()
    }

    /// All nodes whose box intersects the rectangle.
    pub fn in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<NodeId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|node_box| node_box.id)
            .collect()
    }

    /// Every pair of nodes whose boxes overlap, each pair reported once with
    /// the smaller id first.
    pub fn overlapping_pairs(&self) -> Vec<(NodeId, NodeId)> {
        let mut pairs = Vec::new();
        for node_box in self.tree.iter() {
            for other in self.tree.locate_in_envelope_intersecting(&node_box.envelope()) {
                if node_box.id < other.id && node_box.overlaps(other) {
                    pairs.push((node_box.id, other.id));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Get the number of boxes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for BoxIndex {
    fn default() -> Self {
        Self::new()
    }
}
