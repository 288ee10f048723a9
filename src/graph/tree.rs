//! Arena-backed tree implementing the layout contract.
//!
//! Nodes live in a single `Vec` and reference each other by [`NodeId`], so
//! parent and sibling links never own anything. Construction is validated:
//! every mutation keeps the structure a forest of ordered trees, which is
//! what the layout assumes but never checks itself.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use super::error::TreeError;
use super::node::{NodeId, TreeNode};
use crate::layout::{LayoutState, TidyTree};

/// A rooted, ordered tree of sized boxes.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a tree with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Add a detached node with the given box size.
    pub fn add_node(&mut self, width: f64, height: f64) -> Result<NodeId, TreeError> {
        let index = self.nodes.len();
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(TreeError::InvalidSize {
                index,
                width,
                height,
            });
        }

        let id = NodeId(index as u32);
        self.nodes.push(TreeNode::new(id, width, height));
        Ok(id)
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// `child` must be a detached root that is not an ancestor of `parent`.
    /// The ancestor check walks up from `parent`, so this costs O(depth);
    /// bulk input should go through [`Tree::from_edges`].
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_link(parent, child)?;

        // child is a root, so it can only be an ancestor of parent by being
        // its topmost one
        let mut top = parent;
        while let Some(up) = self.nodes[top.index()].parent {
            top = up;
        }
        if top == child {
            return Err(TreeError::Cycle { parent, child });
        }

        self.link(parent, child);
        Ok(())
    }

    /// Create a node and append it as the last child of `parent`.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        width: f64,
        height: f64,
    ) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        let child = self.add_node(width, height)?;
        self.link(parent, child);
        Ok(child)
    }

    /// Build a tree from flat arrays.
    ///
    /// `sizes` is `[w0, h0, w1, h1, ...]` with one pair per node;
    /// `edges` is `[parent0, child0, parent1, child1, ...]`. Children keep
    /// the order their edges appear in. Runs in O(nodes + edges).
    pub fn from_edges(sizes: &[f64], edges: &[u32]) -> Result<Self, TreeError> {
        if sizes.len() % 2 != 0 {
            return Err(TreeError::OddSizeList(sizes.len()));
        }
        if edges.len() % 2 != 0 {
            return Err(TreeError::OddEdgeList(edges.len()));
        }

        let mut tree = Self::with_capacity(sizes.len() / 2);
        for pair in sizes.chunks_exact(2) {
            tree.add_node(pair[0], pair[1])?;
        }
        for pair in edges.chunks_exact(2) {
            let (parent, child) = (NodeId(pair[0]), NodeId(pair[1]));
            tree.check_link(parent, child)?;
            tree.link(parent, child);
        }
        tree.check_acyclic()?;
        Ok(tree)
    }

    /// Build a tree from the part of a petgraph graph reachable from `root`
    /// along outgoing edges.
    ///
    /// Children are ordered by edge index, which is insertion order as long
    /// as no edges were removed. Returns the tree and the mapping from graph
    /// indices to tree nodes.
    pub fn from_graph<N, E>(
        graph: &StableGraph<N, E, Directed>,
        root: NodeIndex,
        mut size: impl FnMut(&N) -> (f64, f64),
    ) -> Result<(Self, HashMap<NodeIndex, NodeId>), TreeError> {
        let weight = graph
            .node_weight(root)
            .ok_or(TreeError::UnknownGraphNode(root.index()))?;

        let mut tree = Self::with_capacity(graph.node_count());
        let mut mapping = HashMap::with_capacity(graph.node_count());
        let (width, height) = size(weight);
        mapping.insert(root, tree.add_node(width, height)?);

        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let parent = mapping[&index];
            let mut outgoing: Vec<_> = graph
                .edges_directed(index, Direction::Outgoing)
                .map(|edge| (edge.id(), edge.target()))
                .collect();
            outgoing.sort_unstable_by_key(|&(edge, _)| edge);

            for (_, target) in outgoing {
                if mapping.contains_key(&target) {
                    return Err(TreeError::NotATree(target.index()));
                }
                let (width, height) = size(&graph[target]);
                let child = tree.push_child(parent, width, height)?;
                mapping.insert(target, child);
                stack.push(target);
            }
        }

        Ok((tree, mapping))
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    /// Checks for `parent -> child` that need no walk over the tree.
    fn check_link(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        if parent == child {
            return Err(TreeError::SelfLoop(child));
        }
        if let Some(existing) = self.nodes[child.index()].parent {
            return Err(TreeError::AlreadyHasParent {
                child,
                parent: existing,
            });
        }
        Ok(())
    }

    /// Every node has at most one parent, so the links form a forest exactly
    /// when every node is reachable from a parentless one.
    fn check_acyclic(&self) -> Result<(), TreeError> {
        let mut reached = vec![false; self.nodes.len()];
        let mut stack: Vec<NodeId> = self
            .node_ids()
            .filter(|&id| self.nodes[id.index()].parent.is_none())
            .collect();
        while let Some(id) = stack.pop() {
            reached[id.index()] = true;
            stack.extend_from_slice(&self.nodes[id.index()].children);
        }

        let Some(mut child) = self.node_ids().find(|&id| !reached[id.index()]) else {
            return Ok(());
        };
        // ancestors of an unreached node are unreached too, so climbing from
        // it ends on a cycle; report the edge that closes it
        while let Some(parent) = self.nodes[child.index()].parent {
            reached[child.index()] = true;
            if reached[parent.index()] {
                return Err(TreeError::Cycle { parent, child });
            }
            child = parent;
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.index())
    }

    /// All node ids in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// The single node without a parent.
    pub fn root(&self) -> Result<NodeId, TreeError> {
        let mut roots = self
            .node_ids()
            .filter(|&id| self.nodes[id.index()].parent.is_none());
        let root = roots.next().ok_or(TreeError::Empty)?;
        match roots.count() {
            0 => Ok(root),
            extra => Err(TreeError::MultipleRoots(extra + 1)),
        }
    }

    /// Laid-out position (top-left corner) of a node.
    pub fn position(&self, id: NodeId) -> Option<(f64, f64)> {
        self.node(id).map(|node| (node.layout.x, node.layout.y))
    }

    /// Positions of all nodes in id order.
    pub fn positions(&self) -> Vec<(f64, f64)> {
        self.nodes
            .iter()
            .map(|node| (node.layout.x, node.layout.y))
            .collect()
    }

    /// Bounding box of all laid-out node boxes.
    ///
    /// Returns (min_x, min_y, max_x, max_y), or None if the tree is empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for node in &self.nodes {
            let LayoutState { x, y, .. } = node.layout;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x + node.width);
            max_y = max_y.max(y + node.height);
        }
        Some((min_x, min_y, max_x, max_y))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Return every node's layout fields to their neutral state.
    pub fn reset_layout(&mut self) {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.layout.reset(NodeId(i as u32));
        }
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl TidyTree for Tree {
    type Id = NodeId;

    #[inline]
    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    #[inline]
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    #[inline]
    fn width(&self, node: NodeId) -> f64 {
        self.nodes[node.index()].width
    }

    #[inline]
    fn height(&self, node: NodeId) -> f64 {
        self.nodes[node.index()].height
    }

    #[inline]
    fn state(&self, node: NodeId) -> &LayoutState<NodeId> {
        &self.nodes[node.index()].layout
    }

    #[inline]
    fn state_mut(&mut self, node: NodeId) -> &mut LayoutState<NodeId> {
        &mut self.nodes[node.index()].layout
    }
}
