//! Node identifier and storage for the arena tree.
//!
//! Each node has:
//! - A stable identifier (its slot in the arena)
//! - The size (width, height) of its own box, fixed at creation
//! - Parent and ordered children links
//! - The layout state written by the tidy tree algorithm

use std::fmt;

use crate::layout::LayoutState;

/// Handle to a node of a [`Tree`](super::Tree): the node's slot in the arena.
///
/// Handles are never reused while the tree lives; [`Tree::clear`](super::Tree::clear)
/// invalidates all of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The handle as passed across the JavaScript boundary.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// One arena slot: box size, links, and layout fields.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    pub(super) width: f64,
    pub(super) height: f64,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) layout: LayoutState<NodeId>,
}

impl TreeNode {
    pub(super) fn new(id: NodeId, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            parent: None,
            children: Vec::new(),
            layout: LayoutState::new(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "node #42");
    }

    #[test]
    fn test_new_node_is_detached_and_neutral() {
        let node = TreeNode::new(NodeId(3), 8.0, 2.0);
        assert_eq!((node.width, node.height), (8.0, 2.0));
        assert!(node.parent.is_none());
        assert!(node.children.is_empty());
        assert_eq!(node.layout, LayoutState::new(NodeId(3)));
    }
}
