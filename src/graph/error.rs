//! Errors raised while building a tree.

use thiserror::Error;

use super::node::NodeId;

/// Reasons a tree cannot be built from the given input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("{0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {index} has invalid size {width}x{height}; expected finite, non-negative values")]
    InvalidSize { index: usize, width: f64, height: f64 },

    #[error("{0} cannot be its own child")]
    SelfLoop(NodeId),

    #[error("{child} already has parent {parent}")]
    AlreadyHasParent { child: NodeId, parent: NodeId },

    #[error("attaching {child} below {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("edge list has odd length {0}; expected [parent, child] pairs")]
    OddEdgeList(usize),

    #[error("size list has odd length {0}; expected [width, height] pairs")]
    OddSizeList(usize),

    #[error("tree has no nodes")]
    Empty,

    #[error("tree has {0} roots; expected exactly one")]
    MultipleRoots(usize),

    #[error("graph node {0} does not exist")]
    UnknownGraphNode(usize),

    #[error("graph node {0} is reachable along more than one path")]
    NotATree(usize),
}
