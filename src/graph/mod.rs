//! Tree data structures.
//!
//! This module provides an arena-backed [`Tree`] of sized boxes that
//! implements the layout's [`TidyTree`](crate::layout::TidyTree) contract,
//! with validated construction from node/edge calls, flat arrays, or a
//! petgraph `StableGraph`.

mod error;
mod node;
mod tree;

pub use error::TreeError;
pub use node::NodeId;
pub use tree::Tree;
