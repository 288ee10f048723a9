//! Tidy tree layout.
//!
//! This module computes planar, non-overlapping coordinates for rooted,
//! ordered trees whose nodes have arbitrary widths and heights. The
//! algorithm is generic over any store implementing [`TidyTree`]; the
//! crate's own [`Tree`](crate::graph::Tree) is one such store.

pub mod contour;
pub mod lowest_y;
pub mod state;
pub mod tidy_tree;

pub use state::{LayoutState, TidyTree};
pub use tidy_tree::{TidyTreeConfig, TidyTreeLayout, WalkStrategy, layout};
