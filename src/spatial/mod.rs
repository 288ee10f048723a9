//! Spatial indexing over laid-out node boxes.
//!
//! This module provides an R-tree based index for point and rectangle
//! queries on a finished layout, and for checking that no two node boxes
//! overlap.

mod rtree;

pub use rtree::{BoxIndex, NodeBox};
