//! Tidy Tree - WASM Module
//!
//! This crate computes tidy, non-overlapping layouts for rooted, ordered
//! trees whose nodes have arbitrary widths and heights, in time linear in
//! the number of nodes. It is usable as a plain Rust library and is also
//! compiled to WebAssembly, exposing a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `layout`: The tidy tree algorithm, generic over any [`layout::TidyTree`]
//! - `graph`: Arena tree implementing the layout contract, with validated
//!   construction (including from petgraph graphs)
//! - `spatial`: R-tree spatial index over laid-out node boxes

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod graph;
pub mod layout;
pub mod spatial;

use graph::{NodeId, Tree, TreeError};
use layout::{TidyTreeConfig, TidyTreeLayout};
use spatial::BoxIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log a rejected call to the browser console and turn it into a JS error.
fn reject(error: TreeError) -> JsError {
    web_sys::console::error_1(&JsValue::from_str(&error.to_string()));
    JsError::from(error)
}

fn parse_config(config: JsValue) -> Result<TidyTreeConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(TidyTreeConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))
}

/// Lay out `tree` from its single root and return `[x0, y0, x1, y1, ...]`.
fn layout_positions(tree: &mut Tree, layout: &TidyTreeLayout) -> Result<Vec<f64>, TreeError> {
    let root = tree.root()?;
    tree.reset_layout();
    layout.layout(tree, root);
    Ok(tree
        .positions()
        .into_iter()
        .flat_map(|(x, y)| [x, y])
        .collect())
}

/// Main entry point for building and laying out a tree from JavaScript.
///
/// This struct wraps a [`Tree`] and a [`TidyTreeLayout`] and provides the
/// public API exposed to JavaScript.
#[wasm_bindgen]
pub struct TidyTreeWasm {
    tree: Tree,
    layout: TidyTreeLayout,
}

#[wasm_bindgen]
impl TidyTreeWasm {
    /// Create a new empty tree with the default spacing.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            layout: TidyTreeLayout::with_defaults(),
        }
    }

    /// Create an empty tree with a layout configuration object, e.g.
    /// `{ verticalSpacing: 40, horizontalSpacing: 10, walk: "iterative" }`.
    /// Missing fields keep their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<TidyTreeWasm, JsError> {
        Ok(Self {
            tree: Tree::new(),
            layout: TidyTreeLayout::new(parse_config(config)?),
        })
    }

    // =========================================================================
    // Tree Construction
    // =========================================================================

    /// Add a detached node with the given box size.
    ///
    /// Returns the stable node ID.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, width: f64, height: f64) -> Result<u32, JsError> {
        self.tree
            .add_node(width, height)
            .map(NodeId::raw)
            .map_err(reject)
    }

    /// Append `child` as the last child of `parent`.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(&mut self, parent: u32, child: u32) -> Result<(), JsError> {
        self.tree
            .add_child(NodeId(parent), NodeId(child))
            .map_err(reject)
    }

    /// Get the number of nodes in the tree.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.tree.len() as u32
    }

    /// Clear all nodes.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Compute the tidy tree layout.
    ///
    /// The tree must have exactly one root. Returns a Float64Array of
    /// positions [x0, y0, x1, y1, ...], one top-left corner per node.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(&mut self) -> Result<Float64Array, JsError> {
        let positions = layout_positions(&mut self.tree, &self.layout).map_err(reject)?;
        Ok(Float64Array::from(&positions[..]))
    }

    /// Get a node's X position from the last layout.
    #[wasm_bindgen(js_name = getNodeX)]
    pub fn get_node_x(&self, node_id: u32) -> Option<f64> {
        self.tree.position(NodeId(node_id)).map(|(x, _)| x)
    }

    /// Get a node's Y position from the last layout.
    #[wasm_bindgen(js_name = getNodeY)]
    pub fn get_node_y(&self, node_id: u32) -> Option<f64> {
        self.tree.position(NodeId(node_id)).map(|(_, y)| y)
    }

    /// Get the bounding box of all node boxes.
    ///
    /// Returns [min_x, min_y, max_x, max_y], or None if the tree is empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f64>> {
        self.tree
            .bounds()
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find all nodes whose laid-out box contains the point.
    ///
    /// Returns a Uint32Array of node IDs.
    #[wasm_bindgen(js_name = findNodesAt)]
    pub fn find_nodes_at(&self, x: f64, y: f64) -> Vec<u32> {
        BoxIndex::from_tree(&self.tree)
            .at_point(x, y)
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }
}

impl Default for TidyTreeWasm {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot layout from flat arrays.
///
/// * `sizes` - [w0, h0, w1, h1, ...], one pair per node
/// * `edges` - [parent0, child0, parent1, child1, ...]; children keep the
///   order their edges appear in
/// * `config` - optional configuration object (see `TidyTreeWasm.withConfig`)
///
/// Returns a Float64Array of positions [x0, y0, x1, y1, ...].
#[wasm_bindgen(js_name = layoutFromEdges)]
pub fn layout_from_edges(
    sizes: &[f64],
    edges: &[u32],
    config: JsValue,
) -> Result<Float64Array, JsError> {
    let layout = TidyTreeLayout::new(parse_config(config)?);
    let mut tree = Tree::from_edges(sizes, edges).map_err(reject)?;
    let positions = layout_positions(&mut tree, &layout).map_err(reject)?;
    Ok(Float64Array::from(&positions[..]))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::layout::{TidyTree, WalkStrategy};

    /// Test the full pipeline: flat arrays → tree → layout → spatial check.
    /// This simulates exactly what layoutFromEdges does, but without
    /// wasm_bindgen JS types.
    #[test]
    fn test_flat_arrays_to_layout() {
        // Tree: 0→1, 0→2, 1→3, 1→4
        let sizes = [20.0, 10.0, 10.0, 10.0, 10.0, 30.0, 8.0, 8.0, 8.0, 8.0];
        let edges = [0, 1, 0, 2, 1, 3, 1, 4];
        let mut tree = Tree::from_edges(&sizes, &edges).unwrap();

        let positions = layout_positions(&mut tree, &TidyTreeLayout::with_defaults()).unwrap();
        assert_eq!(positions.len(), 10);

        // root at the top, children one row below it
        assert_eq!(positions[1], 0.0);
        assert_eq!(positions[3], 30.0);
        assert_eq!(positions[5], 30.0);
        assert_eq!(positions[7], 60.0);
        assert_eq!(positions[9], 60.0);

        let index = BoxIndex::from_tree(&tree);
        assert!(index.overlapping_pairs().is_empty());
    }

    /// Test with a larger tree mimicking a hierarchical generator.
    /// 1000 nodes with varying branch factor, checking both walk strategies.
    #[test]
    fn test_large_hierarchical_tree() {
        let node_count = 1000u32;
        let mut sizes = Vec::with_capacity(node_count as usize * 2);
        for i in 0..node_count {
            sizes.push(10.0 + (i % 7) as f64 * 5.0);
            sizes.push(10.0 + (i % 3) as f64 * 12.0);
        }

        // Asymmetric branching: some nodes get 0 children, some get many
        let mut edges: Vec<u32> = Vec::new();
        let mut next_child = 1u32;
        let mut queue = vec![0u32];
        while next_child < node_count {
            let mut next_queue = Vec::new();
            for &parent in &queue {
                let children_count = match parent % 5 {
                    0 => 5,
                    1 => 3,
                    2 => 2,
                    3 => 1,
                    _ => 0,
                };
                for _ in 0..children_count {
                    if next_child >= node_count {
                        break;
                    }
                    edges.push(parent);
                    edges.push(next_child);
                    next_queue.push(next_child);
                    next_child += 1;
                }
            }
            if next_queue.is_empty() {
                break;
            }
            queue = next_queue;
        }

        let mut recursive = Tree::from_edges(&sizes, &edges).unwrap();
        let mut iterative = recursive.clone();
        let a = layout_positions(&mut recursive, &TidyTreeLayout::with_defaults()).unwrap();
        let b = layout_positions(
            &mut iterative,
            &TidyTreeLayout::new(TidyTreeConfig {
                walk: WalkStrategy::Iterative,
                ..Default::default()
            }),
        )
        .unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|v| v.is_finite()));

        let index = BoxIndex::from_tree(&recursive);
        let overlaps = index.overlapping_pairs();
        assert!(overlaps.is_empty(), "overlapping boxes: {overlaps:?}");
    }

    /// Laying out twice gives the same answer: positions are reset first.
    #[test]
    fn test_relayout_is_stable() {
        let mut tree = Tree::new();
        let root = tree.add_node(10.0, 10.0).unwrap();
        for _ in 0..4 {
            let child = tree.push_child(root, 12.0, 6.0).unwrap();
            tree.push_child(child, 30.0, 6.0).unwrap();
        }
        let layout = TidyTreeLayout::with_defaults();
        let first = layout_positions(&mut tree, &layout).unwrap();
        let second = layout_positions(&mut tree, &layout).unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.state(root).y, 0.0);
    }

    #[test]
    fn test_forest_is_rejected() {
        let mut tree = Tree::from_edges(&[1.0, 1.0, 1.0, 1.0], &[]).unwrap();
        let err = layout_positions(&mut tree, &TidyTreeLayout::with_defaults()).unwrap_err();
        assert_eq!(err, TreeError::MultipleRoots(2));
    }
}
