//! Browser tests for the wasm-bindgen API. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use tidy_tree_wasm::{TidyTreeWasm, layout_from_edges};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn build_and_layout_two_children() {
    let mut tree = TidyTreeWasm::new();
    let root = tree.add_node(10.0, 10.0).unwrap();
    let a = tree.add_node(10.0, 10.0).unwrap();
    let b = tree.add_node(10.0, 10.0).unwrap();
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();

    let positions = tree.compute_layout().unwrap().to_vec();
    assert_eq!(positions, vec![15.0, 0.0, 0.0, 30.0, 30.0, 30.0]);
    assert_eq!(tree.get_node_x(b), Some(30.0));
    assert_eq!(tree.get_bounds(), Some(vec![0.0, 0.0, 40.0, 40.0]));
    assert_eq!(tree.find_nodes_at(20.0, 5.0), vec![root]);
}

#[wasm_bindgen_test]
fn invalid_child_is_rejected() {
    let mut tree = TidyTreeWasm::new();
    let root = tree.add_node(10.0, 10.0).unwrap();
    assert!(tree.add_child(root, root).is_err());
    assert!(tree.add_node(-1.0, 1.0).is_err());
}

#[wasm_bindgen_test]
fn layout_from_flat_arrays() {
    let sizes = [10.0, 10.0, 10.0, 10.0];
    let positions = layout_from_edges(&sizes, &[0, 1], JsValue::UNDEFINED)
        .unwrap()
        .to_vec();
    assert_eq!(positions, vec![0.0, 0.0, 0.0, 30.0]);
}
