//! Contour walking helpers.
//!
//! A subtree's left (right) contour is followed through its first (last)
//! children; once a node on the contour has no children, its thread, if
//! any, continues the walk into a deeper sibling subtree.

use super::state::TidyTree;

/// Next node on the left contour below `node`.
#[inline]
pub fn next_left_contour<T: TidyTree>(tree: &T, node: T::Id) -> Option<T::Id> {
    tree.children(node)
        .first()
        .copied()
        .or(tree.state(node).thread_left)
}

/// Next node on the right contour below `node`.
#[inline]
pub fn next_right_contour<T: TidyTree>(tree: &T, node: T::Id) -> Option<T::Id> {
    tree.children(node)
        .last()
        .copied()
        .or(tree.state(node).thread_right)
}

/// Lowest y covered by the node's own box.
#[inline]
pub fn bottom<T: TidyTree>(tree: &T, node: T::Id) -> f64 {
    tree.state(node).y + tree.height(node)
}

/// Recompute the extreme nodes of `node` from its outer children.
///
/// A leaf is its own extreme on both sides with a zero modifier sum.
pub fn set_extremes<T: TidyTree>(tree: &mut T, node: T::Id) {
    let children = tree.children(node);
    let (el, msel, er, mser) = match (children.first(), children.last()) {
        (Some(&first), Some(&last)) => {
            let first = tree.state(first);
            let last = tree.state(last);
            (
                first.extreme_left,
                first.modsum_extreme_left,
                last.extreme_right,
                last.modsum_extreme_right,
            )
        }
        _ => (node, 0.0, node, 0.0),
    };

    let state = tree.state_mut(node);
    state.extreme_left = el;
    state.modsum_extreme_left = msel;
    state.extreme_right = er;
    state.modsum_extreme_right = mser;
}
