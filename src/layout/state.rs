//! Node capability contract for the tidy tree layout.
//!
//! The layout is generic over any tree store that can answer structural
//! queries (children, parent, box size) and hand out the per-node
//! [`LayoutState`] the algorithm reads and writes. Nodes are addressed by a
//! cheap copyable handle, so parent, thread and extreme links are plain
//! relational references and never own anything.

/// Working and output fields the layout keeps on every node.
///
/// Must be at its neutral value ([`LayoutState::new`]) before a layout
/// starts; the algorithm does not reset it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState<Id> {
    /// Final absolute x-coordinate (left edge of the node box).
    pub x: f64,
    /// Final absolute y-coordinate (top edge of the node box).
    pub y: f64,
    /// Preliminary x relative to the subtree origin.
    pub prelim: f64,
    /// Deferred offset applied to the whole subtree in the second walk.
    pub modifier: f64,
    /// Pending shift for evenly spacing intermediate siblings.
    pub shift: f64,
    /// Pending change for evenly spacing intermediate siblings.
    pub change: f64,
    /// Left contour thread.
    pub thread_left: Option<Id>,
    /// Right contour thread.
    pub thread_right: Option<Id>,
    /// Deepest known node on the subtree's left contour.
    pub extreme_left: Id,
    /// Deepest known node on the subtree's right contour.
    pub extreme_right: Id,
    /// Sum of modifiers from this node down to `extreme_left`.
    pub modsum_extreme_left: f64,
    /// Sum of modifiers from this node down to `extreme_right`.
    pub modsum_extreme_right: f64,
}

impl<Id: Copy> LayoutState<Id> {
    /// Neutral state for the node `id`: zeroes, no threads, itself as both
    /// extremes.
    pub fn new(id: Id) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            prelim: 0.0,
            modifier: 0.0,
            shift: 0.0,
            change: 0.0,
            thread_left: None,
            thread_right: None,
            extreme_left: id,
            extreme_right: id,
            modsum_extreme_left: 0.0,
            modsum_extreme_right: 0.0,
        }
    }

    /// Restore the neutral state, e.g. before laying out the same tree again.
    pub fn reset(&mut self, id: Id) {
        *self = Self::new(id);
    }
}

/// A rooted, ordered tree the layout can run over.
///
/// Implementors own the nodes; the layout only mutates the [`LayoutState`]
/// of each node. Handles passed in are always ones previously returned by
/// [`TidyTree::children`] or [`TidyTree::parent`], or the root given to the
/// layout, so implementations may panic on foreign handles.
pub trait TidyTree {
    /// Node handle.
    type Id: Copy + Eq;

    /// Children in left-to-right order.
    fn children(&self, node: Self::Id) -> &[Self::Id];

    /// Parent of `node`, `None` for the root.
    fn parent(&self, node: Self::Id) -> Option<Self::Id>;

    /// Width of the node's own box.
    fn width(&self, node: Self::Id) -> f64;

    /// Height of the node's own box.
    fn height(&self, node: Self::Id) -> f64;

    /// Layout fields of `node`.
    fn state(&self, node: Self::Id) -> &LayoutState<Self::Id>;

    /// Mutable layout fields of `node`.
    fn state_mut(&mut self, node: Self::Id) -> &mut LayoutState<Self::Id>;

    /// The `index`-th child of `node`.
    #[inline]
    fn child(&self, node: Self::Id, index: usize) -> Self::Id {
        self.children(node)[index]
    }

    /// Number of children of `node`.
    #[inline]
    fn child_count(&self, node: Self::Id) -> usize {
        self.children(node).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_neutral() {
        let state = LayoutState::new(7u32);
        assert_eq!(state.prelim, 0.0);
        assert_eq!(state.modifier, 0.0);
        assert_eq!(state.shift, 0.0);
        assert_eq!(state.change, 0.0);
        assert_eq!(state.thread_left, None);
        assert_eq!(state.thread_right, None);
        assert_eq!(state.extreme_left, 7);
        assert_eq!(state.extreme_right, 7);
        assert_eq!(state.modsum_extreme_left, 0.0);
        assert_eq!(state.modsum_extreme_right, 0.0);
    }

    #[test]
    fn test_reset_restores_neutral() {
        let mut state = LayoutState::new(1u32);
        state.x = 12.0;
        state.modifier = 3.5;
        state.thread_right = Some(4);
        state.extreme_left = 9;
        state.reset(1);
        assert_eq!(state, LayoutState::new(1));
    }
}
