//! Non-layered tidy tree layout in linear time.
//!
//! Implements the algorithm from "Drawing Non-layered Tidy Trees in Linear
//! Time" (van der Ploeg, 2014), an extension of Walker's algorithm with the
//! Buchheim-Junger-Leipert improvements to nodes of arbitrary width and
//! height. Nodes on the same tree level may have different heights, so
//! contours are compared by actual y-extent rather than by depth.
//!
//! # Algorithm Overview
//!
//! 1. **First walk (bottom-up):** Place every subtree relative to its own
//!    origin. Each new child is pushed right until its left contour clears
//!    the right contour of all previous siblings. Threads splice contours of
//!    differently sized subtrees together, and extreme nodes let the next
//!    thread be installed in O(1).
//! 2. **Second walk (top-down):** Fold the deferred `shift`/`change` spacing
//!    into the children's modifiers and accumulate modifiers into absolute
//!    x-coordinates.
//!
//! Both walks exist in a recursive and an explicit-stack form; see
//! [`WalkStrategy`].

use serde::{Deserialize, Serialize};

use super::contour::{bottom, next_left_contour, next_right_contour, set_extremes};
use super::lowest_y::LowestY;
use super::state::TidyTree;

/// How the two walks traverse the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WalkStrategy {
    /// Plain recursion; stack depth grows with tree depth.
    #[default]
    Recursive,
    /// Explicit heap-allocated stack; safe for arbitrarily deep trees.
    Iterative,
}

/// Configuration for the tidy tree layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TidyTreeConfig {
    /// Gap inserted below every node before its children.
    pub vertical_spacing: f64,
    /// Minimum gap between adjacent subtree contours.
    pub horizontal_spacing: f64,
    /// Traversal used by both walks.
    pub walk: WalkStrategy,
}

impl Default for TidyTreeConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: 20.0,
            horizontal_spacing: 20.0,
            walk: WalkStrategy::Recursive,
        }
    }
}

/// The tidy tree layout engine.
#[derive(Debug, Clone, Default)]
pub struct TidyTreeLayout {
    config: TidyTreeConfig,
}

/// Compute `x`/`y` for every node below `root` with the default config.
pub fn layout<T: TidyTree>(tree: &mut T, root: T::Id) {
    TidyTreeLayout::with_defaults().layout(tree, root);
}

/// Pending work in the explicit-stack first walk.
struct WalkFrame<Id> {
    node: Id,
    next_child: usize,
    lows: LowestY,
}

impl<Id> WalkFrame<Id> {
    fn new(node: Id) -> Self {
        Self {
            node,
            next_child: 0,
            lows: LowestY::new(),
        }
    }
}

impl TidyTreeLayout {
    /// Create a new tidy tree layout with the given configuration.
    pub fn new(config: TidyTreeConfig) -> Self {
        Self { config }
    }

    /// Create a tidy tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TidyTreeConfig::default())
    }

    /// Compute `x`/`y` for every node in the tree rooted at `root`.
    ///
    /// Every node's [`LayoutState`](super::LayoutState) must be neutral on
    /// entry. Results are written into the states; nothing else changes.
    pub fn layout<T: TidyTree>(&self, tree: &mut T, root: T::Id) {
        let visited = match self.config.walk {
            WalkStrategy::Recursive => {
                self.first_walk(tree, root);
                self.second_walk(tree, root, 0.0)
            }
            WalkStrategy::Iterative => {
                self.first_walk_iterative(tree, root);
                self.second_walk_iterative(tree, root)
            }
        };
        tracing::debug!(
            nodes = visited,
            walk = ?self.config.walk,
            "tidy tree layout complete"
        );
    }

    // =========================================================================
    // First walk
    // =========================================================================

    fn assign_y<T: TidyTree>(&self, tree: &mut T, node: T::Id) {
        let y = match tree.parent(node) {
            Some(parent) => {
                tree.state(parent).y + tree.height(parent) + self.config.vertical_spacing
            }
            None => 0.0,
        };
        tree.state_mut(node).y = y;
    }

    fn first_walk<T: TidyTree>(&self, tree: &mut T, node: T::Id) {
        self.assign_y(tree, node);

        let count = tree.child_count(node);
        let mut lows = LowestY::new();
        for i in 0..count {
            let child = tree.child(node, i);
            self.first_walk(tree, child);
            self.place_child(tree, node, i, &mut lows);
        }

        if count > 0 {
            position_root(tree, node);
        }
        set_extremes(tree, node);
    }

    /// Same as [`Self::first_walk`], driven by an explicit stack.
    fn first_walk_iterative<T: TidyTree>(&self, tree: &mut T, root: T::Id) {
        self.assign_y(tree, root);
        let mut stack = vec![WalkFrame::new(root)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let count = tree.child_count(node);

            if frame.next_child < count {
                let child = tree.child(node, frame.next_child);
                frame.next_child += 1;
                self.assign_y(tree, child);
                stack.push(WalkFrame::new(child));
                continue;
            }

            if count > 0 {
                position_root(tree, node);
            }
            set_extremes(tree, node);
            stack.pop();

            if let Some(parent) = stack.last_mut() {
                let index = parent.next_child - 1;
                self.place_child(tree, parent.node, index, &mut parent.lows);
            }
        }
    }

    /// Fit the just-walked child `i` of `node` against children `0..i`.
    fn place_child<T: TidyTree>(&self, tree: &mut T, node: T::Id, i: usize, lows: &mut LowestY) {
        let child = tree.child(node, i);
        // the recorded depth is the subtree's deepest contour point, not the
        // child's own box
        if i == 0 {
            let el = tree.state(child).extreme_left;
            lows.insert(bottom(tree, el), 0);
            return;
        }

        let er = tree.state(child).extreme_right;
        let min_y = bottom(tree, er);
        self.separate(tree, node, i, lows);
        lows.insert(min_y, i);
    }

    /// Push child `i` right until it clears the right contour of children
    /// `0..i`, then thread the shorter contour onto the longer one.
    fn separate<T: TidyTree>(&self, tree: &mut T, node: T::Id, i: usize, lows: &LowestY) {
        let previous = tree.child(node, i - 1);
        let current = tree.child(node, i);
        let mut mssr = tree.state(previous).modifier;
        let mut mscl = tree.state(current).modifier;
        let mut sr = Some(previous);
        let mut cl = Some(current);
        let mut cursor = lows.cursor();

        while let (Some(right), Some(left)) = (sr, cl) {
            let sy = bottom(tree, right);
            let cy = bottom(tree, left);
            cursor.skip_above(sy);

            let dist = (mssr + tree.state(right).prelim + tree.width(right)
                + self.config.horizontal_spacing)
                - (mscl + tree.state(left).prelim);
            if dist > 0.0 {
                mscl += dist;
                let si = cursor.index().unwrap_or(i - 1);
                tracing::trace!(child = i, from = si, dist, "contour conflict");
                move_subtree(tree, node, i, si, dist);
            }

            if sy <= cy {
                sr = next_right_contour(tree, right);
                if let Some(next) = sr {
                    mssr += tree.state(next).modifier;
                }
            }
            if sy >= cy {
                cl = next_left_contour(tree, left);
                if let Some(next) = cl {
                    mscl += tree.state(next).modifier;
                }
            }
        }

        match (sr, cl) {
            (None, Some(left)) => set_left_thread(tree, node, i, left, mscl),
            (Some(right), None) => set_right_thread(tree, node, i, right, mssr),
            _ => {}
        }
    }

    // =========================================================================
    // Second walk
    // =========================================================================

    /// Returns the number of nodes visited.
    fn second_walk<T: TidyTree>(&self, tree: &mut T, node: T::Id, modsum: f64) -> usize {
        let modsum = modsum + tree.state(node).modifier;
        let state = tree.state_mut(node);
        state.x = state.prelim + modsum;
        add_child_spacing(tree, node);

        let mut visited = 1;
        for i in 0..tree.child_count(node) {
            let child = tree.child(node, i);
            visited += self.second_walk(tree, child, modsum);
        }
        visited
    }

    /// Same as [`Self::second_walk`], driven by an explicit stack.
    fn second_walk_iterative<T: TidyTree>(&self, tree: &mut T, root: T::Id) -> usize {
        let mut stack = vec![(root, 0.0)];
        let mut visited = 0;

        while let Some((node, modsum)) = stack.pop() {
            let modsum = modsum + tree.state(node).modifier;
            let state = tree.state_mut(node);
            state.x = state.prelim + modsum;
            add_child_spacing(tree, node);
            visited += 1;

            stack.extend(tree.children(node).iter().rev().map(|&child| (child, modsum)));
        }
        visited
    }
}

/// Center `node` over the outer edges of its first and last child.
fn position_root<T: TidyTree>(tree: &mut T, node: T::Id) {
    let first = tree.child(node, 0);
    let last = tree.child(node, tree.child_count(node) - 1);
    let left_edge = tree.state(first).prelim + tree.state(first).modifier;
    let right_edge = tree.state(last).prelim + tree.state(last).modifier + tree.width(last);
    let width = tree.width(node);
    tree.state_mut(node).prelim = (left_edge + right_edge) / 2.0 - width / 2.0;
}

fn move_subtree<T: TidyTree>(tree: &mut T, node: T::Id, i: usize, si: usize, dist: f64) {
    let child = tree.child(node, i);
    let state = tree.state_mut(child);
    state.modifier += dist;
    state.modsum_extreme_left += dist;
    state.modsum_extreme_right += dist;
    distribute_extra(tree, node, i, si, dist);
}

/// Spread a move of child `i` over the siblings strictly between `si` and
/// `i`; resolved later by [`add_child_spacing`].
fn distribute_extra<T: TidyTree>(tree: &mut T, node: T::Id, i: usize, si: usize, dist: f64) {
    if si + 1 == i {
        return;
    }
    let nr = (i - si) as f64;
    let first = tree.child(node, si + 1);
    let mover = tree.child(node, i);
    tree.state_mut(first).shift += dist / nr;
    let mover = tree.state_mut(mover);
    mover.shift -= dist / nr;
    mover.change -= dist - dist / nr;
}

/// Thread the end of the left contour of children `0..i` to `cl`, which
/// continues below it in child `i`.
fn set_left_thread<T: TidyTree>(tree: &mut T, node: T::Id, i: usize, cl: T::Id, modsum_cl: f64) {
    let first = tree.child(node, 0);
    let current = tree.child(node, i);
    let li = tree.state(first).extreme_left;
    let diff = (modsum_cl - tree.state(cl).modifier) - tree.state(first).modsum_extreme_left;

    let li_state = tree.state_mut(li);
    li_state.thread_left = Some(cl);
    // keep li in place while its modifier sum changes
    li_state.modifier += diff;
    li_state.prelim -= diff;

    let (el, msel) = {
        let current = tree.state(current);
        (current.extreme_left, current.modsum_extreme_left)
    };
    let first = tree.state_mut(first);
    first.extreme_left = el;
    first.modsum_extreme_left = msel;
}

/// Mirror of [`set_left_thread`]: thread the right contour of child `i` to
/// `sr` in the earlier siblings.
fn set_right_thread<T: TidyTree>(tree: &mut T, node: T::Id, i: usize, sr: T::Id, modsum_sr: f64) {
    let current = tree.child(node, i);
    let previous = tree.child(node, i - 1);
    let ri = tree.state(current).extreme_right;
    let diff = (modsum_sr - tree.state(sr).modifier) - tree.state(current).modsum_extreme_right;

    let ri_state = tree.state_mut(ri);
    ri_state.thread_right = Some(sr);
    ri_state.modifier += diff;
    ri_state.prelim -= diff;

    let (er, mser) = {
        let previous = tree.state(previous);
        (previous.extreme_right, previous.modsum_extreme_right)
    };
    let current = tree.state_mut(current);
    current.extreme_right = er;
    current.modsum_extreme_right = mser;
}

/// Fold the children's pending `shift`/`change` into their modifiers.
fn add_child_spacing<T: TidyTree>(tree: &mut T, node: T::Id) {
    let mut d = 0.0;
    let mut modsum_delta = 0.0;
    for i in 0..tree.child_count(node) {
        let child = tree.child(node, i);
        let state = tree.state_mut(child);
        d += state.shift;
        modsum_delta += d + state.change;
        state.modifier += modsum_delta;
    }
}
