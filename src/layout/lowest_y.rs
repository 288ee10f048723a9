//! Index/lowest-y list for the sibling scan in `separate`.
//!
//! While the children of one parent are placed left to right, this list
//! remembers, for the already placed children, how far down each subtree
//! reaches. An entry is dropped as soon as a later sibling reaches at least
//! as deep, since the later sibling then shadows it for every deeper query.
//! The newest entry sits at the end of the vector.

#[derive(Debug, Clone, Copy)]
struct Entry {
    low_y: f64,
    index: usize,
}

/// Stack of `(lowest y, child index)` pairs, scoped to one parent.
#[derive(Debug, Default)]
pub struct LowestY {
    entries: Vec<Entry>,
}

impl LowestY {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that child `index` reaches down to `low_y`.
    ///
    /// Drops every newer entry that does not reach below `low_y`.
    pub fn insert(&mut self, low_y: f64, index: usize) {
        while self.entries.last().is_some_and(|head| low_y >= head.low_y) {
            self.entries.pop();
        }
        self.entries.push(Entry { low_y, index });
    }

    /// Cursor starting at the newest entry.
    pub fn cursor(&self) -> LowestYCursor<'_> {
        LowestYCursor {
            entries: &self.entries,
            pos: self.entries.len(),
        }
    }

}

/// Forward scan over a [`LowestY`] list, from newest to oldest.
///
/// Queries during one `separate` call only ever go deeper, so the cursor
/// never needs to move back.
#[derive(Debug, Clone)]
pub struct LowestYCursor<'a> {
    entries: &'a [Entry],
    pos: usize,
}

impl LowestYCursor<'_> {
    /// Skip entries whose subtree ends above `y`.
    pub fn skip_above(&mut self, y: f64) {
        while self.pos > 0 && y > self.entries[self.pos - 1].low_y {
            self.pos -= 1;
        }
    }

    /// Child index of the current entry, if any remain.
    pub fn index(&self) -> Option<usize> {
        self.pos.checked_sub(1).map(|p| self.entries[p].index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_evicts_shallower_entries() {
        let mut list = LowestY::new();
        list.insert(30.0, 0);
        list.insert(10.0, 1);
        list.insert(20.0, 2);
        // entry 1 (10.0) is shadowed by entry 2 (20.0); entry 0 reaches deeper
        let mut cursor = list.cursor();
        assert_eq!(cursor.index(), Some(2));
        cursor.skip_above(25.0);
        assert_eq!(cursor.index(), Some(0));
        cursor.skip_above(31.0);
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn test_equal_depth_is_evicted() {
        let mut list = LowestY::new();
        list.insert(15.0, 0);
        list.insert(15.0, 1);

        let mut cursor = list.cursor();
        assert_eq!(cursor.index(), Some(1));
        cursor.skip_above(16.0);
        assert_eq!(cursor.index(), None, "entry 0 was evicted");
    }

    #[test]
    fn test_cursor_runs_out() {
        let mut list = LowestY::new();
        list.insert(40.0, 0);
        list.insert(5.0, 3);

        let mut cursor = list.cursor();
        cursor.skip_above(5.0);
        assert_eq!(cursor.index(), Some(3), "y equal to low_y is still covered");
        cursor.skip_above(41.0);
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn test_empty() {
        let list = LowestY::new();
        assert_eq!(list.cursor().index(), None);
    }
}
