//! The wheel's item list and its rendered rows.
//!
//! The item list is rendered three times back to back.  While idle the scroll
//! offset is kept inside the middle copy, so scrolling in either direction
//! always has a full copy of rows to move into and the list appears to loop
//! forever.  The rendered rows are never patched: every change to the item
//! list rebuilds them from scratch and puts the viewport back at the start of
//! the middle copy.
//!
//! Like any scroll container the offset never leaves `[0, max_offset]`.  For
//! one or two items that range is narrower than the middle band, so the
//! offset is reduced modulo one copy before clamping and the pointer keeps
//! showing a real row.

use super::input::normalize_item;

/// Height of one row in scroll units.
pub const ROW_HEIGHT: f64 = 40.0;
/// How many times the item list is repeated in the rendered rows.
pub const COPIES: usize = 3;
/// Rows visible in the viewport at once.
pub const VISIBLE_ROWS: usize = 5;
/// Index (within the viewport) of the row a spin lands on.
pub const POINTER_ROW: usize = VISIBLE_ROWS / 2;

/// Authoritative item list plus its tripled rendering and scroll position.
#[derive(Debug, Clone, Default)]
pub struct Wheel {
    items: Vec<String>,
    rows: Vec<String>,
    /// Offset of the viewport's top edge from the first rendered row.
    scroll: f64,
}

impl Wheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The rendered rows (`COPIES` × item count).
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    /// Height of a single copy of the item list.
    pub fn copy_height(&self) -> f64 {
        self.items.len() as f64 * ROW_HEIGHT
    }

    /// Largest offset that still has rendered rows at the viewport's bottom
    /// edge.  Zero when there are fewer rows than fit in the viewport.
    pub fn max_offset(&self) -> f64 {
        (self.rows.len() as f64 - VISIBLE_ROWS as f64).max(0.0) * ROW_HEIGHT
    }

    /// Replace the whole item list.  Entries are trimmed and blank ones
    /// dropped.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.items = items
            .into_iter()
            .filter_map(|s| normalize_item(s.as_ref()))
            .collect();
        self.rebuild();
    }

    /// Regenerate the rendered rows and reset the viewport to the start of
    /// the middle copy (clamped for one- and two-item lists).
    pub fn rebuild(&mut self) {
        let mut rows = Vec::with_capacity(self.items.len() * COPIES);
        for _ in 0..COPIES {
            rows.extend(self.items.iter().cloned());
        }
        self.rows = rows;
        self.scroll = self.copy_height().min(self.max_offset());
        tracing::trace!(items = self.items.len(), rows = self.rows.len(), "wheel rebuilt");
    }

    /// Append one entry.  Returns `false` (and changes nothing) when the
    /// entry is blank after trimming.
    pub fn append_item(&mut self, raw: &str) -> bool {
        let Some(item) = normalize_item(raw) else {
            return false;
        };
        self.items.push(item);
        self.rebuild();
        true
    }

    /// Remove every item for which `should_remove` returns `true`, then
    /// rebuild.  Returns how many items were removed.
    pub fn remove_items<F>(&mut self, mut should_remove: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !should_remove(item));
        self.rebuild();
        before - self.items.len()
    }

    /// Drop every item and every rendered row.
    pub fn reset(&mut self) {
        self.items.clear();
        self.rows.clear();
        self.scroll = 0.0;
    }

    /// Move the viewport, keeping it inside `[0, max_offset]`.
    pub(crate) fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll = fit_offset(offset, self.copy_height(), self.max_offset());
    }

    /// Wrap the current offset back towards the middle copy.
    pub fn correct_loop(&mut self) {
        self.set_scroll_offset(loop_correct(self.scroll, self.copy_height()));
    }

    /// Manual scroll by whole rows (negative = up).  The loop correction is
    /// applied to the requested offset before clamping, so a short list
    /// never gets stuck against the end of the rendered rows.
    pub fn scroll_rows(&mut self, rows: i32) {
        self.scroll += f64::from(rows) * ROW_HEIGHT;
        self.correct_loop();
    }

    /// Index of the rendered row at the top of the viewport.  Slots below
    /// the last rendered row (one- and two-item lists) render empty.
    pub fn top_row(&self) -> isize {
        (self.scroll / ROW_HEIGHT).round() as isize
    }

    /// The rendered row currently under the pointer.
    pub fn pointer_row(&self) -> Option<&str> {
        let idx = self.top_row() + POINTER_ROW as isize;
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.rows.get(i))
            .map(String::as_str)
    }
}

/// Keep a scroll offset inside the middle copy.
///
/// `total` is the height of one copy.  Offsets below half a copy move forward
/// by one copy, offsets beyond one and a half copies move back by one copy,
/// and everything in between is left alone.
pub fn loop_correct(offset: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return offset;
    }
    if offset < total * 0.5 {
        offset + total
    } else if offset > total * 1.5 {
        offset - total
    } else {
        offset
    }
}

/// Clamp an offset into `[0, max]`.  Out-of-range offsets are first reduced
/// modulo one copy (`total`), which leaves the same item under the pointer.
pub fn fit_offset(offset: f64, total: f64, max: f64) -> f64 {
    if (0.0..=max).contains(&offset) {
        return offset;
    }
    if total <= 0.0 {
        return offset.clamp(0.0, max);
    }
    offset.rem_euclid(total).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wheel_of(items: &[&str]) -> Wheel {
        let mut w = Wheel::new();
        w.set_items(items.iter().copied());
        w
    }

    #[test]
    fn rebuild_triples_rows_and_starts_at_middle_copy() {
        let w = wheel_of(&["A", "B", "C"]);
        assert_eq!(w.rows().len(), 9);
        assert_eq!(w.rows()[3..6], ["A", "B", "C"]);
        assert_eq!(w.scroll_offset(), 3.0 * ROW_HEIGHT);
    }

    #[test]
    fn empty_list_renders_nothing() {
        let w = wheel_of(&["  ", ""]);
        assert!(w.is_empty());
        assert!(w.rows().is_empty());
        assert_eq!(w.scroll_offset(), 0.0);
        assert_eq!(w.pointer_row(), None);
    }

    #[test]
    fn append_ignores_blank_and_rebuilds() {
        let mut w = wheel_of(&["A"]);
        assert!(!w.append_item("   "));
        assert_eq!(w.len(), 1);

        assert!(w.append_item("  B "));
        assert_eq!(w.items(), ["A", "B"]);
        assert_eq!(w.rows().len(), 6);
        // Six rows, five visible: the viewport can only move down one row.
        assert_eq!(w.max_offset(), ROW_HEIGHT);
        assert_eq!(w.scroll_offset(), ROW_HEIGHT);
    }

    #[test]
    fn remove_items_filters_every_match() {
        let mut w = wheel_of(&["A", "B", "A", "C"]);
        let removed = w.remove_items(|item| item == "A");
        assert_eq!(removed, 2);
        assert_eq!(w.items(), ["B", "C"]);
        assert_eq!(w.rows().len(), 6);
    }

    #[test]
    fn reset_clears_everything() {
        let mut w = wheel_of(&["A", "B"]);
        w.reset();
        assert!(w.is_empty());
        assert!(w.rows().is_empty());
        assert_eq!(w.scroll_offset(), 0.0);
    }

    #[test]
    fn loop_correction_band_edges() {
        let total = 120.0;
        assert_eq!(loop_correct(59.0, total), 179.0);
        assert_eq!(loop_correct(60.0, total), 60.0);
        assert_eq!(loop_correct(180.0, total), 180.0);
        assert_eq!(loop_correct(181.0, total), 61.0);
        assert_eq!(loop_correct(10.0, 0.0), 10.0);
    }

    #[test]
    fn manual_scroll_wraps_instead_of_running_out() {
        let mut w = wheel_of(&["A", "B", "C", "D"]);
        let start = w.scroll_offset();
        // Four rows up is a full copy: wraps back to where we started.
        w.scroll_rows(-4);
        assert_eq!(w.scroll_offset(), start);

        for _ in 0..50 {
            w.scroll_rows(1);
            let total = w.copy_height();
            assert!(w.scroll_offset() >= total * 0.5 && w.scroll_offset() <= total * 1.5);
        }
    }

    #[test]
    fn pointer_sits_two_rows_below_top() {
        let w = wheel_of(&["A", "B", "C", "D", "E"]);
        // Top of the viewport is the first row of the middle copy.
        assert_eq!(w.top_row(), 5);
        assert_eq!(w.pointer_row(), Some("C"));
    }

    #[test]
    fn single_item_sits_under_the_pointer() {
        let mut w = wheel_of(&["A"]);
        assert_eq!(w.scroll_offset(), 0.0);
        assert_eq!(w.pointer_row(), Some("A"));

        w.scroll_rows(1);
        assert_eq!(w.pointer_row(), Some("A"));
        w.scroll_rows(-3);
        assert_eq!(w.scroll_offset(), 0.0);
        assert_eq!(w.pointer_row(), Some("A"));
    }

    #[test]
    fn two_items_both_reach_the_pointer() {
        let mut w = wheel_of(&["A", "B"]);
        assert_eq!(w.pointer_row(), Some("B"));

        w.scroll_rows(1);
        assert_eq!(w.pointer_row(), Some("A"));
        w.scroll_rows(1);
        assert_eq!(w.pointer_row(), Some("B"));
        w.scroll_rows(-1);
        assert_eq!(w.pointer_row(), Some("A"));
        assert!(w.scroll_offset() >= 0.0 && w.scroll_offset() <= w.max_offset());
    }

    #[test]
    fn fitting_keeps_the_phase() {
        // Two items: one copy is 80, the viewport may move 40.
        assert_eq!(fit_offset(40.0, 80.0, 40.0), 40.0);
        assert_eq!(fit_offset(80.0, 80.0, 40.0), 0.0);
        assert_eq!(fit_offset(120.0, 80.0, 40.0), 40.0);
        assert_eq!(fit_offset(-40.0, 80.0, 40.0), 40.0);
        // One item: every offset shows the same row.
        assert_eq!(fit_offset(-40.0, 40.0, 0.0), 0.0);
        assert_eq!(fit_offset(25.0, 40.0, 0.0), 0.0);
        // Empty wheel.
        assert_eq!(fit_offset(12.0, 0.0, 0.0), 0.0);
    }

    proptest! {
        #[test]
        fn set_items_drops_blank_entries(raw in proptest::collection::vec("[ \tA-Za-z]{0,6}", 0..24)) {
            let mut w = Wheel::new();
            w.set_items(&raw);
            for item in w.items() {
                prop_assert!(!item.trim().is_empty());
            }
            prop_assert_eq!(w.rows().len(), COPIES * w.len());
            prop_assert_eq!(w.scroll_offset(), (w.len() as f64 * ROW_HEIGHT).min(w.max_offset()));
            if w.len() >= 3 {
                prop_assert_eq!(w.scroll_offset(), w.copy_height());
            }
        }

        #[test]
        fn low_offsets_move_forward(n in 1usize..50, frac in 0.0f64..0.49) {
            let total = n as f64 * ROW_HEIGHT;
            let offset = frac * total;
            prop_assert_eq!(loop_correct(offset, total), offset + total);
        }

        #[test]
        fn high_offsets_move_back(n in 1usize..50, frac in 1.51f64..=3.0) {
            let total = n as f64 * ROW_HEIGHT;
            let offset = frac * total;
            prop_assert_eq!(loop_correct(offset, total), offset - total);
        }

        #[test]
        fn middle_band_is_untouched(n in 1usize..50, frac in 0.5f64..=1.5) {
            let total = n as f64 * ROW_HEIGHT;
            let offset = frac * total;
            prop_assert_eq!(loop_correct(offset, total), offset);
        }
    }
}
