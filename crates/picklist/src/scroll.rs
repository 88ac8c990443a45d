//! Keeping the highlighted row inside the results viewport.
//!
//! The results panel shows at most `max_visible_items` rows at a time. When
//! the highlight moves, the viewport scrolls the minimum distance needed to
//! show it (nearest-edge alignment) and the controller emits a
//! [`ScrollRequest`] for the rendering layer. Only the results viewport
//! scrolls; ancestors of the panel are never asked to move.

use std::ops::Range;

/// Where the target row should end up after scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    /// Scroll the least amount that makes the row fully visible.
    #[default]
    Nearest,
}

/// How the rendering layer should animate the scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animate; used while the panel is on screen.
    #[default]
    Smooth,
    /// Jump; used when the panel has just appeared.
    Instant,
}

/// A request to scroll a row of the results panel into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Index of the row in the displayed list.
    pub index: usize,
    /// First visible row after the scroll.
    pub first_visible: usize,
    pub alignment: ScrollAlignment,
    pub behavior: ScrollBehavior,
}

/// The window of rows the results panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollViewport {
    first_visible: usize,
    max_visible_items: usize,
}

impl Default for ScrollViewport {
    fn default() -> Self {
        Self::new(7)
    }
}

impl ScrollViewport {
    /// A viewport showing at most `max_visible_items` rows.
    pub fn new(max_visible_items: usize) -> Self {
        Self {
            first_visible: 0,
            max_visible_items: max_visible_items.max(1),
        }
    }

    /// Index of the first visible row.
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Maximum number of rows shown at once.
    pub fn max_visible_items(&self) -> usize {
        self.max_visible_items
    }

    /// Set the maximum number of rows shown at once (at least 1).
    pub fn set_max_visible_items(&mut self, count: usize) {
        self.max_visible_items = count.max(1);
    }

    /// Rows visible for a list of `len` items.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.first_visible.min(len);
        let end = (start + self.max_visible_items).min(len);
        start..end
    }

    /// Scroll back to the top.
    pub fn reset(&mut self) {
        self.first_visible = 0;
    }

    /// Keep the viewport within a list of `len` items.
    pub fn clamp_to(&mut self, len: usize) {
        let max_first = len.saturating_sub(self.max_visible_items);
        self.first_visible = self.first_visible.min(max_first);
    }

    /// Scroll so `index` is visible, moving to the nearest edge.
    ///
    /// Returns `true` if the viewport moved.
    pub fn ensure_visible(&mut self, index: usize) -> bool {
        let before = self.first_visible;
        if index < self.first_visible {
            self.first_visible = index;
        } else if index >= self.first_visible + self.max_visible_items {
            self.first_visible = index + 1 - self.max_visible_items;
        }
        self.first_visible != before
    }

    /// Bring `index` into view and describe the scroll for the renderer.
    pub fn scroll_to(&mut self, index: usize) -> ScrollRequest {
        self.ensure_visible(index);
        ScrollRequest {
            index,
            first_visible: self.first_visible,
            alignment: ScrollAlignment::Nearest,
            behavior: ScrollBehavior::Smooth,
        }
    }
}
