// Scroll state for TUI panels
//
// Each component owns its scroll state - App just renders and routes input.
// The movie list scrolls by whole cells and keeps the selection in view;
// the logs panel auto-follows new entries until the user scrolls up.

/// Scroll state for a single panel
///
/// Units are items (cells or log lines), not terminal rows.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the first visible item
    offset: usize,

    /// Total number of items in content
    total: usize,

    /// Number of items visible in viewport
    viewport: usize,

    /// Keep the view pinned to the bottom as content grows
    /// Scrolling up disables this; scrolling to the bottom re-enables it
    pub auto_follow: bool,
}

impl ScrollState {
    /// Scroll state that follows new content (logs)
    pub fn following() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Scroll state anchored at the top (lists)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::following()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Shift the viewport the least amount needed to show `index`
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by one item (user took control)
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one item, re-following at the bottom
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport.max(1));
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.viewport.max(1)).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::manual()
    }
}
