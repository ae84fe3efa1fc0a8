// Viewport scrolling for the scrollback transcript
//
// Owns offset, content size and viewport size, plus the auto-follow
// flag that implements the terminal's scroll policy: stay pinned to
// the bottom while the user is there, never yank them down while they
// are reading history, and re-attach when they come back near the
// bottom.

/// How close to the bottom (in lines) still counts as "at the bottom"
/// when new output arrives. The web original used ~100px, roughly a
/// few rows of monospace text.
pub const FOLLOW_THRESHOLD: usize = 3;

/// Scroll state for the transcript viewport
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (line index at top of viewport)
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,

    /// Whether to keep the view pinned to new content
    pub auto_follow: bool,
}

impl ScrollState {
    /// New scroll state, following the bottom
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Update content and viewport dimensions. Called each render
    /// frame with current sizes; snaps to the bottom when following.
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            // Clamp offset to valid range
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Post-append hook: re-engage follow if the user was within
    /// `FOLLOW_THRESHOLD` lines of the bottom before the append.
    /// Call BEFORE the new lines are reflected in `update_dimensions`.
    pub fn follow_if_near_bottom(&mut self) {
        if self.max_offset().saturating_sub(self.offset) <= FOLLOW_THRESHOLD {
            self.auto_follow = true;
        }
    }

    /// Scroll up by one line. Disables auto-follow (user took control).
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one line. Re-enables auto-follow at the bottom.
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());

        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom (and re-enable auto-follow)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_new_content_at_the_bottom() {
        let mut scroll = ScrollState::new();
        assert!(scroll.auto_follow);

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10); // Still at bottom
    }

    #[test]
    fn scroll_up_disables_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);

        // Content keeps growing but the view holds still
        scroll.update_dimensions(30, 5);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn scroll_back_down_reattaches() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);

        scroll.scroll_down();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn append_hook_reattaches_only_near_bottom() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(50, 10);

        // Two lines above the bottom: still "at the bottom"
        scroll.scroll_up();
        scroll.scroll_up();
        scroll.follow_if_near_bottom();
        assert!(scroll.auto_follow);

        // Deep in history: appends must not move the view
        scroll.scroll_to_top();
        scroll.follow_if_near_bottom();
        assert!(!scroll.auto_follow);
        scroll.update_dimensions(60, 10);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn paging_and_jumps() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);

        scroll.page_up();
        assert_eq!(scroll.offset(), 80);
        assert!(!scroll.auto_follow);

        scroll.scroll_to_top();
        let (start, end) = scroll.visible_range();
        assert_eq!((start, end), (0, 10));

        scroll.page_down();
        assert_eq!(scroll.offset(), 10);

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.visible_range(), (90, 100));
    }
}
