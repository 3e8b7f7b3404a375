//! The `window` module maps the file's address space onto the screen.
//!
//! [`ViewWindow`] owns the cursor and the first displayed address, and keeps a
//! bounded [`MaterializedWindow`] of bytes around the visible page. Every
//! operation here costs O(visible window), never O(file size).

use crate::config::Config;
use crate::element::{ElementWidth, Endianness};
use crate::error::ViewerError;
use crate::source::ByteSource;
use tracing::debug;

/// Display state mutated by interpreter actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Cursor address, `0..=size`
    pub current_address: u64,
    pub element_width: ElementWidth,
    pub endianness: Endianness,
    pub show_values_subwindow: bool,
    pub color_enabled: bool,
    /// Start of the selection if selection mode is on
    pub selection_anchor: Option<u64>,
}

/// Cache of the most recently read region of the file.
///
/// The buffer is allocated once per capacity and refilled in place.
#[derive(Debug, Default)]
pub struct MaterializedWindow {
    start_address: u64,
    bytes: Vec<u8>,
    length: usize,
}

impl MaterializedWindow {
    #[must_use]
    pub const fn start_address(&self) -> u64 {
        self.start_address
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// One past the last materialized address
    #[must_use]
    pub const fn end_address(&self) -> u64 {
        self.start_address + self.length as u64
    }

    /// Capacity of the underlying buffer
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Materialized bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.length]
    }

    /// Does the window hold every byte of `[start, end)`
    #[must_use]
    pub const fn covers(&self, start: u64, end: u64) -> bool {
        start >= self.start_address && end <= self.end_address()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn get(&self, address: u64) -> Option<u8> {
        if self.covers(address, address + 1) {
            Some(self.bytes[(address - self.start_address) as usize])
        } else {
            None
        }
    }

    fn reallocate(&mut self, capacity: usize) {
        self.bytes = vec![0; capacity];
        self.length = 0;
    }

    /// Refill the window to hold `[start, start + length)`.
    ///
    /// Bytes already present are moved within the buffer instead of being read again.
    /// Returns the number of bytes reused.
    #[allow(clippy::cast_possible_truncation)]
    fn refill<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
        start: u64,
        length: usize,
        reuse: bool,
    ) -> Result<usize, ViewerError> {
        debug_assert!(length <= self.bytes.len());
        let end = start + length as u64;

        let overlap_start = self.start_address.max(start);
        let overlap_end = self.end_address().min(end);

        if !reuse || self.is_empty() || overlap_start >= overlap_end {
            let count = source.read_at(start, &mut self.bytes[..length])?;
            self.start_address = start;
            self.length = count;
            return Ok(0);
        }

        // Move the shared part to its new position
        let src = (overlap_start - self.start_address) as usize;
        let dst = (overlap_start - start) as usize;
        let shared = (overlap_end - overlap_start) as usize;
        self.bytes.copy_within(src..src + shared, dst);

        // Read the missing head
        if dst > 0 {
            let count = source.read_at(start, &mut self.bytes[..dst])?;
            if count < dst {
                self.start_address = start;
                self.length = count;
                return Ok(0);
            }
        }

        // Read the missing tail
        let tail = dst + shared;
        let mut filled = tail;
        if tail < length {
            filled += source.read_at(overlap_end, &mut self.bytes[tail..length])?;
        }

        self.start_address = start;
        self.length = filled;
        Ok(shared)
    }
}

/// The addressable view over a file of `size` bytes
#[derive(Debug)]
pub struct ViewWindow {
    state: ViewState,
    size: u64,
    bytes_per_row: usize,
    rows: usize,
    window_pages: usize,
    /// First displayed address (need not be row aligned)
    top: u64,
    window: MaterializedWindow,
    /// Forces the next `ensure_materialized` to refill from scratch
    stale: bool,
}

impl ViewWindow {
    /// Create a view over a source of `size` bytes. The viewport starts one row tall
    /// until [`ViewWindow::resize`] is called.
    #[must_use]
    pub fn new(size: u64, config: &Config) -> Self {
        Self {
            state: ViewState {
                current_address: 0,
                element_width: ElementWidth::default(),
                endianness: Endianness::default(),
                show_values_subwindow: false,
                color_enabled: config.color_enabled,
                selection_anchor: None,
            },
            size,
            bytes_per_row: config.bytes_per_row,
            rows: 1,
            window_pages: config.window_pages,
            top: 0,
            window: MaterializedWindow::default(),
            stale: true,
        }
    }

    //  ========================== Accessors =================================== //

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn cursor(&self) -> u64 {
        self.state.current_address
    }

    #[must_use]
    pub const fn width(&self) -> ElementWidth {
        self.state.element_width
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Elements per row for the active width
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.bytes_per_row / self.state.element_width.bytes()
    }

    /// First displayed address
    #[must_use]
    pub const fn top(&self) -> u64 {
        self.top
    }

    #[must_use]
    pub const fn page_bytes(&self) -> u64 {
        (self.rows * self.bytes_per_row) as u64
    }

    /// Displayed range `[start, end)`, never past the end of the file
    #[must_use]
    pub fn visible_range(&self) -> (u64, u64) {
        (self.top, (self.top + self.page_bytes()).min(self.size))
    }

    #[must_use]
    pub const fn materialized(&self) -> &MaterializedWindow {
        &self.window
    }

    /// Start of the displayed row that contains `address`
    #[must_use]
    pub const fn row_start(&self, address: u64) -> u64 {
        let bpr = self.bytes_per_row as u64;
        if address >= self.top {
            self.top + (address - self.top) / bpr * bpr
        } else {
            self.top.saturating_sub((self.top - address).div_ceil(bpr) * bpr)
        }
    }

    /// Selected range `[start, end]` (inclusive) if selection mode is on
    #[must_use]
    pub fn selection(&self) -> Option<(u64, u64)> {
        self.state.selection_anchor.map(|anchor| {
            let cursor = self.state.current_address;
            (anchor.min(cursor), anchor.max(cursor))
        })
    }

    //  ========================== Layout ====================================== //

    /// Largest first address that still shows the end-of-file position.
    /// One extra row is allowed at the bottom for the cursor past the last byte.
    const fn max_top(&self) -> u64 {
        let bpr = self.bytes_per_row as u64;
        let total_rows = self.size / bpr + 1;
        total_rows.saturating_sub(self.rows as u64) * bpr
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    const fn clamp_address(&self, value: i128) -> u64 {
        if value < 0 {
            0
        } else if value > self.size as i128 {
            self.size
        } else {
            value as u64
        }
    }

    /// Change the number of visible rows (terminal resize)
    pub fn resize(&mut self, rows: usize) {
        let rows = rows.max(1);
        if rows != self.rows {
            self.rows = rows;
            self.stale = true;
            self.follow_cursor();
        }
    }

    /// Scroll the view so the cursor is visible, moving by whole rows
    fn follow_cursor(&mut self) {
        let bpr = self.bytes_per_row as u64;
        let cursor = self.state.current_address;

        if cursor < self.top {
            let rows_up = (self.top - cursor).div_ceil(bpr);
            self.top = self.top.saturating_sub(rows_up * bpr);
        } else if cursor >= self.top + self.page_bytes() {
            let rows_down = (cursor - self.top - self.page_bytes()) / bpr + 1;
            self.top += rows_down * bpr;
        }

        self.top = self.top.min(self.max_top());
    }

    /// Pull the cursor back into the visible page, keeping its column
    fn keep_cursor_visible(&mut self) {
        let bpr = self.bytes_per_row as u64;
        let page_end = self.top + self.page_bytes();
        let cursor = self.state.current_address;

        if cursor < self.top {
            let rows_down = (self.top - cursor).div_ceil(bpr);
            self.state.current_address = (cursor + rows_down * bpr).min(self.size);
        } else if cursor >= page_end {
            let rows_up = (cursor - page_end + 1).div_ceil(bpr);
            self.state.current_address = cursor - rows_up * bpr;
        }
    }

    //  ========================== Operations ================================== //

    /// Switch the element width. The cursor address is preserved exactly.
    pub fn set_width(&mut self, width: ElementWidth) {
        if width == self.state.element_width {
            return;
        }
        self.state.element_width = width;
        self.state.current_address = self.state.current_address.min(self.size);
        self.stale = true;
        self.follow_cursor();
    }

    /// Move the cursor by `delta_elements` of the active width, saturating at `[0, size]`
    pub fn move_cursor(&mut self, delta_elements: i64) {
        let delta = i128::from(delta_elements) * self.state.element_width.bytes() as i128;
        self.state.current_address =
            self.clamp_address(i128::from(self.state.current_address) + delta);
        self.follow_cursor();
    }

    /// Shift the view by `delta_rows` rows; the cursor follows minimally
    pub fn scroll(&mut self, delta_rows: i64) {
        let delta = i128::from(delta_rows) * self.bytes_per_row as i128;
        self.shift_top(delta);
    }

    /// Shift the view by single bytes, leaving the row grid unaligned
    pub fn roll(&mut self, delta_bytes: i64) {
        self.shift_top(i128::from(delta_bytes));
    }

    fn shift_top(&mut self, delta: i128) {
        let top = self.clamp_address(i128::from(self.top) + delta);
        self.top = top.min(self.max_top());
        self.keep_cursor_visible();
    }

    /// Move the view and the cursor by whole pages
    pub fn page(&mut self, delta_pages: i64) {
        let shift = i128::from(delta_pages) * i128::from(self.page_bytes());
        let top = self.clamp_address(i128::from(self.top) + shift);
        self.top = top.min(self.max_top());
        self.state.current_address =
            self.clamp_address(i128::from(self.state.current_address) + shift);
        self.follow_cursor();
    }

    /// Put the cursor on `address`, scrolling only as far as needed
    pub fn set_cursor(&mut self, address: u64) {
        self.state.current_address = address.min(self.size);
        self.follow_cursor();
    }

    /// Rows of the page that hold file content or the end-of-file position
    #[must_use]
    pub fn displayed_rows(&self) -> usize {
        let remaining = (self.size - self.top.min(self.size)) / self.bytes_per_row as u64 + 1;
        usize::try_from(remaining).map_or(self.rows, |r| r.min(self.rows))
    }

    /// Put the cursor on `address` (clamped to `[0, size]`) and center it on screen
    pub fn jump_to(&mut self, address: u64) {
        let bpr = self.bytes_per_row as u64;
        let cursor = address.min(self.size);
        self.state.current_address = cursor;

        let row = cursor / bpr * bpr;
        let above = (self.rows / 2) as u64 * bpr;
        self.top = row.saturating_sub(above).min(self.max_top());
    }

    pub fn goto_start(&mut self) {
        self.state.current_address = 0;
        self.top = 0;
    }

    pub fn goto_end(&mut self) {
        self.state.current_address = self.size;
        self.top = self.max_top();
        self.follow_cursor();
    }

    /// Cursor to the first element of its row
    pub fn row_begin(&mut self) {
        self.state.current_address = self.row_start(self.state.current_address);
    }

    /// Cursor to the last element of its row
    pub fn row_end(&mut self) {
        let last = self.row_start(self.state.current_address) + self.bytes_per_row as u64
            - self.state.element_width.bytes() as u64;
        self.state.current_address = last.min(self.size);
    }

    /// Cursor to the given visible row, keeping its column
    pub fn screen_row(&mut self, row: usize) {
        let bpr = self.bytes_per_row as u64;
        let row = row.min(self.rows - 1) as u64;
        let col = self.state.current_address.saturating_sub(self.top) % bpr;
        self.state.current_address = (self.top + row * bpr + col).min(self.size);
    }

    pub fn toggle_selection(&mut self) {
        self.state.selection_anchor = match self.state.selection_anchor {
            Some(_) => None,
            None => Some(self.state.current_address),
        };
    }

    /// Make sure every visible byte is materialized, reading from `source` if needed.
    ///
    /// The window holds `window_pages` screen pages around the visible one.
    ///
    /// # Errors
    /// Returns [`ViewerError::Read`] if the source fails.
    #[allow(clippy::cast_possible_truncation)]
    pub fn ensure_materialized<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<(), ViewerError> {
        let (start, end) = self.visible_range();
        if !self.stale && self.window.covers(start, end) {
            return Ok(());
        }

        let page = self.page_bytes();
        let capacity = self.window_pages * page as usize;
        let mut reuse = !self.stale;
        if self.window.capacity() != capacity {
            self.window.reallocate(capacity);
            reuse = false;
        }

        // Keep a margin before the visible page so small upward moves stay cached
        let margin = page * ((self.window_pages as u64 - 1) / 2);
        let new_start = start.saturating_sub(margin);
        let new_len = (self.size - new_start).min(capacity as u64) as usize;

        let reused = self.window.refill(source, new_start, new_len, reuse)?;
        self.stale = false;

        debug!(
            start = new_start,
            len = self.window.len(),
            reused,
            "materialized window refilled"
        );

        Ok(())
    }
}
