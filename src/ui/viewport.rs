//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks which part of the buffer is on screen
//! and scrolls just enough to keep the cursor visible.

use std::ops::Range;

/// Manages the visible portion of a buffer.
///
/// The viewport tracks:
/// - Text area dimensions (width, height)
/// - Vertical scroll offset (first visible line)
/// - Horizontal scroll offset (first visible display column)
///
/// # Example
///
/// ```
/// use cedit::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(20, 10);
/// vp.follow(25, 0);
/// assert_eq!(vp.visible_rows(100), 16..26);
///
/// vp.follow(3, 0);
/// assert_eq!(vp.row_offset(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    row_offset: usize,
    col_offset: usize,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - Text area width in columns
    /// * `height` - Text area height in lines
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            row_offset: 0,
            col_offset: 0,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// First visible line.
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible display column.
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Number of lines moved by PageUp/PageDown.
    pub fn page_rows(&self) -> usize {
        usize::from(self.height).max(1)
    }

    /// Range of buffer lines on screen, clamped to the buffer length.
    pub fn visible_rows(&self, total_lines: usize) -> Range<usize> {
        let start = self.row_offset.min(total_lines);
        let end = (self.row_offset + usize::from(self.height)).min(total_lines);
        start..end
    }

    /// Update the text area size.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Go back to the top-left corner.
    pub const fn reset(&mut self) {
        self.row_offset = 0;
        self.col_offset = 0;
    }

    /// Scroll so that `(row, col)` is inside the viewport.
    ///
    /// `col` is measured in display columns from the start of the line.
    pub fn follow(&mut self, row: usize, col: usize) {
        let height = usize::from(self.height);
        if height == 0 || row < self.row_offset {
            self.row_offset = row;
        } else if row >= self.row_offset + height {
            self.row_offset = row + 1 - height;
        }

        // Keep one spare column so the cursor can sit past the last char.
        let width = usize::from(self.width);
        if width == 0 || col < self.col_offset {
            self.col_offset = col;
        } else if col >= self.col_offset + width {
            self.col_offset = col + 1 - width;
        }
    }
}
