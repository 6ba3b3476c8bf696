use std::path::{Path, PathBuf};

use crate::language::Language;
use crate::search::{self, byte_index};

/// Spaces inserted for a tab when nothing else is configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Cursor position in the buffer.
///
/// Ordering is document order, so `min`/`max` of two cursors give the
/// start and end of the range between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Cursor {
    /// Zero-based line index.
    pub row: usize,
    /// Zero-based column, counted in chars.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Line terminator used when the buffer is written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

/// Result of [`LineBuffer::replace_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The cursor was on a match and it was replaced.
    Replaced,
    /// The cursor was not on a match; it now sits on the next one.
    Positioned(usize),
    /// The term does not occur in the document.
    NotFound,
}

/// An in-memory document held as a list of lines plus one cursor.
///
/// Every operation keeps the buffer non-empty and the cursor in bounds.
/// Out-of-range movement is clamped rather than rejected.
pub struct LineBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    anchor: Option<Cursor>,
    modified: bool,
    revision: u64,
    path: Option<PathBuf>,
    line_ending: LineEnding,
    tab_width: usize,
    auto_indent: bool,
}

impl LineBuffer {
    /// Create an empty, untitled buffer.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            anchor: None,
            modified: false,
            revision: 0,
            path: None,
            line_ending: LineEnding::Lf,
            tab_width: DEFAULT_TAB_WIDTH,
            auto_indent: true,
        }
    }

    /// Create a buffer from file text, splitting on newlines.
    ///
    /// CRLF line endings are normalised in memory and remembered for
    /// [`contents`](Self::contents).
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        let mut buffer = Self::new();
        buffer.line_ending = line_ending;
        match line_ending {
            LineEnding::Lf => buffer.set_text(text),
            LineEnding::CrLf => buffer.set_text(&text.replace("\r\n", "\n")),
        }
        buffer
    }

    /// Associate the buffer with a file location.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set how many spaces a tab expands to (at least one).
    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.max(1);
        self
    }

    /// Enable or disable indentation copying on [`split_line`](Self::split_line).
    #[must_use]
    pub const fn with_auto_indent(mut self, enabled: bool) -> Self {
        self.auto_indent = enabled;
        self
    }

    // --- Queries ---

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer changed since creation or the last save.
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modified flag after a successful save.
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Counter bumped by every mutation.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Language hint derived from the file extension.
    pub fn language(&self) -> Language {
        self.path.as_deref().map_or(Language::Plain, Language::detect)
    }

    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub const fn auto_indent(&self) -> bool {
        self.auto_indent
    }

    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Length of a line in chars, zero past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    /// The document joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The document joined with its original line ending, ready to write.
    pub fn contents(&self) -> String {
        self.lines.join(self.line_ending.as_str())
    }

    // --- Editing ---

    /// Insert text at the cursor.
    ///
    /// Tabs expand to spaces and embedded newlines split the line. The
    /// cursor ends up just after the inserted text.
    pub fn insert(&mut self, text: &str) {
        let expanded = self.expand_tabs(text);
        if expanded.is_empty() {
            return;
        }

        let row = self.cursor.row;
        let at = byte_index(&self.lines[row], self.cursor.col);
        let tail = self.lines[row].split_off(at);

        let mut pieces = expanded.split('\n');
        let first = pieces.next().unwrap_or_default();
        self.lines[row].push_str(first);
        let rest: Vec<String> = pieces.map(String::from).collect();

        let (last_row, col) = match rest.last() {
            Some(last) => (row + rest.len(), last.chars().count()),
            None => (row, self.cursor.col + first.chars().count()),
        };
        let following = self.lines.split_off(row + 1);
        self.lines.extend(rest);
        self.lines.extend(following);
        self.lines[last_row].push_str(&tail);

        self.cursor = Cursor::at(last_row, col);
        self.touch();
    }

    /// Insert a single character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0; 4];
        self.insert(ch.encode_utf8(&mut utf8));
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// At the start of a line the line is joined onto the previous one.
    /// Returns `true` if anything was deleted.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor.col > 0 {
            let line = &mut self.lines[self.cursor.row];
            let start = byte_index(line, self.cursor.col - 1);
            let end = byte_index(line, self.cursor.col);
            line.replace_range(start..end, "");
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            let current = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            let prev = &mut self.lines[self.cursor.row];
            self.cursor.col = prev.chars().count();
            prev.push_str(&current);
        } else {
            return false;
        }
        self.touch();
        true
    }

    /// Delete the character at the cursor (Delete).
    ///
    /// At the end of a line the next line is joined onto this one.
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let row = self.cursor.row;
        if self.cursor.col < self.line_len(row) {
            let line = &mut self.lines[row];
            let start = byte_index(line, self.cursor.col);
            let end = byte_index(line, self.cursor.col + 1);
            line.replace_range(start..end, "");
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        } else {
            return false;
        }
        self.touch();
        true
    }

    /// Split the current line at the cursor (Enter).
    ///
    /// With auto-indent on, the new line starts with the leading whitespace
    /// of the text left of the cursor, one level deeper when that text ends
    /// with one of the language's block openers.
    pub fn split_line(&mut self) {
        let row = self.cursor.row;
        let at = byte_index(&self.lines[row], self.cursor.col);
        let tail = self.lines[row].split_off(at);

        let indent = if self.auto_indent {
            self.indent_after(&self.lines[row])
        } else {
            String::new()
        };
        let col = indent.chars().count();
        self.lines.insert(row + 1, indent + &tail);

        self.cursor = Cursor::at(row + 1, col);
        self.touch();
    }

    // --- Cursor movement ---

    /// Move the cursor by a row and column delta.
    ///
    /// The row is clamped first. If it changed, the column is reclamped to
    /// the new line and `delta_col` is ignored; otherwise `delta_col` is
    /// applied and clamped to the current line.
    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        let max_row = self.lines.len() - 1;
        let row = self.cursor.row.saturating_add_signed(delta_row).min(max_row);
        if row == self.cursor.row {
            self.cursor.col = self
                .cursor
                .col
                .saturating_add_signed(delta_col)
                .min(self.line_len(row));
        } else {
            self.cursor.row = row;
            self.cursor.col = self.cursor.col.min(self.line_len(row));
        }
    }

    /// Move one char left, wrapping to the end of the previous line.
    pub fn step_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.line_len(self.cursor.row);
        }
    }

    /// Move one char right, wrapping to the start of the next line.
    pub fn step_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.row) {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.row);
    }

    /// Move to a specific position, clamped into the document.
    pub fn move_to(&mut self, row: usize, col: usize) {
        let row = row.min(self.lines.len() - 1);
        self.cursor = Cursor::at(row, col.min(self.line_len(row)));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor = Cursor::at(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.lines.len() - 1;
        self.cursor = Cursor::at(last, self.line_len(last));
    }

    // --- Linear offsets ---

    /// The cursor as a char offset into [`text`](Self::text).
    pub fn linear_offset(&self) -> usize {
        self.offset_of(self.cursor)
    }

    /// Convert a char offset back into a position, clamped to the end.
    pub fn position_at(&self, offset: usize) -> Cursor {
        let mut remaining = offset;
        for (row, line) in self.lines.iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return Cursor::at(row, remaining);
            }
            remaining -= len + 1;
        }
        let last = self.lines.len() - 1;
        Cursor::at(last, self.line_len(last))
    }

    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor = self.position_at(offset);
    }

    fn offset_of(&self, pos: Cursor) -> usize {
        self.lines[..pos.row]
            .iter()
            .map(|line| line.chars().count() + 1)
            .sum::<usize>()
            + pos.col
    }

    // --- Search and replace ---

    /// Move to the next occurrence of `term` after the cursor, wrapping.
    ///
    /// Returns the match offset, or `None` when the term does not occur.
    pub fn find_next(&mut self, term: &str) -> Option<usize> {
        let found = search::find_forward(&self.text(), term, self.linear_offset() + 1)?;
        self.anchor = None;
        self.set_cursor_offset(found);
        Some(found)
    }

    /// Move to the previous occurrence of `term` before the cursor, wrapping.
    pub fn find_previous(&mut self, term: &str) -> Option<usize> {
        let found = search::find_backward(&self.text(), term, self.linear_offset())?;
        self.anchor = None;
        self.set_cursor_offset(found);
        Some(found)
    }

    /// Replace `term` if the cursor sits on it, otherwise move to the next one.
    ///
    /// After a replacement the cursor is left just past the inserted text;
    /// reaching the following match takes an explicit [`find_next`](Self::find_next).
    pub fn replace_at(&mut self, term: &str, replacement: &str) -> ReplaceOutcome {
        if term.is_empty() {
            return ReplaceOutcome::NotFound;
        }

        let mut text = self.text();
        let offset = self.linear_offset();
        let start = byte_index(&text, offset);
        if text[start..].starts_with(term) {
            text.replace_range(start..start + term.len(), replacement);
            self.set_text(&text);
            self.set_cursor_offset(offset + replacement.chars().count());
            self.touch();
            return ReplaceOutcome::Replaced;
        }

        self.find_next(term)
            .map_or(ReplaceOutcome::NotFound, ReplaceOutcome::Positioned)
    }

    /// Replace every occurrence of `term`, returning how many were replaced.
    pub fn replace_all(&mut self, term: &str, replacement: &str) -> usize {
        if term.is_empty() {
            return 0;
        }
        let text = self.text();
        let count = text.matches(term).count();
        if count == 0 {
            return 0;
        }

        self.set_text(&text.replace(term, replacement));
        self.clamp_cursor();
        self.touch();
        count
    }

    // --- Selection ---

    /// Anchor a selection at the cursor unless one is already anchored.
    pub const fn begin_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// The selected range in document order, `None` when nothing is selected.
    pub fn selection(&self) -> Option<(Cursor, Cursor)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        let text = self.text();
        let from = byte_index(&text, self.offset_of(start));
        let to = byte_index(&text, self.offset_of(end));
        Some(text[from..to].to_string())
    }

    // --- Private helpers ---

    const fn touch(&mut self) {
        self.anchor = None;
        self.modified = true;
        self.revision = self.revision.wrapping_add(1);
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        self.anchor = None;
    }

    fn clamp_cursor(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        self.cursor = Cursor::at(row, self.cursor.col.min(self.line_len(row)));
    }

    fn expand_tabs(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '\t' => out.push_str(&" ".repeat(self.tab_width)),
                '\r' => {}
                _ => out.push(ch),
            }
        }
        out
    }

    fn indent_after(&self, head: &str) -> String {
        let mut indent: String = head
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        if head.trim_end().ends_with(self.language().indent_openers()) {
            indent.push_str(&" ".repeat(self.tab_width));
        }
        indent
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("lines", &format_args!("{} lines", self.lines.len()))
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
