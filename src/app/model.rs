use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::text::Span;

use crate::editor::LineBuffer;
use crate::file_io::BufferOptions;
use crate::highlight::LineHighlighter;
use crate::language::Language;
use crate::ui::viewport::Viewport;

/// How long a toast stays in the bottom bar.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the bottom-bar prompt is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
    Find,
    ReplaceTerm,
    /// Second step of replace; carries the term entered first.
    ReplaceWith(String),
}

impl PromptKind {
    pub fn label(&self) -> String {
        match self {
            Self::Open => "Open file: ".to_string(),
            Self::SaveAs => "Save as: ".to_string(),
            Self::Find => "Find: ".to_string(),
            Self::ReplaceTerm => "Replace: ".to_string(),
            Self::ReplaceWith(term) => format!("Replace \"{term}\" with: "),
        }
    }
}

/// A single-line input shown in the bottom bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

/// An interactive replace in progress: the cursor sits on a match of
/// `term` waiting for the user to replace it, skip it or stop.
///
/// The session makes one pass over the document: forward from `start` to
/// the end, then from the top back up to `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceSession {
    pub term: String,
    pub replacement: String,
    /// Char offset of the first match offered
    pub start: usize,
    /// The search has gone past the end and restarted at the top
    pub wrapped: bool,
}

impl ReplaceSession {
    pub const fn new(term: String, replacement: String, start: usize) -> Self {
        Self {
            term,
            replacement,
            start,
            wrapped: false,
        }
    }

    /// Whether a match at `offset` is still to be offered, given that the
    /// search has reached `from`.
    pub fn accepts(&self, offset: usize, from: usize) -> bool {
        offset >= from && (!self.wrapped || offset + self.term.chars().count() <= self.start)
    }

    /// Keep `start` on the same text after a replacement made before it.
    pub fn record_replacement(&mut self) {
        if self.wrapped {
            self.start = (self.start + self.replacement.chars().count())
                .saturating_sub(self.term.chars().count());
        }
    }
}

/// File work requested by [`update`](super::update), run by the effects step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
}

#[derive(Debug)]
struct HighlightCache {
    /// Buffer revision the highlighter was last synced against
    revision: u64,
    highlighter: LineHighlighter,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document being edited
    pub buffer: LineBuffer,
    /// Scroll position of the text area
    pub viewport: Viewport,
    /// Options applied to new and opened buffers
    pub options: BufferOptions,
    /// Whether syntax colouring is drawn
    pub highlight_enabled: bool,
    /// Whether the line-number gutter is drawn
    pub line_numbers: bool,
    /// Text copied with Ctrl+C
    pub clipboard: String,
    /// Active bottom-bar prompt
    pub prompt: Option<Prompt>,
    /// Active replace confirm loop
    pub replace: Option<ReplaceSession>,
    /// Last term searched for, reused by find-next
    pub last_search: Option<String>,
    /// File work waiting for the effects step
    pub pending_effect: Option<Effect>,
    /// Full terminal size
    pub screen: (u16, u16),
    toast: Option<Toast>,
    highlight_cache: Option<HighlightCache>,
    /// Quit was pressed once with unsaved changes
    pub quit_confirmed: bool,
    /// New/Open was pressed once with unsaved changes
    pub discard_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model holding an empty buffer for a terminal of `screen` size.
    pub fn new(options: BufferOptions, screen: (u16, u16)) -> Self {
        let mut model = Self {
            buffer: options.empty_buffer(),
            viewport: Viewport::new(screen.0, screen.1),
            options,
            highlight_enabled: true,
            line_numbers: true,
            clipboard: String::new(),
            prompt: None,
            replace: None,
            last_search: None,
            pending_effect: None,
            screen,
            toast: None,
            highlight_cache: None,
            quit_confirmed: false,
            discard_confirmed: false,
            should_quit: false,
        };
        model.ensure_cursor_visible();
        model
    }

    #[must_use]
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self.ensure_cursor_visible();
        self
    }

    /// Swap in a freshly loaded or created buffer.
    pub fn replace_buffer(&mut self, buffer: LineBuffer) {
        self.buffer = buffer;
        self.highlight_cache = None;
        self.replace = None;
        self.viewport.reset();
        self.ensure_cursor_visible();
    }

    /// Columns taken by the line-number gutter, including its spacer.
    pub fn gutter_width(&self) -> u16 {
        if self.line_numbers {
            crate::ui::line_number_width(self.buffer.line_count()) + 1
        } else {
            0
        }
    }

    /// Resize the viewport to the text area and scroll it to the cursor.
    pub fn ensure_cursor_visible(&mut self) {
        let (width, height) = self.screen;
        self.viewport.resize(
            width.saturating_sub(self.gutter_width()),
            height.saturating_sub(crate::ui::FOOTER_ROWS),
        );
        let cursor = self.buffer.cursor();
        let line = self.buffer.line(cursor.row).unwrap_or_default();
        let col = crate::ui::display_width_before(line, cursor.col);
        self.viewport.follow(cursor.row, col);
    }

    /// Lines in `rows` as styled spans, highlighted when enabled.
    ///
    /// Highlighting runs from the top of the document so multi-line
    /// constructs colour correctly. Lines above the first edit keep their
    /// cached spans and parser state.
    pub fn styled_rows(&mut self, rows: Range<usize>) -> Vec<Vec<Span<'static>>> {
        let end = rows.end.min(self.buffer.line_count());
        let rows = rows.start.min(end)..end;
        let language = self.buffer.language();
        if !self.highlight_enabled || language == Language::Plain {
            return self.buffer.lines()[rows]
                .iter()
                .map(|line| vec![Span::raw(line.clone())])
                .collect();
        }

        let revision = self.buffer.revision();
        let lines = self.buffer.lines();
        let cache = self
            .highlight_cache
            .take()
            .filter(|cache| cache.highlighter.language() == language)
            .unwrap_or_else(|| HighlightCache {
                revision,
                highlighter: LineHighlighter::new(language),
            });
        let cache = self.highlight_cache.insert(cache);
        if cache.revision != revision {
            cache.highlighter.sync(lines);
            cache.revision = revision;
        }
        cache.highlighter.rows(lines, rows)
    }

    /// Show a message in the bottom bar for a few seconds.
    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// File name shown in the status bar.
    pub fn display_name(&self) -> String {
        self.buffer
            .path()
            .and_then(|path| path.file_name())
            .map_or_else(
                || "untitled".to_string(),
                |name| name.to_string_lossy().to_string(),
            )
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(BufferOptions::default(), (80, 24))
    }
}
