//! Syntax highlighting for buffer contents.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions.
//! The buffer only hands over plain lines and a [`Language`] hint; this
//! module returns ratatui spans, one list per line.

use std::ops::Range;
use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use syntect::highlighting::{HighlightIterator, HighlightState, Highlighter, Theme, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxSet};

use crate::language::Language;

/// Highlight `lines` as `language`.
///
/// Unknown or plain languages produce one unstyled span per line.
pub fn highlight_lines(language: Language, lines: &[String]) -> Vec<Vec<Span<'static>>> {
    LineHighlighter::new(language).highlight(lines, 0..lines.len())
}

/// Highlighter that keeps each line's spans and the parser state after it.
///
/// After an edit only the lines from the first changed one down to the
/// requested range are highlighted again.
#[derive(Debug)]
pub struct LineHighlighter {
    language: Language,
    rows: Vec<HighlightedRow>,
}

#[derive(Debug)]
struct HighlightedRow {
    text: String,
    spans: Vec<Span<'static>>,
    /// Parser state after this line; `None` for unstyled text
    state: Option<(ParseState, HighlightState)>,
}

impl LineHighlighter {
    pub const fn new(language: Language) -> Self {
        Self {
            language,
            rows: Vec::new(),
        }
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Number of leading lines with cached results.
    pub fn cached_rows(&self) -> usize {
        self.rows.len()
    }

    /// Drop cached lines from the first one that no longer matches `lines`.
    pub fn sync(&mut self, lines: &[String]) {
        let unchanged = self
            .rows
            .iter()
            .zip(lines)
            .take_while(|(row, line)| row.text == **line)
            .count();
        self.rows.truncate(unchanged);
    }

    /// Spans for `lines[rows]`, highlighting any uncached lines above the
    /// end of the range first. Call [`sync`](Self::sync) after edits.
    pub fn rows(&mut self, lines: &[String], rows: Range<usize>) -> Vec<Vec<Span<'static>>> {
        let end = rows.end.min(lines.len());
        let start = rows.start.min(end);
        if self.rows.len() < end {
            let from = self.rows.len();
            self.extend(&lines[from..end]);
        }
        self.rows[start..end]
            .iter()
            .map(|row| row.spans.clone())
            .collect()
    }

    /// [`sync`](Self::sync) followed by [`rows`](Self::rows).
    pub fn highlight(&mut self, lines: &[String], rows: Range<usize>) -> Vec<Vec<Span<'static>>> {
        self.sync(lines);
        self.rows(lines, rows)
    }

    fn extend(&mut self, lines: &[String]) {
        let syntax_set = syntax_set();
        let syntax = self
            .language
            .syntax_token()
            .and_then(|token| syntax_set.find_syntax_by_token(token));
        let Some(syntax) = syntax else {
            self.rows.extend(lines.iter().map(|line| HighlightedRow {
                text: line.clone(),
                spans: vec![Span::raw(line.clone())],
                state: None,
            }));
            return;
        };

        let _span = tracing::trace_span!(
            "highlight",
            language = self.language.name(),
            from = self.rows.len(),
            lines = lines.len()
        )
        .entered();
        let mode = background_mode();
        let highlighter = Highlighter::new(theme());
        let (mut parse_state, mut highlight_state) = self
            .rows
            .last()
            .and_then(|row| row.state.clone())
            .unwrap_or_else(|| {
                (
                    ParseState::new(syntax),
                    HighlightState::new(&highlighter, ScopeStack::new()),
                )
            });

        for line in lines {
            let spans = match parse_state.parse_line(line, syntax_set) {
                Ok(ops) => HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter)
                    .map(|(style, text)| {
                        let fg = adjust_fg_for_background(
                            (style.foreground.r, style.foreground.g, style.foreground.b),
                            mode,
                        );
                        Span::styled(
                            text.to_string(),
                            Style::default().fg(Color::Rgb(fg.0, fg.1, fg.2)),
                        )
                    })
                    .collect(),
                Err(err) => {
                    tracing::debug!(error = %err, "highlight parse failed");
                    vec![Span::raw(line.clone())]
                }
            };
            self.rows.push(HighlightedRow {
                text: line.clone(),
                spans,
                state: Some((parse_state.clone(), highlight_state.clone())),
            });
        }
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _span = tracing::debug_span!("highlight.syntax_set.load_defaults").entered();
        SyntaxSet::load_defaults_nonewlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let _span = tracing::debug_span!("highlight.theme.load_defaults").entered();
        let theme_set = ThemeSet::load_defaults();
        let preferred = match background_mode() {
            BackgroundMode::Dark => [
                "Monokai Extended",
                "base16-monokai.dark",
                "Solarized (dark)",
                "base16-ocean.dark",
            ]
            .as_slice(),
            BackgroundMode::Light => [
                "InspiredGitHub",
                "Solarized (light)",
                "base16-ocean.light",
            ]
            .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// Force a light or dark palette; `None` goes back to detection.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

fn background_mode() -> BackgroundMode {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return match mode {
            HighlightBackground::Light => BackgroundMode::Light,
            HighlightBackground::Dark => BackgroundMode::Dark,
        };
    }
    background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn adjust_fg_for_background(color: (u8, u8, u8), mode: BackgroundMode) -> (u8, u8, u8) {
    match mode {
        BackgroundMode::Dark => color,
        BackgroundMode::Light => {
            let (r, g, b) = color;
            let luma = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
            if luma < 155.0 {
                return color;
            }
            let darken = |c: u8| (f32::from(c) * 0.42).round() as u8;
            (darken(r), darken(g), darken(b))
        }
    }
}
