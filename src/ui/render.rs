use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::editor::Cursor;
use crate::search::byte_index;

use super::status;

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let [editor_area, status_area, message_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_editor(model, frame, editor_area);
    status::render_status_bar(model, frame, status_area);
    status::render_message_bar(model, frame, message_area);
}

fn render_editor(model: &mut Model, frame: &mut Frame, area: Rect) {
    let gutter = model.gutter_width();
    let rows = model.viewport.visible_rows(model.buffer.line_count());
    let styled = model.styled_rows(rows.clone());
    let selection = model.buffer.selection();
    let col_offset = model.viewport.col_offset();
    let text_width = usize::from(area.width.saturating_sub(gutter));

    let mut content: Vec<Line> = Vec::with_capacity(styled.len());
    for (row, spans) in rows.clone().zip(styled) {
        let mut line = Vec::new();
        if gutter > 0 {
            let number = format!("{:>width$} ", row + 1, width = usize::from(gutter - 1));
            line.push(Span::styled(number, Style::default().fg(Color::DarkGray)));
        }
        let selected = selection
            .and_then(|(start, end)| selected_cols(start, end, row, model.buffer.line_len(row)));
        let spans = match selected {
            Some(cols) => reverse_cols(spans, &cols),
            None => spans,
        };
        line.extend(clip_spans(spans, col_offset, text_width));
        content.push(Line::from(line));
    }
    frame.render_widget(Paragraph::new(content), area);

    // The prompt owns the terminal cursor while it is open.
    if model.prompt.is_some() {
        return;
    }
    let cursor = model.buffer.cursor();
    if !rows.contains(&cursor.row) {
        return;
    }
    let line = model.buffer.line(cursor.row).unwrap_or_default();
    let x = display_width_before(line, cursor.col).saturating_sub(col_offset);
    let y = cursor.row - rows.start;
    if x < text_width
        && let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
    {
        frame.set_cursor_position(Position::new(area.x + gutter + x, area.y + y));
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Terminal columns taken by the first `col` chars of `line`.
pub fn display_width_before(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    if ch == '\t' { 1 } else { ch.width().unwrap_or(0) }
}

/// Char columns of `row` covered by the selection `start..end`.
fn selected_cols(start: Cursor, end: Cursor, row: usize, line_len: usize) -> Option<Range<usize>> {
    if row < start.row || row > end.row {
        return None;
    }
    let from = if row == start.row { start.col } else { 0 };
    let to = if row == end.row { end.col } else { line_len };
    (from < to).then_some(from..to)
}

/// Reverse the video of the chars in `cols`, splitting spans as needed.
fn reverse_cols(spans: Vec<Span<'static>>, cols: &Range<usize>) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len() + 2);
    let mut pos = 0;
    for span in spans {
        let len = span.content.chars().count();
        let start = cols.start.clamp(pos, pos + len) - pos;
        let end = cols.end.clamp(pos, pos + len) - pos;
        pos += len;
        if start >= end {
            out.push(span);
            continue;
        }

        let text = span.content.as_ref();
        let (a, b) = (byte_index(text, start), byte_index(text, end));
        let pieces = [
            (&text[..a], span.style),
            (&text[a..b], span.style.add_modifier(Modifier::REVERSED)),
            (&text[b..], span.style),
        ];
        out.extend(
            pieces
                .into_iter()
                .filter(|(piece, _)| !piece.is_empty())
                .map(|(piece, style)| Span::styled(piece.to_string(), style)),
        );
    }
    out
}

/// Keep the part of a line between display columns `skip` and `skip + width`.
///
/// Tabs show as a single space and other control chars are dropped.
fn clip_spans(spans: Vec<Span<'static>>, skip: usize, width: usize) -> Vec<Span<'static>> {
    let end = skip + width;
    let mut out = Vec::new();
    let mut col = 0;
    for span in spans {
        let mut kept = String::new();
        for ch in span.content.chars() {
            let start = col;
            col += char_width(ch);
            if start < skip || col > end {
                continue;
            }
            if ch == '\t' {
                kept.push(' ');
            } else if !ch.is_control() {
                kept.push(ch);
            }
        }
        if !kept.is_empty() {
            out.push(Span::styled(kept, span.style));
        }
        if col >= end {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span<'_>]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_clip_spans_skips_and_truncates() {
        let spans = vec![Span::raw("hello "), Span::raw("world")];
        let clipped = clip_spans(spans, 3, 5);
        assert_eq!(text_of(&clipped), "lo wo");
    }

    #[test]
    fn test_clip_spans_counts_wide_chars() {
        let clipped = clip_spans(vec![Span::raw("日本語")], 0, 4);
        assert_eq!(text_of(&clipped), "日本");
    }

    #[test]
    fn test_clip_spans_shows_tab_as_space() {
        let clipped = clip_spans(vec![Span::raw("a\tb")], 0, 10);
        assert_eq!(text_of(&clipped), "a b");
    }

    #[test]
    fn test_reverse_cols_splits_spans() {
        let spans = vec![Span::raw("abc"), Span::raw("def")];
        let out = reverse_cols(spans, &(2..4));
        assert_eq!(text_of(&out), "abcdef");
        let reversed: String = out
            .iter()
            .filter(|span| span.style.add_modifier.contains(Modifier::REVERSED))
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(reversed, "cd");
    }

    #[test]
    fn test_selected_cols_across_lines() {
        let (start, end) = (Cursor::at(0, 2), Cursor::at(2, 1));
        assert_eq!(selected_cols(start, end, 0, 5), Some(2..5));
        assert_eq!(selected_cols(start, end, 1, 3), Some(0..3));
        assert_eq!(selected_cols(start, end, 2, 4), Some(0..1));
        assert_eq!(selected_cols(start, end, 3, 4), None);
    }

    #[test]
    fn test_display_width_before_counts_columns() {
        assert_eq!(display_width_before("日本語", 2), 4);
        assert_eq!(display_width_before("abc", 10), 3);
    }

    #[test]
    fn test_line_number_width() {
        assert_eq!(line_number_width(1), 1);
        assert_eq!(line_number_width(99), 2);
        assert_eq!(line_number_width(100), 3);
    }
}
