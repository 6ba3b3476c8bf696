use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

const KEY_HINTS: &str =
    " ^S save  ^O open  ^N new  ^F find  F3 next  ^R replace  ^C/^V copy/paste  ^Q quit";

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let cursor = model.buffer.cursor();
    let dirty_indicator = if model.buffer.is_modified() { " [+]" } else { "" };
    let status = format!(
        " {}{} - {} lines | Ln {}, Col {} | {}",
        model.display_name(),
        dirty_indicator,
        model.buffer.line_count(),
        cursor.row + 1,
        cursor.col + 1,
        model.buffer.language().name(),
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

/// The bottom line: an open prompt, the replace question, a toast or key hints.
pub fn render_message_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if let Some(prompt) = &model.prompt {
        let text = format!("{}{}", prompt.kind.label(), prompt.input);
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(bar, area);
        let x = area.x + width.min(area.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y));
        return;
    }

    if let Some(session) = &model.replace {
        let text = format!(
            "Replace \"{}\" with \"{}\"?  y: replace  n: skip  a: all  Esc: stop",
            session.term, session.replacement
        );
        let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(bar, area);
        return;
    }

    if let Some((message, level)) = model.active_toast() {
        let (prefix, style) = match level {
            ToastLevel::Info => (
                "[info]",
                Style::default().bg(Color::DarkGray).fg(Color::White),
            ),
            ToastLevel::Warning => (
                "[warn]",
                Style::default().bg(Color::Yellow).fg(Color::Black),
            ),
            ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
        };
        let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
        frame.render_widget(toast, area);
        return;
    }

    let hints = Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}
