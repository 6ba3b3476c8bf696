use super::*;
use crate::app::{Message, Model, Motion, update};
use crate::editor::LineBuffer;
use crate::file_io::BufferOptions;
use ratatui::Terminal;
use ratatui::backend::{Backend, TestBackend};
use ratatui::layout::Position;
use ratatui::style::Modifier;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn model_with(text: &str, path: Option<&str>, size: (u16, u16)) -> Model {
    let mut model = Model::new(BufferOptions::default(), size).with_highlight(false);
    let buffer = LineBuffer::from_text(text);
    let buffer = match path {
        Some(path) => buffer.with_path(path),
        None => buffer,
    };
    model.replace_buffer(buffer);
    model
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

#[test]
fn test_render_shows_lines_with_gutter() {
    let mut model = model_with("first\nsecond", None, (40, 6));
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 0).starts_with("1 first"));
    assert!(row_text(&terminal, 1).starts_with("2 second"));
}

#[test]
fn test_render_without_line_numbers() {
    let mut model = model_with("first", None, (40, 6)).with_line_numbers(false);
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 0).starts_with("first"));
}

#[test]
fn test_status_bar_shows_name_position_and_language() {
    let mut model = model_with("x = 1\ny = 2\n", Some("calc.py"), (60, 6));
    model = update(model, Message::Insert('z'));
    let mut terminal = create_test_terminal(60, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let status = row_text(&terminal, 4);
    assert!(
        status.contains("calc.py [+] - 3 lines | Ln 1, Col 2 | python"),
        "unexpected status bar: {status:?}"
    );
}

#[test]
fn test_untitled_status_bar() {
    let mut model = model_with("", None, (60, 6));
    let mut terminal = create_test_terminal(60, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let status = row_text(&terminal, 4);
    assert!(status.contains("untitled - 1 lines | Ln 1, Col 1 | plain text"));
}

#[test]
fn test_cursor_is_placed_after_gutter() {
    let mut model = model_with("hello\nworld", None, (40, 6));
    model = update(model, Message::Move(Motion::Down));
    model = update(model, Message::Move(Motion::End));
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let cursor = terminal.backend_mut().get_cursor_position().unwrap();
    assert_eq!(cursor, Position::new(7, 1));
}

#[test]
fn test_cursor_accounts_for_wide_chars() {
    let mut model = model_with("日本語", None, (40, 6)).with_line_numbers(false);
    model = update(model, Message::Move(Motion::End));
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let cursor = terminal.backend_mut().get_cursor_position().unwrap();
    assert_eq!(cursor, Position::new(6, 0));
}

#[test]
fn test_long_line_scrolls_horizontally() {
    let text = "abcdefghijklmnopqrstuvwxyz";
    let mut model = model_with(text, None, (10, 5)).with_line_numbers(false);
    model = update(model, Message::Move(Motion::End));
    let mut terminal = create_test_terminal(10, 5);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert_eq!(row_text(&terminal, 0), "rstuvwxyz ");
    let cursor = terminal.backend_mut().get_cursor_position().unwrap();
    assert_eq!(cursor, Position::new(9, 0));
}

#[test]
fn test_cursor_far_down_scrolls_view() {
    let text = (1..=30)
        .map(|n| format!("line {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    let mut model = model_with(&text, None, (20, 7)).with_line_numbers(false);
    model = update(model, Message::Move(Motion::DocumentEnd));
    let mut terminal = create_test_terminal(20, 7);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 4).starts_with("line 30"));
    assert!(row_text(&terminal, 0).starts_with("line 26"));
}

#[test]
fn test_selection_is_reversed() {
    let mut model = model_with("select me", None, (30, 5)).with_line_numbers(false);
    for _ in 0..3 {
        model = update(model, Message::Select(Motion::Right));
    }
    let mut terminal = create_test_terminal(30, 5);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    for col in 0..3 {
        assert!(buffer[(col, 0)].modifier.contains(Modifier::REVERSED));
    }
    assert!(!buffer[(3, 0)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn test_prompt_replaces_message_bar() {
    let mut model = model_with("text", None, (40, 5));
    model = update(model, Message::Find);
    model = update(model, Message::PromptInput('t'));
    let mut terminal = create_test_terminal(40, 5);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 4).starts_with("Find: t"));
    let cursor = terminal.backend_mut().get_cursor_position().unwrap();
    assert_eq!(cursor, Position::new(7, 4));
}

#[test]
fn test_toast_is_shown_in_message_bar() {
    let mut model = model_with("text", None, (40, 5));
    model = update(model, Message::Copy);
    let mut terminal = create_test_terminal(40, 5);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 4).starts_with("[info] Nothing selected"));
}

#[test]
fn test_key_hints_shown_when_idle() {
    let mut model = model_with("text", None, (100, 5));
    let mut terminal = create_test_terminal(100, 5);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 4).contains("^S save"));
}

#[test]
fn test_highlighted_python_keeps_text() {
    let mut model = model_with("def f():\n    pass", Some("a.py"), (40, 6)).with_highlight(true);
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(row_text(&terminal, 0).starts_with("1 def f():"));
    assert!(row_text(&terminal, 1).starts_with("2     pass"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut model = model_with("some text\nmore", Some("a.py"), (3, 2));
    let mut terminal = create_test_terminal(3, 2);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
}
