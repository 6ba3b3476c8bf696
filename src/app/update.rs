use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{Effect, Prompt, PromptKind, ReplaceSession, ToastLevel};
use crate::editor::{LineBuffer, ReplaceOutcome};
use crate::search;

/// Cursor movements shared by plain and selecting motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    Insert(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Split line at cursor (Enter)
    SplitLine,
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Copy the selection into the clipboard
    Copy,
    /// Insert the clipboard at the cursor
    Paste,

    // Movement
    /// Move the cursor, dropping any selection
    Move(Motion),
    /// Move the cursor, extending the selection
    Select(Motion),
    /// Drop the selection
    ClearSelection,

    // Files
    /// Start an empty untitled buffer
    NewFile,
    /// Ask for a file to open
    Open,
    /// Save, asking for a name when untitled
    Save,

    // Search
    /// Ask for a search term
    Find,
    /// Jump to the next match of the last term
    FindNext,
    /// Jump to the previous match of the last term
    FindPrevious,
    /// Ask for a term and replacement
    Replace,

    // Prompt
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,

    // Replace confirm loop
    /// Replace the match under the cursor and move to the next one
    ReplaceHere,
    /// Leave this match and move to the next one
    ReplaceSkip,
    /// Replace every remaining match
    ReplaceRest,
    /// End the replace loop
    ReplaceStop,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File access is only requested through `pending_effect`.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::NewFile | Message::Open) {
        model.discard_confirmed = false;
    }

    match msg {
        // Editing
        Message::Insert(ch) => model.buffer.insert_char(ch),
        Message::InsertText(text) => model.buffer.insert(&text),
        Message::SplitLine => model.buffer.split_line(),
        Message::DeleteBackward => {
            model.buffer.delete_backward();
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
        }
        Message::Copy => match model.buffer.selected_text() {
            Some(text) => {
                let count = text.chars().count();
                model.clipboard = text;
                model.show_toast(ToastLevel::Info, format!("Copied {count} chars"));
            }
            None => model.show_toast(ToastLevel::Info, "Nothing selected"),
        },
        Message::Paste => {
            if model.clipboard.is_empty() {
                model.show_toast(ToastLevel::Info, "Clipboard is empty");
            } else {
                let text = model.clipboard.clone();
                model.buffer.insert(&text);
            }
        }

        // Movement
        Message::Move(motion) => {
            model.buffer.clear_selection();
            apply_motion(&mut model, motion);
        }
        Message::Select(motion) => {
            model.buffer.begin_selection();
            apply_motion(&mut model, motion);
        }
        Message::ClearSelection => model.buffer.clear_selection(),

        // Files
        Message::NewFile => {
            if confirm_discard(&mut model, "Ctrl+N") {
                let buffer = model.options.empty_buffer();
                model.replace_buffer(buffer);
                model.show_toast(ToastLevel::Info, "New file");
            }
        }
        Message::Open => {
            if confirm_discard(&mut model, "Ctrl+O") {
                model.replace = None;
                model.prompt = Some(Prompt::new(PromptKind::Open));
            }
        }
        Message::Save => {
            if model.buffer.path().is_some() {
                model.pending_effect = Some(Effect::Save);
            } else {
                model.prompt = Some(Prompt::new(PromptKind::SaveAs));
            }
        }

        // Search
        Message::Find => {
            let last = model.last_search.clone().unwrap_or_default();
            model.replace = None;
            model.prompt = Some(Prompt::new(PromptKind::Find).with_input(last));
        }
        Message::FindNext => find_again(&mut model, true),
        Message::FindPrevious => find_again(&mut model, false),
        Message::Replace => {
            model.replace = None;
            model.prompt = Some(Prompt::new(PromptKind::ReplaceTerm));
        }

        // Prompt
        Message::PromptInput(ch) => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input.push(ch);
            }
        }
        Message::PromptBackspace => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input.pop();
            }
        }
        Message::PromptCancel => model.prompt = None,
        Message::PromptSubmit => {
            if let Some(prompt) = model.prompt.take() {
                submit_prompt(&mut model, prompt);
            }
        }

        // Replace confirm loop
        Message::ReplaceHere => {
            if let Some(session) = model.replace.clone() {
                match model.buffer.replace_at(&session.term, &session.replacement) {
                    ReplaceOutcome::Replaced => {
                        if let Some(active) = &mut model.replace {
                            active.record_replacement();
                        }
                        let from = model.buffer.linear_offset();
                        advance_replace(&mut model, from);
                    }
                    ReplaceOutcome::Positioned(_) => {}
                    ReplaceOutcome::NotFound => finish_replace(&mut model, "No more matches"),
                }
            }
        }
        Message::ReplaceSkip => {
            let from = model.buffer.linear_offset() + 1;
            advance_replace(&mut model, from);
        }
        Message::ReplaceRest => {
            if let Some(session) = model.replace.take() {
                let count = model.buffer.replace_all(&session.term, &session.replacement);
                let noun = if count == 1 { "occurrence" } else { "occurrences" };
                model.show_toast(ToastLevel::Info, format!("Replaced {count} {noun}"));
            }
        }
        Message::ReplaceStop => model.replace = None,

        // Window
        Message::Resize(width, height) => model.screen = (width, height),

        // Application
        Message::Quit => {
            if model.buffer.is_modified() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model.ensure_cursor_visible();
    model
}

fn apply_motion(model: &mut Model, motion: Motion) {
    let page = isize::try_from(model.viewport.page_rows()).unwrap_or(isize::MAX);
    let buffer = &mut model.buffer;
    match motion {
        Motion::Up => buffer.move_cursor(-1, 0),
        Motion::Down => buffer.move_cursor(1, 0),
        Motion::Left => buffer.step_left(),
        Motion::Right => buffer.step_right(),
        Motion::Home => buffer.move_home(),
        Motion::End => buffer.move_end(),
        Motion::PageUp => buffer.move_cursor(-page, 0),
        Motion::PageDown => buffer.move_cursor(page, 0),
        Motion::DocumentStart => buffer.move_to_start(),
        Motion::DocumentEnd => buffer.move_to_end(),
    }
}

/// Returns `true` when the buffer may be thrown away.
///
/// With unsaved changes the first press only warns.
fn confirm_discard(model: &mut Model, key: &str) -> bool {
    if !model.buffer.is_modified() || model.discard_confirmed {
        model.discard_confirmed = false;
        return true;
    }
    model.show_toast(
        ToastLevel::Warning,
        format!("Unsaved changes! Press {key} again to discard them"),
    );
    model.discard_confirmed = true;
    false
}

fn submit_prompt(model: &mut Model, prompt: Prompt) {
    let input = prompt.input;
    match prompt.kind {
        PromptKind::Open | PromptKind::SaveAs if input.trim().is_empty() => {
            model.show_toast(ToastLevel::Warning, "No file name given");
        }
        PromptKind::Open => {
            model.pending_effect = Some(Effect::Open(PathBuf::from(input.trim())));
        }
        PromptKind::SaveAs => {
            model.pending_effect = Some(Effect::SaveAs(PathBuf::from(input.trim())));
        }
        PromptKind::Find | PromptKind::ReplaceTerm if input.is_empty() => {}
        PromptKind::Find => {
            if model.buffer.find_next(&input).is_none() {
                report_not_found(model, &input);
            }
            model.last_search = Some(input);
        }
        PromptKind::ReplaceTerm => {
            model.prompt = Some(Prompt::new(PromptKind::ReplaceWith(input)));
        }
        PromptKind::ReplaceWith(term) => {
            if let Some(start) = seek_match(&mut model.buffer, &term) {
                model.replace = Some(ReplaceSession::new(term.clone(), input, start));
            } else {
                report_not_found(model, &term);
            }
            model.last_search = Some(term);
        }
    }
}

/// Repeat the last search, or ask for a term when there is none.
fn find_again(model: &mut Model, forward: bool) {
    let Some(term) = model.last_search.clone() else {
        model.prompt = Some(Prompt::new(PromptKind::Find));
        return;
    };
    let found = if forward {
        model.buffer.find_next(&term)
    } else {
        model.buffer.find_previous(&term)
    };
    if found.is_none() {
        report_not_found(model, &term);
    }
}

/// Move to the first match at or after the cursor, wrapping.
fn seek_match(buffer: &mut LineBuffer, term: &str) -> Option<usize> {
    let found = search::find_forward(&buffer.text(), term, buffer.linear_offset())?;
    buffer.set_cursor_offset(found);
    Some(found)
}

/// Move the replace session to its next match at or after `from`, ending
/// it once the pass is back where it started.
fn advance_replace(model: &mut Model, from: usize) {
    let Some(session) = model.replace.as_mut() else {
        return;
    };
    let offsets = search::match_offsets(&model.buffer.text(), &session.term);
    let mut next = offsets.iter().copied().find(|&o| session.accepts(o, from));
    if next.is_none() && !session.wrapped {
        session.wrapped = true;
        next = offsets.iter().copied().find(|&o| session.accepts(o, 0));
    }
    match next {
        Some(offset) => model.buffer.set_cursor_offset(offset),
        None => finish_replace(model, "No more matches"),
    }
}

fn finish_replace(model: &mut Model, message: &str) {
    model.replace = None;
    model.show_toast(ToastLevel::Info, message);
}

fn report_not_found(model: &mut Model, term: &str) {
    tracing::debug!(term, "search term not found");
    model.show_toast(ToastLevel::Info, format!("\"{term}\" not found"));
}
