use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model, Motion};

impl App {
    pub(super) fn handle_event(&self, event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key(key, model),
            Event::Paste(text) if model.prompt.is_none() && model.replace.is_none() => {
                Some(Message::InsertText(text.replace("\r\n", "\n").replace('\r', "\n")))
            }
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if model.prompt.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(Message::PromptSubmit),
                KeyCode::Backspace => Some(Message::PromptBackspace),
                KeyCode::Char(c) if !ctrl && !alt => Some(Message::PromptInput(c)),
                _ => None,
            };
        }

        if model.replace.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::ReplaceHere),
                KeyCode::Char('n' | 'N') => Some(Message::ReplaceSkip),
                KeyCode::Char('a' | 'A') => Some(Message::ReplaceRest),
                KeyCode::Char('q') if ctrl => Some(Message::Quit),
                KeyCode::Esc | KeyCode::Char('q') => Some(Message::ReplaceStop),
                _ => None,
            };
        }

        if ctrl && let KeyCode::Char(c) = key.code {
            return match c.to_ascii_lowercase() {
                'q' => Some(Message::Quit),
                's' => Some(Message::Save),
                'o' => Some(Message::Open),
                'n' => Some(Message::NewFile),
                'f' => Some(Message::Find),
                'g' => Some(Message::FindNext),
                'r' => Some(Message::Replace),
                'c' => Some(Message::Copy),
                'v' => Some(Message::Paste),
                _ => None,
            };
        }

        let motion = match key.code {
            KeyCode::Up => Some(Motion::Up),
            KeyCode::Down => Some(Motion::Down),
            KeyCode::Left => Some(Motion::Left),
            KeyCode::Right => Some(Motion::Right),
            KeyCode::Home if ctrl => Some(Motion::DocumentStart),
            KeyCode::End if ctrl => Some(Motion::DocumentEnd),
            KeyCode::Home => Some(Motion::Home),
            KeyCode::End => Some(Motion::End),
            KeyCode::PageUp => Some(Motion::PageUp),
            KeyCode::PageDown => Some(Motion::PageDown),
            _ => None,
        };
        if let Some(motion) = motion {
            return Some(if shift {
                Message::Select(motion)
            } else {
                Message::Move(motion)
            });
        }

        match key.code {
            KeyCode::F(3) if shift => Some(Message::FindPrevious),
            KeyCode::F(3) => Some(Message::FindNext),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Tab => Some(Message::Insert('\t')),
            KeyCode::Backspace => Some(Message::DeleteBackward),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Esc => Some(Message::ClearSelection),
            KeyCode::Char(c) if !alt => Some(Message::Insert(c)),
            _ => None,
        }
    }
}
