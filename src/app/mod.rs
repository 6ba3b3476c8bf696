//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File reads and writes never happen inside [`update`]; it queues an
//! effect which the loop runs right after the message is applied.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Effect, Model, Prompt, PromptKind, ReplaceSession, ToastLevel};
pub use update::{Message, Motion, update};

use std::path::PathBuf;

use crate::file_io::BufferOptions;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    options: BufferOptions,
    highlight_enabled: bool,
    line_numbers: bool,
}

impl App {
    /// Create a new application, optionally opening `file_path` on start.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            options: BufferOptions::default(),
            highlight_enabled: true,
            line_numbers: true,
        }
    }

    /// Set how many spaces Tab inserts.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.options.tab_width = width.max(1);
        self
    }

    /// Enable or disable copying indentation on Enter.
    pub const fn with_auto_indent(mut self, enabled: bool) -> Self {
        self.options.auto_indent = enabled;
        self
    }

    /// Enable or disable syntax colouring.
    pub const fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    /// Show or hide the line-number gutter.
    pub const fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }
}
