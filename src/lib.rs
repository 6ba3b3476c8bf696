// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. file_io::FileError)
    clippy::module_name_repetitions
)]

//! # cedit
//!
//! A small terminal text editor built around a line buffer.
//!
//! cedit edits one file at a time in the terminal with:
//! - Auto-indent that follows the file's language
//! - Wrap-around find and interactive find/replace
//! - Syntax highlighting for Python, JavaScript, HTML, CSS and Markdown
//! - Line endings preserved on save
//!
//! ## Architecture
//!
//! cedit uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The editing core ([`editor::LineBuffer`]) knows nothing about the
//! terminal or the file system and can be used on its own.
//!
//! ## Modules
//!
//! - [`editor`]: The line buffer and its cursor
//! - [`search`]: Substring search over buffer text
//! - [`language`]: Language detection from file extensions
//! - [`file_io`]: Loading and saving buffers
//! - [`highlight`]: Syntax highlighting
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod file_io;
pub mod highlight;
pub mod language;
pub mod search;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Cursor, LineBuffer, ReplaceOutcome};
    pub use crate::file_io::{BufferOptions, FileError};
    pub use crate::language::Language;
    pub use crate::ui::viewport::Viewport;
}
