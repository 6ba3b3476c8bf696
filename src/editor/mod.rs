//! The line buffer text model.
//!
//! Provides an ordered list of lines with a single cursor, edit
//! operations, search/replace and a selection anchor. The buffer performs
//! no I/O and knows nothing about rendering.

mod buffer;

pub use buffer::{Cursor, DEFAULT_TAB_WIDTH, LineBuffer, LineEnding, ReplaceOutcome};
