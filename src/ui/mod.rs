//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - the editor pane with its line-number gutter
//! - the status bar and the bottom message/prompt bar

pub mod viewport;

mod render;
mod status;

pub use render::{display_width_before, line_number_width, render};

/// Rows below the text area: the status bar and the message bar.
pub const FOOTER_ROWS: u16 = 2;

#[cfg(test)]
mod tests;
