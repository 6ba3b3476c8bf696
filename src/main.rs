//! cedit - A small terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! cedit notes.txt
//! cedit --tab-width 2 app.js
//! cedit --theme light --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cedit::app::App;
use cedit::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use cedit::highlight::{HighlightBackground, set_background_mode};

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "cedit", version, about, long_about = None)]
struct Cli {
    /// File to edit; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Number of spaces inserted for a tab
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    tab_width: Option<u16>,

    /// Do not copy indentation when splitting a line
    #[arg(long)]
    no_auto_indent: bool,

    /// Disable syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Hide the line-number gutter
    #[arg(long)]
    no_line_numbers: bool,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Build the subscriber that writes to `log_file`.
///
/// Without a log file nothing is installed: the TUI owns the terminal and
/// stderr output would be drawn over it. Failures already reach the user
/// as messages in the bottom bar.
fn log_subscriber(
    log_file: Option<&Path>,
) -> Result<Option<impl tracing::Subscriber + Send + Sync + 'static>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cedit=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    Ok(Some(subscriber))
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    if let Some(subscriber) = log_subscriber(effective.log_file.as_deref())? {
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to install log subscriber")?;
    }
    tracing::debug!(?effective, "effective flags");

    match effective.theme.unwrap_or(cli.theme) {
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    if cli.file.is_none() && (cli.save || cli.clear) {
        return Ok(());
    }

    let mut app = App::new(cli.file)
        .with_auto_indent(!effective.no_auto_indent)
        .with_highlight(!effective.no_highlight)
        .with_line_numbers(!effective.no_line_numbers);
    if let Some(width) = effective.tab_width {
        app = app.with_tab_width(width);
    }

    app.run().context("Application error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        assert!(log_subscriber(None).unwrap().is_none());
    }

    #[test]
    fn test_log_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cedit.log");
        let subscriber = log_subscriber(Some(&path)).unwrap().unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "cedit::app", "save failed");
        });

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("save failed"));
        assert!(!written.contains("\u{1b}["));
    }
}
