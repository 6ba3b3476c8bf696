use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, effects, update};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or reading terminal
    /// events fails. File errors never end the loop; they are shown in
    /// the message bar.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: cedit requires an interactive terminal")?;
        let size = terminal.size()?;
        if let Err(err) = execute!(stdout(), EnableBracketedPaste) {
            tracing::debug!(error = %err, "bracketed paste unavailable");
        }

        let mut model = self.initial_model((size.width, size.height));
        tracing::debug!(width = size.width, height = size.height, "editor started");

        let result = self.event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();

        result
    }

    /// Build the starting model, loading the file given on the command line.
    pub(super) fn initial_model(&self, screen: (u16, u16)) -> Model {
        let mut model = Model::new(self.options, screen)
            .with_highlight(self.highlight_enabled)
            .with_line_numbers(self.line_numbers);
        if let Some(path) = &self.file_path {
            effects::open_file(&mut model, path);
        }
        model
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                terminal
                    .draw(|frame| crate::ui::render(model, frame))
                    .context("Failed to draw frame")?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Some(msg) = self.handle_event(event::read()?, model) {
                    Self::dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::ZERO)? {
                    if let Some(msg) = self.handle_event(event::read()?, model) {
                        Self::dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply one message and run whatever file work it requested.
    pub(super) fn dispatch(model: &mut Model, msg: Message) {
        tracing::trace!(?msg, "message");
        *model = update(std::mem::take(model), msg);
        effects::run_pending_effect(model);
    }
}
