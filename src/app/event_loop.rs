use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::TextBuffer;

use super::input;

/// Collapses a burst of terminal resize events into one applied resize.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        // Initialize terminal
        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — nib requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        // Load the buffer; a missing or unreadable file opens fresh
        let read_scope = crate::perf::scope("app.read_file");
        let (buffer, file_path) = match &self.file_path {
            Some(path) => match TextBuffer::from_file(path) {
                Ok(buffer) => {
                    tracing::info!(path = %path.display(), "opened file");
                    (buffer, path.clone())
                }
                Err(err) => {
                    tracing::info!(path = %path.display(), %err, "starting a new buffer");
                    (TextBuffer::empty(), path.clone())
                }
            },
            None => {
                tracing::info!("no file argument, starting an untitled buffer");
                (TextBuffer::empty(), PathBuf::new())
            }
        };
        drop(read_scope);

        let mut model = Model::new(file_path, buffer, (size.width, size.height))
            .with_highlighting(self.highlight_enabled);

        let result = Self::event_loop(&mut terminal, &mut model);

        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        tracing::debug!("entering input loop");
        loop {
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so the debouncer uses
                // accurate times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg = input::handle_event(&event::read()?, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg = input::handle_event(&event::read()?, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        tracing::debug!("input loop terminated");
        Ok(())
    }
}
