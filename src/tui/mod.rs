//! # TUI Adapter
//!
//! The ratatui-specific layer. Acquires the terminal, renders the posted
//! menu, and translates keyboard events into core `NavEvent` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Waiting for input
//!
//! The navigator loop is single-threaded. [`TerminalFrontend::next_event`]
//! polls crossterm in slices of the configured poll interval and checks the
//! stop handle between slices, so a stop requested from an action or from
//! another thread is noticed within one interval.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::config::ResolvedConfig;
use crate::core::frontend::{Frontend, Screen, StopHandle};
use crate::core::navigator::{Navigator, RunOutcome};

pub use event::{map_event, map_key};

/// Holds the terminal in raw mode on the alternate screen, with the cursor
/// hidden. Everything is put back on drop, including on early return.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn acquire() -> std::io::Result<Self> {
        // Also installs a panic hook that restores the terminal.
        let terminal = ratatui::init();
        if let Err(e) = execute!(stdout(), Hide) {
            ratatui::restore();
            return Err(e);
        }
        info!("Terminal acquired (raw mode, alternate screen, cursor hidden)");
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
        ratatui::restore();
        info!("Terminal restored");
    }
}

pub struct TerminalFrontend {
    session: TerminalSession,
    poll_interval: Duration,
}

impl TerminalFrontend {
    pub fn new(session: TerminalSession, poll_interval: Duration) -> Self {
        Self {
            session,
            poll_interval,
        }
    }
}

impl Frontend for TerminalFrontend {
    fn render(&mut self, screen: &Screen<'_>) -> std::io::Result<()> {
        self.session
            .terminal
            .draw(|f| ui::draw_ui(f, screen))
            .map(|_| ())
    }

    fn next_event(&mut self, stop: &StopHandle) -> std::io::Result<Option<crate::core::NavEvent>> {
        loop {
            if stop.is_requested() {
                return Ok(None);
            }
            match event::poll_event_timeout(self.poll_interval) {
                Ok(Some(event)) => return Ok(Some(event)),
                Ok(None) => continue,
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

/// Run `navigator` on the real terminal until it stops or exits.
///
/// The terminal is restored before this returns, whatever the outcome.
pub fn run(navigator: &mut Navigator, config: &ResolvedConfig) -> std::io::Result<RunOutcome> {
    let session = TerminalSession::acquire()?;
    let mut frontend = TerminalFrontend::new(session, config.poll_interval);
    navigator.run(&mut frontend)
}
