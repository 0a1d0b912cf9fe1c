//! # Frontends
//!
//! The navigator's only window to the outside world. A frontend renders the
//! current [`Screen`] and waits for the next [`NavEvent`]. The terminal
//! frontend lives in `tui`; [`ScriptedFrontend`] replays a fixed event list
//! without a terminal.
//!
//! Waiting must be interruptible: implementations check the [`StopHandle`]
//! at least once per poll interval and return `Ok(None)` once a stop has
//! been requested.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::event::NavEvent;
use crate::core::menu::Menu;

/// Everything a frontend needs to draw one frame.
pub struct Screen<'a> {
    /// The current menu, if one is shown.
    pub menu: Option<&'a Menu>,
    pub status: &'a str,
}

pub trait Frontend {
    fn render(&mut self, screen: &Screen<'_>) -> io::Result<()>;

    /// Block until the next event, or return `None` once `stop` is requested.
    fn next_event(&mut self, stop: &StopHandle) -> io::Result<Option<NavEvent>>;
}

/// Cloneable, thread-safe request to leave the navigation loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub(crate) fn reset(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }
}

/// One rendered frame, as recorded by [`ScriptedFrontend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    pub title: Option<String>,
    pub highlighted: Option<String>,
    pub status: String,
}

/// Headless frontend that feeds a fixed list of events, then requests a stop.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    events: VecDeque<NavEvent>,
    frames: Vec<FrameRecord>,
}

impl ScriptedFrontend {
    pub fn new(events: impl IntoIterator<Item = NavEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Frontend for ScriptedFrontend {
    fn render(&mut self, screen: &Screen<'_>) -> io::Result<()> {
        let highlighted = screen.menu.and_then(|menu| {
            let surface = menu.surface();
            surface
                .current_selection()
                .and_then(|index| surface.entries().get(index))
                .map(|entry| entry.label.clone())
        });
        self.frames.push(FrameRecord {
            title: screen.menu.map(|menu| menu.title().to_string()),
            highlighted,
            status: screen.status.to_string(),
        });
        Ok(())
    }

    fn next_event(&mut self, stop: &StopHandle) -> io::Result<Option<NavEvent>> {
        if stop.is_requested() {
            return Ok(None);
        }
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                stop.request();
                Ok(None)
            }
        }
    }
}
