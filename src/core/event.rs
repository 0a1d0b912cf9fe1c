//! Navigation events, independent of any terminal library.

use std::fmt;
use std::str::FromStr;

use crate::core::surface::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Select,
    Back,
    /// Leave the program immediately.
    Exit,
    /// Leave the loop, keeping the last menu on screen.
    Stop,
    /// Terminal size changed; redraw only.
    Resize,
}

impl NavEvent {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            NavEvent::MoveUp => Some(Direction::Up),
            NavEvent::MoveDown => Some(Direction::Down),
            NavEvent::MoveLeft => Some(Direction::Left),
            NavEvent::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::MoveUp => "up",
            NavEvent::MoveDown => "down",
            NavEvent::MoveLeft => "left",
            NavEvent::MoveRight => "right",
            NavEvent::Select => "select",
            NavEvent::Back => "back",
            NavEvent::Exit => "exit",
            NavEvent::Stop => "stop",
            NavEvent::Resize => "resize",
        }
    }
}

impl fmt::Display for NavEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the names used by `--replay`, e.g. `down,down,enter,back`.
impl FromStr for NavEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(NavEvent::MoveUp),
            "down" => Ok(NavEvent::MoveDown),
            "left" => Ok(NavEvent::MoveLeft),
            "right" => Ok(NavEvent::MoveRight),
            "select" | "enter" => Ok(NavEvent::Select),
            "back" | "delete" => Ok(NavEvent::Back),
            "exit" => Ok(NavEvent::Exit),
            "stop" => Ok(NavEvent::Stop),
            "resize" => Ok(NavEvent::Resize),
            other => Err(format!("unknown navigation event: {other:?}")),
        }
    }
}
