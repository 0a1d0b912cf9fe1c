use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::event::NavEvent;

/// Poll for an event with timeout. `Ok(None)` when nothing arrived in time
/// or the event has no meaning for navigation.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<NavEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(map_event(&event::read()?))
}

pub fn map_event(event: &Event) -> Option<NavEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Resize(_, _) => Some(NavEvent::Resize),
        _ => None,
    }
}

pub fn map_key(key_event: &KeyEvent) -> Option<NavEvent> {
    // Terminals with keyboard enhancement also report releases and repeats.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(NavEvent::Exit),
        (_, KeyCode::F(1)) => Some(NavEvent::Exit),
        (_, KeyCode::Up) => Some(NavEvent::MoveUp),
        (_, KeyCode::Down) => Some(NavEvent::MoveDown),
        (_, KeyCode::Left) => Some(NavEvent::MoveLeft),
        (_, KeyCode::Right) => Some(NavEvent::MoveRight),
        (_, KeyCode::Enter) => Some(NavEvent::Select),
        (_, KeyCode::Delete | KeyCode::Backspace | KeyCode::Esc) => Some(NavEvent::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_move() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(NavEvent::MoveUp));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(NavEvent::MoveDown));
        assert_eq!(map_key(&press(KeyCode::Left)), Some(NavEvent::MoveLeft));
        assert_eq!(map_key(&press(KeyCode::Right)), Some(NavEvent::MoveRight));
    }

    #[test]
    fn test_enter_selects_and_delete_goes_back() {
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(NavEvent::Select));
        assert_eq!(map_key(&press(KeyCode::Delete)), Some(NavEvent::Back));
        assert_eq!(map_key(&press(KeyCode::Backspace)), Some(NavEvent::Back));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(NavEvent::Back));
    }

    #[test]
    fn test_exit_keys() {
        assert_eq!(map_key(&press(KeyCode::F(1))), Some(NavEvent::Exit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(NavEvent::Exit)
        );
        // Plain 'c' means nothing.
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release), None);
    }

    #[test]
    fn test_resize_maps_to_redraw() {
        assert_eq!(map_event(&Event::Resize(80, 24)), Some(NavEvent::Resize));
        assert_eq!(map_event(&Event::FocusGained), None);
    }
}
