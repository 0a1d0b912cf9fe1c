//! # StatusBar Component
//!
//! Bottom lines of the screen: the latest status message (if any) wrapped to
//! the terminal width, then a fixed key help line.
//!
//! StatusBar is purely presentational. It receives the message as a prop and
//! reports how tall it needs to be for a given width, so the caller can size
//! the layout before rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const HELP_TEXT: &str = "Arrow keys to navigate, Enter to select, Del to go back (F1 to Exit)";

pub struct StatusBar {
    pub status_message: String,
}

impl StatusBar {
    pub fn new(status_message: impl Into<String>) -> Self {
        Self {
            status_message: status_message.into(),
        }
    }

    fn status_lines(&self, width: u16) -> Vec<String> {
        if self.status_message.is_empty() || width == 0 {
            return Vec::new();
        }
        let options = textwrap::Options::new(width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        textwrap::wrap(&self.status_message, options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    /// Lines needed at `width`: the wrapped status plus the help line.
    pub fn height(&self, width: u16) -> u16 {
        self.status_lines(width).len() as u16 + 1
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = self
            .status_lines(area.width)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().add_modifier(Modifier::BOLD))))
            .collect();
        lines.push(Line::from(Span::styled(
            HELP_TEXT,
            Style::default().add_modifier(Modifier::DIM),
        )));
        // Keep the help line when space is short.
        let skip = lines.len().saturating_sub(area.height as usize);
        frame.render_widget(Paragraph::new(lines.split_off(skip)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(bar: &mut StatusBar, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_help_only_without_status() {
        let mut bar = StatusBar::new("");
        assert_eq!(bar.height(80), 1);
        let text = rendered_text(&mut bar, 80, 1);
        assert!(text.contains("Arrow keys to navigate"));
        assert!(text.contains("F1 to Exit"));
    }

    #[test]
    fn test_status_above_help() {
        let mut bar = StatusBar::new("Test called");
        assert_eq!(bar.height(80), 2);
        let text = rendered_text(&mut bar, 80, 2);
        let status_at = text.find("Test called").unwrap();
        let help_at = text.find("Arrow keys").unwrap();
        assert!(status_at < help_at);
    }

    #[test]
    fn test_long_status_wraps() {
        let bar = StatusBar::new("one two three four five six");
        assert_eq!(bar.height(10), 4);
    }

    #[test]
    fn test_help_survives_short_area() {
        let mut bar = StatusBar::new("a message");
        let text = rendered_text(&mut bar, 80, 1);
        assert!(text.contains("Arrow keys"));
        assert!(!text.contains("a message"));
    }
}
