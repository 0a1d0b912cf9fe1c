//! # MenuView Component
//!
//! Draws one posted menu as a bordered box holding its item grid.
//!
//! ```text
//!     ┌Main────────────────────────────────┐
//!     │ * Item 1           Item 2          │
//!     │   Submenu          Back            │
//!     └────────────────────────────────────┘
//! ```
//!
//! Geometry comes from the surface's layout. The box is shifted and clamped
//! so it stays on screen when the terminal is smaller than configured. Labels
//! that do not fit their cell are cut at a character boundary by display
//! width, so wide glyphs never straddle two cells.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Block;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::surface::Surface;
use crate::tui::component::Component;

pub struct MenuView<'a> {
    pub title: &'a str,
    pub surface: &'a Surface,
}

impl<'a> MenuView<'a> {
    pub fn new(title: &'a str, surface: &'a Surface) -> Self {
        Self { title, surface }
    }

    /// Where the box lands inside `area`.
    pub fn window(&self, area: Rect) -> Rect {
        let layout = self.surface.layout();
        let width = layout.width.min(area.width);
        let height = layout.height.min(area.height);
        let x = layout.x.min(area.width - width);
        let y = layout.y.min(area.height - height);
        Rect::new(area.x + x, area.y + y, width, height)
    }

    fn cell_text(&self, index: usize, cell_width: usize) -> String {
        let layout = self.surface.layout();
        let entry = &self.surface.entries()[index];
        let prefix = if self.surface.current_selection() == Some(index) {
            layout.mark.clone()
        } else {
            " ".repeat(layout.mark.width())
        };
        let text = if layout.show_descriptions && !entry.description.is_empty() {
            format!("{prefix}{}  {}", entry.label, entry.description)
        } else {
            format!("{prefix}{}", entry.label)
        };
        fit(&text, cell_width)
    }
}

impl Component for MenuView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let window = self.window(area);
        let block = Block::bordered().title(self.title);
        let inner = block.inner(window);
        frame.render_widget(block, window);

        let columns = self.surface.layout().columns;
        let cell_width = inner.width / columns;
        if cell_width == 0 {
            return;
        }

        let top_row = self.surface.top_row();
        for index in self.surface.visible_range() {
            let (row, column) = self.surface.cell(index);
            let line = (row - top_row) as u16;
            if line >= inner.height {
                break;
            }
            let cell = Rect::new(
                inner.x + column as u16 * cell_width,
                inner.y + line,
                cell_width,
                1,
            );
            let style = if self.surface.current_selection() == Some(index) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let text = self.cell_text(index, cell_width as usize);
            frame.render_widget(Span::styled(text, style), cell);
        }
    }
}

/// Cut `text` to at most `width` display columns.
fn fit(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
