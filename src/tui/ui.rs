use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::frontend::Screen;
use crate::tui::component::Component;
use crate::tui::components::{MenuView, StatusBar};

pub fn draw_ui(frame: &mut Frame, screen: &Screen<'_>) {
    use Constraint::{Length, Min};

    let mut status_bar = StatusBar::new(screen.status);
    let status_height = status_bar.height(frame.area().width);
    let layout = Layout::vertical([Min(0), Length(status_height)]);
    let [menu_area, status_area] = layout.areas(frame.area());

    if let Some(menu) = screen.menu {
        MenuView::new(menu.title(), menu.surface()).render(frame, menu_area);
    }
    status_bar.render(frame, status_area);
}
