//! # TUI Components
//!
//! Stateless, props-based components. Each receives everything it draws as
//! struct fields and renders into the `Rect` it is given:
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── menu_view.rs    (boxed item grid of the posted menu)
//! └── status_bar.rs   (status message and key help)
//! ```
//!
//! Each component file keeps its rendering logic and its tests together.

pub mod menu_view;
pub mod status_bar;

pub use menu_view::MenuView;
pub use status_bar::StatusBar;
