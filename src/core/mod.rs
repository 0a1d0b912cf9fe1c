//! # Core Menu Logic
//!
//! Menus, their items, and the navigator that walks between them.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • MenuTree (arena)     │
//!                    │  • Dispatch (handles)   │
//!                    │  • Navigator (loop)     │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │ Frontend
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  Scripted  │
//!             │ (ratatui)  │          │ (--replay) │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`args`]: `ArgPipeline`, the typed argument bundle passed down the tree
//! - [`handler`]: `Action`, a closure of any supported arity behind one type
//! - [`dispatch`]: what selecting an item does (action, transition, back)
//! - [`menu`] and [`tree`]: menus and the arena that owns them
//! - [`surface`]: the grid selection model each menu renders through
//! - [`navigator`]: event handling and the navigation loop

pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod frontend;
pub mod handler;
pub mod menu;
pub mod navigator;
pub mod surface;
pub mod tree;

// Re-export commonly used types for convenience
pub use args::ArgPipeline;
pub use error::MenuError;
pub use event::NavEvent;
pub use frontend::{Frontend, Screen, ScriptedFrontend, StopHandle};
pub use navigator::{Navigator, NavigatorOptions, RunOutcome, StatusLine};
pub use tree::MenuId;
