use std::fmt;

use crate::core::tree::MenuId;

/// Everything that can go wrong while building or navigating a menu tree.
///
/// Only `Construction` is fatal; the rest are reported to the caller (or to
/// the status line, when they happen inside the navigation loop) and leave
/// the tree as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A surface could not be built from the configured layout.
    Construction(String),
    /// Argument types did not line up with what a handler expects.
    TypeMismatch {
        expected: Vec<&'static str>,
        found: Vec<&'static str>,
    },
    /// A submenu already belongs to another parent (exclusive back policy).
    AmbiguousBackTarget {
        target: MenuId,
        existing: MenuId,
        requested: MenuId,
    },
    /// The id refers to a menu that has been destroyed.
    StaleMenu(MenuId),
    EmptyLabel,
    SelfTransition(MenuId),
    /// Back was requested but nothing is recorded to go back to.
    NoBackTarget(MenuId),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::Construction(msg) => write!(f, "cannot build menu surface: {msg}"),
            MenuError::TypeMismatch { expected, found } => write!(
                f,
                "argument type mismatch: expected ({}), found ({})",
                expected.join(", "),
                found.join(", ")
            ),
            MenuError::AmbiguousBackTarget {
                target,
                existing,
                requested,
            } => write!(
                f,
                "{target} already goes back to {existing}, cannot also link it from {requested}"
            ),
            MenuError::StaleMenu(id) => write!(f, "{id} no longer exists"),
            MenuError::EmptyLabel => write!(f, "menu item label must not be empty"),
            MenuError::SelfTransition(id) => write!(f, "{id} cannot open itself as a submenu"),
            MenuError::NoBackTarget(id) => write!(f, "{id} has nowhere to go back to"),
        }
    }
}

impl std::error::Error for MenuError {}
