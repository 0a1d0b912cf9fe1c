//! menutree: hierarchical, keyboard-driven menus for the terminal.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How a submenu reachable from several parents decides where "Back" goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackPolicy {
    /// The first parent to link the submenu owns its back item.
    #[default]
    FirstParent,
    /// Linking an already-linked submenu from a second parent is an error.
    Exclusive,
    /// Back returns to whichever menu the submenu was entered from.
    Stack,
}

impl BackPolicy {
    /// The kebab-case name used on the command line and in config files.
    pub fn label(&self) -> String {
        self.to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for BackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
