//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::BackPolicy;
use crate::core::navigator::{Navigator, NavigatorOptions};
use crate::core::surface::SurfaceLayout;

/// Collects what actions did, in call order.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// A single-column list, so `MoveDown` steps through items one by one.
pub fn test_layout() -> SurfaceLayout {
    SurfaceLayout {
        columns: 1,
        ..SurfaceLayout::default()
    }
}

pub fn test_navigator() -> Navigator {
    test_navigator_with(BackPolicy::default())
}

pub fn test_navigator_with(back_policy: BackPolicy) -> Navigator {
    Navigator::new(NavigatorOptions {
        layout: test_layout(),
        back_policy,
        ..NavigatorOptions::default()
    })
    .expect("test layout is valid")
}
