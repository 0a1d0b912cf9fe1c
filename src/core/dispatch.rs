//! # Dispatch Handles
//!
//! Every menu item owns exactly one [`Dispatch`]. Executing it is the only way
//! the item has any effect.
//!
//! Handles never reach into other menus themselves. An action runs in place;
//! a transition or back request comes back as an [`Effect`] that the
//! navigator applies once the source menu is no longer borrowed:
//!
//! ```text
//! Dispatch::execute(pipeline)  →  Effect  →  Navigator::apply()
//! ```

use crate::core::args::ArgPipeline;
use crate::core::error::MenuError;
use crate::core::handler::Action;
use crate::core::tree::MenuId;

#[derive(Debug)]
pub enum Dispatch {
    /// Run a callable with the menu pipeline followed by `bound`.
    Action { action: Action, bound: ArgPipeline },
    /// Leave for `target`, carrying the menu pipeline followed by `bound`.
    Transition { target: MenuId, bound: ArgPipeline },
    /// Return to wherever this menu was entered from.
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    Action,
    Transition,
    Back,
}

/// What the navigator must do after a handle has executed.
#[derive(Debug)]
pub enum Effect {
    Stay,
    Enter { target: MenuId, carried: ArgPipeline },
    Back,
}

impl Dispatch {
    pub fn action(action: Action, bound: ArgPipeline) -> Result<Self, MenuError> {
        action.accepts_tail(&bound)?;
        Ok(Dispatch::Action { action, bound })
    }

    pub fn transition(target: MenuId, bound: ArgPipeline) -> Self {
        Dispatch::Transition { target, bound }
    }

    pub fn kind(&self) -> DispatchKind {
        match self {
            Dispatch::Action { .. } => DispatchKind::Action,
            Dispatch::Transition { .. } => DispatchKind::Transition,
            Dispatch::Back => DispatchKind::Back,
        }
    }

    pub fn target(&self) -> Option<MenuId> {
        match self {
            Dispatch::Transition { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn execute(&mut self, pipeline: &ArgPipeline) -> Result<Effect, MenuError> {
        match self {
            Dispatch::Action { action, bound } => {
                action.invoke(&pipeline.concat(bound))?;
                Ok(Effect::Stay)
            }
            Dispatch::Transition { target, bound } => Ok(Effect::Enter {
                target: *target,
                carried: pipeline.concat(bound),
            }),
            Dispatch::Back => Ok(Effect::Back),
        }
    }
}
