//! # Navigator
//!
//! The single context object that owns a menu tree and drives it.
//!
//! ```text
//! Navigator
//! ├── tree: MenuTree          // every menu, addressed by MenuId
//! ├── current: Option<MenuId> // the one posted menu
//! ├── visits: Vec<MenuId>     // entry path, for BackPolicy::Stack
//! ├── state: LoopState        // Idle → Running → Stopping → Idle
//! ├── stop: StopHandle        // interrupts the wait for input
//! └── status: StatusLine      // one line of feedback under the menu
//! ```
//!
//! Events go through [`Navigator::handle_event`]. Dispatch handles report an
//! [`Effect`] and the navigator applies it here, so a transition checks its
//! target before hiding anything and exactly one menu ends up posted.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::BackPolicy;
use crate::core::args::{ArgPipeline, FromArgs, IntoArgs};
use crate::core::dispatch::{Dispatch, Effect};
use crate::core::error::MenuError;
use crate::core::event::NavEvent;
use crate::core::frontend::{Frontend, Screen, StopHandle};
use crate::core::handler::{Action, Handler};
use crate::core::menu::{Menu, MenuItem};
use crate::core::surface::SurfaceLayout;
use crate::core::tree::{MenuId, MenuTree};

pub const DEFAULT_BACK_LABEL: &str = "Back";
pub const DEFAULT_BACK_DESCRIPTION: &str = "Go back to previous menu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorOptions {
    pub layout: SurfaceLayout,
    pub back_policy: BackPolicy,
    pub back_label: String,
    pub back_description: String,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            layout: SurfaceLayout::default(),
            back_policy: BackPolicy::default(),
            back_label: DEFAULT_BACK_LABEL.to_string(),
            back_description: DEFAULT_BACK_DESCRIPTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopping,
}

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
    Exit,
}

/// Why [`Navigator::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stopped cleanly; the last menu is still posted.
    Stopped,
    /// The exit key was pressed; the caller should terminate.
    Exit,
}

/// Shared one-line message area. Actions hold a clone to report results.
#[derive(Debug, Clone, Default)]
pub struct StatusLine(Rc<RefCell<String>>);

impl StatusLine {
    pub fn set(&self, message: impl Into<String>) {
        *self.0.borrow_mut() = message.into();
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct Navigator {
    tree: MenuTree,
    current: Option<MenuId>,
    visits: Vec<MenuId>,
    state: LoopState,
    stop: StopHandle,
    status: StatusLine,
    options: NavigatorOptions,
}

impl Navigator {
    pub fn new(options: NavigatorOptions) -> Result<Self, MenuError> {
        options.layout.validate()?;
        info!(
            "Navigator ready ({}x{} grid, back policy {})",
            options.layout.rows,
            options.layout.columns,
            options.back_policy.label()
        );
        Ok(Self {
            tree: MenuTree::new(),
            current: None,
            visits: Vec::new(),
            state: LoopState::Idle,
            stop: StopHandle::new(),
            status: StatusLine::default(),
            options,
        })
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn menu(&self, id: MenuId) -> Result<&Menu, MenuError> {
        self.tree.get(id)
    }

    pub fn current(&self) -> Option<MenuId> {
        self.current
    }

    pub fn current_menu(&self) -> Option<&Menu> {
        self.current.and_then(|id| self.tree.get(id).ok())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn status_line(&self) -> StatusLine {
        self.status.clone()
    }

    /// Menus the stack back policy will return through, innermost last.
    pub fn visits(&self) -> &[MenuId] {
        &self.visits
    }

    // ------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------

    pub fn create_menu(&mut self, title: &str) -> Result<MenuId, MenuError> {
        let id = self.tree.insert(title, self.options.layout.clone())?;
        debug!("Created {id} {title:?}");
        Ok(id)
    }

    /// Create a menu that carries its own arguments into every action below it.
    pub fn create_menu_with_args(
        &mut self,
        title: &str,
        args: impl IntoArgs,
    ) -> Result<MenuId, MenuError> {
        let id = self.create_menu(title)?;
        self.tree
            .get_mut(id)?
            .set_base_args(ArgPipeline::from_values(args));
        Ok(id)
    }

    pub fn edit(&mut self, id: MenuId) -> Result<MenuEditor<'_>, MenuError> {
        self.tree.get(id)?;
        Ok(MenuEditor {
            navigator: self,
            id,
        })
    }

    pub fn add_action<Args, H>(&mut self, id: MenuId, label: &str, handler: H) -> Result<(), MenuError>
    where
        Args: FromArgs + 'static,
        H: Handler<Args>,
    {
        self.add_action_with(id, label, handler, ())
    }

    pub fn add_action_with<Args, H>(
        &mut self,
        id: MenuId,
        label: &str,
        handler: H,
        bound: impl IntoArgs,
    ) -> Result<(), MenuError>
    where
        Args: FromArgs + 'static,
        H: Handler<Args>,
    {
        let handle = Dispatch::action(Action::new(handler), ArgPipeline::from_values(bound))?;
        self.tree.get_mut(id)?.push_item(MenuItem::new(label, handle))?;
        debug!("{id}: added action {label:?}");
        Ok(())
    }

    pub fn add_submenu(&mut self, id: MenuId, label: &str, target: MenuId) -> Result<(), MenuError> {
        self.add_submenu_with(id, label, target, ())
    }

    /// Add a transition item and give `target` a back item pointing here.
    pub fn add_submenu_with(
        &mut self,
        id: MenuId,
        label: &str,
        target: MenuId,
        bound: impl IntoArgs,
    ) -> Result<(), MenuError> {
        if id == target {
            return Err(MenuError::SelfTransition(id));
        }
        self.tree.get(id)?;
        let submenu = self.tree.get(target)?;
        if let Some(existing) = submenu.parent().filter(|existing| *existing != id) {
            if self.options.back_policy == BackPolicy::Exclusive {
                return Err(MenuError::AmbiguousBackTarget {
                    target,
                    existing,
                    requested: id,
                });
            }
            debug!("{target} keeps its back item to {existing}; also reachable from {id}");
        }

        let handle = Dispatch::transition(target, ArgPipeline::from_values(bound));
        self.tree.get_mut(id)?.push_item(MenuItem::new(label, handle))?;

        let installed = self.tree.get_mut(target)?.install_back(
            id,
            &self.options.back_label,
            &self.options.back_description,
        )?;
        if installed {
            debug!("{target}: back item now returns to {id}");
        }
        debug!("{id}: added submenu {label:?} -> {target}");
        Ok(())
    }

    pub fn describe(&mut self, id: MenuId, description: &str) -> Result<(), MenuError> {
        self.tree.get_mut(id)?.describe_last(description)
    }

    // ------------------------------------------------------------------
    // Showing and tearing down
    // ------------------------------------------------------------------

    /// Post `id` and make it the only visible menu. Starts a fresh visit path.
    pub fn show(&mut self, id: MenuId) -> Result<(), MenuError> {
        self.tree.get(id)?;
        if let Some(previous) = self.current.filter(|previous| *previous != id)
            && let Ok(menu) = self.tree.get_mut(previous)
        {
            menu.surface_mut().unpost();
        }
        self.tree.get_mut(id)?.surface_mut().post();
        self.current = Some(id);
        self.visits.clear();
        debug!("Showing {id}");
        Ok(())
    }

    pub fn hide(&mut self, id: MenuId) -> Result<(), MenuError> {
        self.tree.get_mut(id)?.surface_mut().unpost();
        if self.current == Some(id) {
            self.current = None;
            self.visits.clear();
        }
        debug!("Hid {id}");
        Ok(())
    }

    pub fn clear_all(&mut self, id: MenuId) -> Result<(), MenuError> {
        self.tree.get_mut(id)?.clear_all()?;
        if self.current == Some(id) {
            self.current = None;
            self.visits.clear();
        }
        debug!("Cleared {id}");
        Ok(())
    }

    /// Clear and drop a menu. Ids pointing at it go stale.
    ///
    /// Submenus whose back item led here lose it; the next parent to link
    /// them installs a new one.
    pub fn destroy_menu(&mut self, id: MenuId) -> Result<(), MenuError> {
        let mut menu = self.tree.remove(id)?;
        menu.clear_all()?;
        if self.current == Some(id) {
            self.current = None;
            self.visits.clear();
        }
        self.visits.retain(|visit| *visit != id);
        for orphan in self.tree.iter_mut().filter(|m| m.parent() == Some(id)) {
            orphan.detach_back()?;
            debug!("{}: back item to destroyed {id} removed", orphan.id());
        }
        debug!("Destroyed {id} {:?}", menu.title());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn handle_event(&mut self, event: NavEvent) -> Result<Flow, MenuError> {
        match event {
            NavEvent::MoveUp | NavEvent::MoveDown | NavEvent::MoveLeft | NavEvent::MoveRight => {
                if let (Some(id), Some(direction)) = (self.current, event.direction()) {
                    self.tree.get_mut(id)?.surface_mut().highlight(direction);
                }
                Ok(Flow::Continue)
            }
            NavEvent::Select => self.select().map(|_| Flow::Continue),
            NavEvent::Back => self.back().map(|_| Flow::Continue),
            NavEvent::Exit => Ok(Flow::Exit),
            NavEvent::Stop => Ok(Flow::Stop),
            NavEvent::Resize => Ok(Flow::Continue),
        }
    }

    /// Execute the highlighted item of the current menu, if any.
    pub fn select(&mut self) -> Result<(), MenuError> {
        let Some(id) = self.current else {
            return Ok(());
        };
        let menu = self.tree.get_mut(id)?;
        let Some(index) = menu.surface().current_selection() else {
            return Ok(());
        };
        let pipeline = menu.pipeline().clone();
        let Some(item) = menu.entry_mut(index) else {
            return Ok(());
        };
        debug!("{id}: selected {:?}", item.label);
        let effect = item.handle_mut().execute(&pipeline)?;
        self.apply(id, effect)
    }

    /// Take the current menu's back transition. A no-op without a back item.
    pub fn back(&mut self) -> Result<(), MenuError> {
        let Some(id) = self.current else {
            return Ok(());
        };
        if !self.tree.get(id)?.has_back() {
            return Ok(());
        }
        self.go_back(id)
    }

    fn apply(&mut self, source: MenuId, effect: Effect) -> Result<(), MenuError> {
        match effect {
            Effect::Stay => Ok(()),
            Effect::Enter { target, carried } => self.enter(source, target, carried),
            Effect::Back => self.go_back(source),
        }
    }

    fn enter(&mut self, source: MenuId, target: MenuId, carried: ArgPipeline) -> Result<(), MenuError> {
        // Resolve the target before touching the source so a stale target
        // leaves the source on screen.
        self.tree.get(target)?;
        self.tree.get_mut(source)?.surface_mut().unpost();

        let menu = self.tree.get_mut(target)?;
        menu.enter_with(carried);
        menu.surface_mut().post();
        if self.options.back_policy == BackPolicy::Stack {
            self.visits.push(source);
        }
        self.current = Some(target);
        debug!("Entered {target} from {source}");
        Ok(())
    }

    fn go_back(&mut self, from: MenuId) -> Result<(), MenuError> {
        let recorded = self.tree.get(from)?.parent();
        let from_stack = match self.options.back_policy {
            BackPolicy::Stack => self.visits.last().copied(),
            _ => None,
        };
        let target = from_stack
            .or(recorded)
            .ok_or(MenuError::NoBackTarget(from))?;
        self.tree.get(target)?;

        if from_stack.is_some() {
            self.visits.pop();
        }
        self.tree.get_mut(from)?.surface_mut().unpost();
        self.tree.get_mut(target)?.surface_mut().post();
        self.current = Some(target);
        debug!("Back from {from} to {target}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Loop
    // ------------------------------------------------------------------

    /// Drive the navigator from `frontend` until a stop or exit.
    ///
    /// Errors from individual events are logged and shown on the status line;
    /// only frontend I/O errors end the loop early.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> io::Result<RunOutcome> {
        self.state = LoopState::Running;
        info!("Navigator loop running");
        let outcome = self.drive(frontend);
        self.state = LoopState::Idle;
        self.stop.reset();
        match &outcome {
            Ok(result) => info!("Navigator loop finished: {result:?}"),
            Err(e) => warn!("Navigator loop failed: {e}"),
        }
        outcome
    }

    fn drive<F: Frontend>(&mut self, frontend: &mut F) -> io::Result<RunOutcome> {
        // An error message stays up until the next event that succeeds,
        // unless an action has replaced it by then.
        let mut shown_error: Option<String> = None;
        loop {
            let status = self.status.get();
            frontend.render(&Screen {
                menu: self.current_menu(),
                status: &status,
            })?;

            if self.stop.is_requested() {
                self.state = LoopState::Stopping;
                return Ok(RunOutcome::Stopped);
            }

            let Some(event) = frontend.next_event(&self.stop)? else {
                continue;
            };
            debug!("Event: {event}");

            let result = self.handle_event(event);
            if result.is_ok()
                && let Some(message) = shown_error.take()
                && self.status.get() == message
            {
                self.status.clear();
            }
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => self.stop.request(),
                Ok(Flow::Exit) => return Ok(RunOutcome::Exit),
                Err(e) => {
                    warn!("{event} failed: {e}");
                    let message = e.to_string();
                    self.status.set(message.clone());
                    shown_error = Some(message);
                }
            }
        }
    }
}

/// Chainable access to one menu.
///
/// ```rust,ignore
/// navigator
///     .edit(main)?
///     .action("Item 1", test)?
///     .submenu("Submenu", sub)?;
/// ```
pub struct MenuEditor<'a> {
    navigator: &'a mut Navigator,
    id: MenuId,
}

impl MenuEditor<'_> {
    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn action<Args, H>(&mut self, label: &str, handler: H) -> Result<&mut Self, MenuError>
    where
        Args: FromArgs + 'static,
        H: Handler<Args>,
    {
        self.navigator.add_action(self.id, label, handler)?;
        Ok(self)
    }

    pub fn action_with<Args, H>(
        &mut self,
        label: &str,
        handler: H,
        bound: impl IntoArgs,
    ) -> Result<&mut Self, MenuError>
    where
        Args: FromArgs + 'static,
        H: Handler<Args>,
    {
        self.navigator.add_action_with(self.id, label, handler, bound)?;
        Ok(self)
    }

    pub fn submenu(&mut self, label: &str, target: MenuId) -> Result<&mut Self, MenuError> {
        self.navigator.add_submenu(self.id, label, target)?;
        Ok(self)
    }

    pub fn submenu_with(
        &mut self,
        label: &str,
        target: MenuId,
        bound: impl IntoArgs,
    ) -> Result<&mut Self, MenuError> {
        self.navigator.add_submenu_with(self.id, label, target, bound)?;
        Ok(self)
    }

    /// Describe the item added last.
    pub fn describe(&mut self, description: &str) -> Result<&mut Self, MenuError> {
        self.navigator.describe(self.id, description)?;
        Ok(self)
    }
}
