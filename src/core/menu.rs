//! # Menus
//!
//! A menu is an ordered list of items plus an optional back item that always
//! stays last. Each item pairs a label and description with the
//! [`Dispatch`] handle it owns.
//!
//! ```text
//! Menu
//! ├── items: Vec<MenuItem>          // caller-added, in insertion order
//! ├── back: Option<MenuItem>        // installed once, rendered last
//! ├── parent: Option<MenuId>        // recorded back target
//! ├── base_args: ArgPipeline        // the menu's own arguments
//! ├── pipeline: ArgPipeline         // carried-in args ++ base_args
//! └── surface: Surface              // rebuilt after every mutation
//! ```
//!
//! Menus are created and mutated through the navigator, which owns the tree
//! they live in. Nothing here reaches across to another menu.

use log::warn;

use crate::core::args::ArgPipeline;
use crate::core::dispatch::Dispatch;
use crate::core::error::MenuError;
use crate::core::surface::{Surface, SurfaceEntry, SurfaceLayout};
use crate::core::tree::MenuId;

#[derive(Debug)]
pub struct MenuItem {
    pub label: String,
    pub description: String,
    handle: Dispatch,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, handle: Dispatch) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            handle,
        }
    }

    pub fn handle(&self) -> &Dispatch {
        &self.handle
    }

    pub(crate) fn handle_mut(&mut self) -> &mut Dispatch {
        &mut self.handle
    }
}

#[derive(Debug)]
pub struct Menu {
    id: MenuId,
    title: String,
    items: Vec<MenuItem>,
    back: Option<MenuItem>,
    parent: Option<MenuId>,
    base_args: ArgPipeline,
    pipeline: ArgPipeline,
    surface: Surface,
}

impl Menu {
    pub(crate) fn new(id: MenuId, title: impl Into<String>, layout: SurfaceLayout) -> Result<Self, MenuError> {
        Ok(Self {
            id,
            title: title.into(),
            items: Vec::new(),
            back: None,
            parent: None,
            base_args: ArgPipeline::new(),
            pipeline: ArgPipeline::new(),
            surface: Surface::build(Vec::new(), layout)?,
        })
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Caller-added items, without the back item.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Every selectable entry: the items followed by the back item.
    pub fn entries(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().chain(self.back.as_ref())
    }

    pub fn entry_count(&self) -> usize {
        self.items.len() + usize::from(self.back.is_some())
    }

    pub fn has_back(&self) -> bool {
        self.back.is_some()
    }

    pub fn back_item(&self) -> Option<&MenuItem> {
        self.back.as_ref()
    }

    /// The parent recorded by the first back-item install.
    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub fn pipeline(&self) -> &ArgPipeline {
        &self.pipeline
    }

    pub fn base_args(&self) -> &ArgPipeline {
        &self.base_args
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn is_shown(&self) -> bool {
        self.surface.is_posted()
    }

    pub(crate) fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Append an item in front of the back item.
    pub(crate) fn push_item(&mut self, item: MenuItem) -> Result<(), MenuError> {
        if item.label.trim().is_empty() {
            return Err(MenuError::EmptyLabel);
        }
        if self.entries().any(|existing| existing.label == item.label) {
            warn!("{} already has an item labelled {:?}", self.id, item.label);
        }
        self.items.push(item);
        self.rebuild_surface()
    }

    /// Set the description of the most recently added item.
    pub(crate) fn describe_last(&mut self, description: impl Into<String>) -> Result<(), MenuError> {
        if let Some(item) = self.items.last_mut() {
            item.description = description.into();
            self.rebuild_surface()?;
        }
        Ok(())
    }

    /// Install the back item. Returns `false` when one is already present.
    pub(crate) fn install_back(
        &mut self,
        parent: MenuId,
        label: &str,
        description: &str,
    ) -> Result<bool, MenuError> {
        if self.back.is_some() {
            return Ok(false);
        }
        let mut item = MenuItem::new(label, Dispatch::Back);
        item.description = description.to_string();
        self.back = Some(item);
        self.parent = Some(parent);
        self.rebuild_surface()?;
        Ok(true)
    }

    /// Drop the back item and the recorded parent, keeping the other items.
    /// The next parent to link this menu installs a fresh one.
    pub(crate) fn detach_back(&mut self) -> Result<(), MenuError> {
        self.back = None;
        self.parent = None;
        self.rebuild_surface()
    }

    /// Drop every item, including the back item, and unpost.
    pub(crate) fn clear_all(&mut self) -> Result<(), MenuError> {
        self.items.clear();
        self.back = None;
        self.parent = None;
        self.rebuild_surface()?;
        self.surface.unpost();
        Ok(())
    }

    pub(crate) fn set_base_args(&mut self, args: ArgPipeline) {
        self.pipeline = args.clone();
        self.base_args = args;
    }

    /// Reset the pipeline for a fresh visit: carried-in values, then the
    /// menu's own.
    pub(crate) fn enter_with(&mut self, carried: ArgPipeline) {
        self.pipeline = carried.concat(&self.base_args);
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut MenuItem> {
        let count = self.items.len();
        if index < count {
            self.items.get_mut(index)
        } else if index == count {
            self.back.as_mut()
        } else {
            None
        }
    }

    fn rebuild_surface(&mut self) -> Result<(), MenuError> {
        let entries = self
            .entries()
            .map(|item| SurfaceEntry {
                label: item.label.clone(),
                description: item.description.clone(),
            })
            .collect();
        self.surface = self.surface.rebuild(entries)?;
        Ok(())
    }
}
