//! # Menu Tree
//!
//! Arena owning every menu. Menus are addressed by [`MenuId`], an index plus
//! the generation of the slot it was issued for. Destroying a menu bumps the
//! slot generation, so old ids stop resolving instead of pointing at
//! whatever menu reuses the slot.

use std::fmt;

use crate::core::error::MenuError;
use crate::core::menu::Menu;
use crate::core::surface::SurfaceLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId {
    index: u32,
    generation: u32,
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    menu: Option<Menu>,
}

#[derive(Debug, Default)]
pub struct MenuTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: &str, layout: SurfaceLayout) -> Result<MenuId, MenuError> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = MenuId {
            index,
            generation: slot.generation,
        };
        match Menu::new(id, title, layout) {
            Ok(menu) => {
                slot.menu = Some(menu);
                Ok(id)
            }
            Err(e) => {
                self.free.push(index);
                Err(e)
            }
        }
    }

    /// Take the menu out of the arena; its items and handles drop with it.
    pub fn remove(&mut self, id: MenuId) -> Result<Menu, MenuError> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(MenuError::StaleMenu(id))?;
        let menu = slot.menu.take().ok_or(MenuError::StaleMenu(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Ok(menu)
    }

    pub fn get(&self, id: MenuId) -> Result<&Menu, MenuError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.menu.as_ref())
            .ok_or(MenuError::StaleMenu(id))
    }

    pub fn get_mut(&mut self, id: MenuId) -> Result<&mut Menu, MenuError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.menu.as_mut())
            .ok_or(MenuError::StaleMenu(id))
    }

    pub fn contains(&self, id: MenuId) -> bool {
        self.get(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.menu.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Menu> {
        self.slots.iter().filter_map(|slot| slot.menu.as_ref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Menu> {
        self.slots.iter_mut().filter_map(|slot| slot.menu.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_layout;

    #[test]
    fn test_insert_and_get() {
        let mut tree = MenuTree::new();
        let id = tree.insert("Main", test_layout()).unwrap();
        assert_eq!(tree.get(id).unwrap().title(), "Main");
        assert_eq!(tree.get(id).unwrap().id(), id);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_removed_id_goes_stale_even_after_slot_reuse() {
        let mut tree = MenuTree::new();
        let old = tree.insert("Old", test_layout()).unwrap();
        tree.remove(old).unwrap();

        let new = tree.insert("New", test_layout()).unwrap();
        assert_ne!(old, new);
        assert_eq!(tree.get(old).unwrap_err(), MenuError::StaleMenu(old));
        assert_eq!(tree.get(new).unwrap().title(), "New");
        assert!(tree.remove(old).is_err());
    }

    #[test]
    fn test_failed_insert_releases_slot() {
        let mut tree = MenuTree::new();
        let bad = SurfaceLayout {
            columns: 0,
            ..test_layout()
        };
        assert!(matches!(
            tree.insert("Bad", bad),
            Err(MenuError::Construction(_))
        ));
        assert!(tree.is_empty());

        tree.insert("Good", test_layout()).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_menu_id_display() {
        let mut tree = MenuTree::new();
        let id = tree.insert("Main", test_layout()).unwrap();
        assert_eq!(id.to_string(), "menu#0.0");
    }
}
