//! # Surfaces
//!
//! The renderable side of a menu: its entries laid out in a grid of
//! `rows x columns` cells, the highlighted entry, the scroll offset and
//! whether the surface is currently posted (on screen).
//!
//! Entries fill the grid row by row:
//!
//! ```text
//! columns = 2
//! ┌──────────┬──────────┐
//! │ 0 Item 1 │ 1 Item 2 │   row 0
//! │ 2 Sub    │ 3 Back   │   row 1
//! └──────────┴──────────┘
//! ```
//!
//! A surface is never edited in place. Menus build a fresh one from their
//! entries after every mutation and swap it in, so the renderer only ever
//! sees complete item lists.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::error::MenuError;

pub const DEFAULT_ROWS: u16 = 4;
pub const DEFAULT_COLUMNS: u16 = 2;
pub const DEFAULT_WIDTH: u16 = 75;
pub const DEFAULT_HEIGHT: u16 = 10;
pub const DEFAULT_ORIGIN: u16 = 4;
pub const DEFAULT_MARK: &str = " * ";

/// Grid format and window geometry shared by every surface of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SurfaceLayout {
    /// Visible grid rows; longer menus scroll.
    pub rows: u16,
    pub columns: u16,
    pub width: u16,
    pub height: u16,
    pub x: u16,
    pub y: u16,
    /// Drawn in front of the highlighted entry.
    pub mark: String,
    pub show_descriptions: bool,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: DEFAULT_ORIGIN,
            y: DEFAULT_ORIGIN,
            mark: DEFAULT_MARK.to_string(),
            show_descriptions: false,
        }
    }
}

impl SurfaceLayout {
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(MenuError::Construction(format!(
                "grid must have at least one row and column (got {}x{})",
                self.rows, self.columns
            )));
        }
        // Two border cells on each axis leave nothing to draw into below 3.
        if self.width < 3 || self.height < 3 {
            return Err(MenuError::Construction(format!(
                "window {}x{} is too small",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceEntry {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Surface {
    entries: Vec<SurfaceEntry>,
    layout: SurfaceLayout,
    highlighted: Option<usize>,
    top_row: usize,
    posted: bool,
}

impl Surface {
    pub fn build(entries: Vec<SurfaceEntry>, layout: SurfaceLayout) -> Result<Self, MenuError> {
        layout.validate()?;
        let highlighted = if entries.is_empty() { None } else { Some(0) };
        Ok(Self {
            entries,
            layout,
            highlighted,
            top_row: 0,
            posted: false,
        })
    }

    /// Build the replacement for this surface after its menu changed.
    ///
    /// The posted flag carries over and the highlight stays on the same index
    /// when it still exists.
    pub fn rebuild(&self, entries: Vec<SurfaceEntry>) -> Result<Self, MenuError> {
        let mut next = Surface::build(entries, self.layout.clone())?;
        next.posted = self.posted;
        if let (Some(old), Some(_)) = (self.highlighted, next.highlighted) {
            next.highlighted = Some(old.min(next.entries.len() - 1));
            next.top_row = self.top_row;
            next.scroll_to_highlight();
        }
        Ok(next)
    }

    pub fn post(&mut self) {
        self.posted = true;
    }

    pub fn unpost(&mut self) {
        self.posted = false;
    }

    pub fn is_posted(&self) -> bool {
        self.posted
    }

    pub fn entries(&self) -> &[SurfaceEntry] {
        &self.entries
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the highlighted entry, if any.
    pub fn current_selection(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// Grid position (row, column) of an entry.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let columns = self.columns();
        (index / columns, index % columns)
    }

    /// Entry indices that fall inside the visible rows.
    pub fn visible_range(&self) -> Range<usize> {
        let columns = self.columns();
        let start = (self.top_row * columns).min(self.entries.len());
        let end = ((self.top_row + self.layout.rows as usize) * columns).min(self.entries.len());
        start..end
    }

    /// Move the highlight one cell. Returns `false` at the grid edge or when
    /// there is nothing to highlight.
    pub fn highlight(&mut self, direction: Direction) -> bool {
        let Some(current) = self.highlighted else {
            return false;
        };
        let columns = self.columns();
        let len = self.entries.len();
        let (row, column) = self.cell(current);

        let next = match direction {
            Direction::Up if row > 0 => Some(current - columns),
            Direction::Down if (row + 1) * columns < len => Some((current + columns).min(len - 1)),
            Direction::Left if column > 0 => Some(current - 1),
            Direction::Right if column + 1 < columns && current + 1 < len => Some(current + 1),
            _ => None,
        };

        match next {
            Some(index) => {
                self.highlighted = Some(index);
                self.scroll_to_highlight();
                true
            }
            None => false,
        }
    }

    fn columns(&self) -> usize {
        self.layout.columns as usize
    }

    fn scroll_to_highlight(&mut self) {
        let Some(index) = self.highlighted else {
            self.top_row = 0;
            return;
        };
        let row = index / self.columns();
        let rows = self.layout.rows as usize;
        if row < self.top_row {
            self.top_row = row;
        } else if row >= self.top_row + rows {
            self.top_row = row + 1 - rows;
        }
    }
}
