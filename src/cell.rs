//! Display cell representation
//!
//! Each cell holds one character plus its render attributes. The compositing
//! and refresh engine treats cells as atomic values copied by assignment;
//! wide-character handling and color are deliberately not modeled here.

use serde::{Deserialize, Serialize};

/// Attributes that affect how a cell is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellAttributes {
    /// Bold text
    pub bold: bool,
    /// Underlined text
    pub underline: bool,
    /// Inverse/reverse video
    pub reverse: bool,
}

impl CellAttributes {
    /// Create new default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all attributes to default
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A single cell in a display grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The character stored in this cell
    pub ch: char,
    /// Display attributes
    pub attrs: CellAttributes,
}

impl Cell {
    /// Create a cell with a character and default attributes
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            attrs: CellAttributes::default(),
        }
    }

    /// Create a cell with a character and explicit attributes
    pub fn with_attrs(ch: char, attrs: CellAttributes) -> Self {
        Self { ch, attrs }
    }

    /// The blank cell for the given active attributes
    pub fn blank(attrs: CellAttributes) -> Self {
        Self { ch: ' ', attrs }
    }

    /// Check if the cell shows a space
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ')
    }
}
