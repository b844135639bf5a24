//! Termpad - character-cell pad compositing with damage-tracked refresh
//!
//! This crate provides the window/pad hierarchy and refresh engine of a
//! character-cell display library:
//! - Pads: off-screen cell grids of arbitrary size
//! - Subpads: views that share a parent pad's storage
//! - A virtual screen that pad rectangles are composited onto, with
//!   per-row dirty ranges accumulated until flushed
//! - A pluggable physical screen writer that receives only the damaged
//!   spans
//!
//! The library is single-threaded by design: buffers are shared between
//! pad handles with `Rc`, and nothing here is `Send`. It is also
//! deterministic: given the same sequence of operations, it always
//! produces the same screen state.
//!
//! ```
//! use termpad::{Cell, Dimensions, Display};
//!
//! let mut display = Display::new(Dimensions { rows: 24, cols: 80 }, ())?;
//! let mut pad = display.new_pad(100, 200)?;
//! pad.set_cell(0, 0, Cell::new('@'));
//! // show pad rows 0..=23, columns 0..=79 on the whole screen
//! display.refresh(&mut pad, 0, 0, 0, 0, 23, 79)?;
//! # Ok::<(), termpad::Error>(())
//! ```

mod buffer;
mod cell;
mod damage;
mod display;
mod error;
mod screen;
mod snapshot;
mod window;

pub use buffer::CellBuffer;
pub use cell::{Cell, CellAttributes};
pub use damage::DirtyRange;
pub use display::{Display, PhysicalScreen};
pub use error::{Error, Result};
pub use screen::VirtualScreen;
pub use snapshot::Snapshot;
pub use window::{Viewport, Window, WindowKind};

use serde::{Deserialize, Serialize};

/// Screen dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}
