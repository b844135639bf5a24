//! Window, pad, and subpad hierarchy
//!
//! A `Window` is a rectangular view with a cursor, per-row damage, and a
//! cell buffer. Ordinary windows and root pads own their buffer; a subpad
//! is carved out of a pad and addresses the *same* buffer through a shared
//! handle plus a row/column origin, so writes through either handle are
//! visible through the other. Damage, however, is tracked per window: a
//! write through a subpad does not mark the parent's rows (callers that
//! mix handles on the same region call [`Window::touch`] before
//! refreshing, as with classic curses subpads).
//!
//! Sharing the buffer through `Rc` means a subpad keeps the storage alive
//! even if its parent is dropped first, so the use-after-free hazard of the
//! classic aliased-row-pointer design cannot occur here.

use std::cell::{Cell as FlagCell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::buffer::CellBuffer;
use crate::cell::{Cell, CellAttributes};
use crate::damage::DirtyRange;
use crate::error::{Error, Result};
use crate::Dimensions;

/// Window kind, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowKind {
    /// A window bounded by the physical screen
    Ordinary,
    /// A pad: arbitrarily large, shown only through explicit viewports
    Pad,
    /// A pad-like view sharing an ancestor pad's storage
    Subpad,
}

/// Viewport from the most recent successful refresh of a pad, reused by
/// [`crate::Display::echo`] so repeated single-cell echoes stay cheap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left source row in the pad
    pub pad_row: usize,
    /// Top-left source column in the pad
    pub pad_col: usize,
    /// Destination rectangle on the screen, inclusive corners
    pub screen_top: usize,
    pub screen_left: usize,
    pub screen_bottom: usize,
    pub screen_right: usize,
}

/// A window, pad, or subpad
#[derive(Debug, Clone)]
pub struct Window {
    kind: WindowKind,
    /// Position in the parent's coordinate space: screen space for
    /// ordinary windows, parent-pad space for subpads, unused for pads
    begin_y: usize,
    begin_x: usize,
    /// Extent, fixed for the life of the window
    rows: usize,
    cols: usize,
    /// Cursor position, window-relative
    cur_y: usize,
    cur_x: usize,
    /// Cell storage; subpads share an ancestor's buffer
    buf: Rc<RefCell<CellBuffer>>,
    /// This window's origin inside `buf`
    buf_y: usize,
    buf_x: usize,
    /// Per-row damage, columns window-relative
    damage: Vec<DirtyRange>,
    /// Attributes applied to blanks written by this window
    attrs: CellAttributes,
    /// Do not move the hardware cursor during refresh
    pub leave_cursor: bool,
    /// Scroll on writes past the bottom-right corner
    pub auto_scroll: bool,
    /// Reads on this window do not block (bookkeeping only; input
    /// handling lives outside this crate, but subpads inherit the flag)
    pub non_blocking_reads: bool,
    /// Translate function keys on input (bookkeeping, as above)
    pub keypad_translation: bool,
    /// One-shot request to clear the whole screen on the next refresh.
    /// Shared across a pad family so a request on an ancestor is picked
    /// up by whichever member refreshes next.
    clear_pending: Rc<FlagCell<bool>>,
    /// Echo viewport memo
    echo_viewport: Viewport,
}

impl Window {
    /// Create a root pad of `nlines` x `ncols`
    ///
    /// `screen` is the current screen geometry, used only to seed the
    /// default echo viewport; `blank` fills every cell.
    pub(crate) fn new_pad(
        nlines: usize,
        ncols: usize,
        screen: Dimensions,
        blank: Cell,
    ) -> Result<Self> {
        let buf = CellBuffer::try_new(nlines, ncols, blank)?;

        let mut damage = Vec::new();
        damage
            .try_reserve_exact(nlines)
            .map_err(|_| Error::Allocation)?;
        damage.resize(nlines, DirtyRange::clean());

        Ok(Self {
            kind: WindowKind::Pad,
            begin_y: 0,
            begin_x: 0,
            rows: nlines,
            cols: ncols,
            cur_y: 0,
            cur_x: 0,
            buf: Rc::new(RefCell::new(buf)),
            buf_y: 0,
            buf_x: 0,
            damage,
            attrs: blank.attrs,
            leave_cursor: false,
            auto_scroll: false,
            non_blocking_reads: false,
            keypad_translation: false,
            clear_pending: Rc::new(FlagCell::new(false)),
            echo_viewport: default_viewport(nlines, ncols, screen),
        })
    }

    /// Create an ordinary window of `nlines` x `ncols` at screen position
    /// `(begin_y, begin_x)`; must fit on the screen
    pub(crate) fn new_window(
        nlines: usize,
        ncols: usize,
        begin_y: usize,
        begin_x: usize,
        screen: Dimensions,
        blank: Cell,
    ) -> Result<Self> {
        if nlines == 0 || ncols == 0 {
            return Err(Error::BadRectangle);
        }
        if !fits(begin_y, nlines, screen.rows) || !fits(begin_x, ncols, screen.cols) {
            return Err(Error::Containment {
                nlines,
                ncols,
                begin_y,
                begin_x,
                parent_rows: screen.rows,
                parent_cols: screen.cols,
            });
        }

        let mut win = Self::new_pad(nlines, ncols, screen, blank)?;
        win.kind = WindowKind::Ordinary;
        win.begin_y = begin_y;
        win.begin_x = begin_x;
        Ok(win)
    }

    /// Carve a subpad out of this pad
    ///
    /// `(begin_y, begin_x)` is relative to this pad. A zero `nlines` or
    /// `ncols` defaults to the remaining extent minus one (one cell short
    /// of the far edge); a dimension that is still zero after defaulting
    /// is rejected. The subpad shares this pad's cell storage and inherits
    /// its attributes and flags by one-time copy.
    pub(crate) fn subpad(
        &self,
        nlines: usize,
        ncols: usize,
        begin_y: usize,
        begin_x: usize,
        screen: Dimensions,
    ) -> Result<Self> {
        if !self.is_pad() {
            return Err(Error::WrongKind);
        }

        let containment_err = Error::Containment {
            nlines,
            ncols,
            begin_y,
            begin_x,
            parent_rows: self.rows,
            parent_cols: self.cols,
        };

        if begin_y >= self.rows || begin_x >= self.cols {
            return Err(containment_err);
        }

        let nlines = if nlines == 0 {
            self.rows - 1 - begin_y
        } else {
            nlines
        };
        let ncols = if ncols == 0 {
            self.cols - 1 - begin_x
        } else {
            ncols
        };

        if nlines == 0 || ncols == 0 {
            return Err(Error::BadRectangle);
        }
        if !fits(begin_y, nlines, self.rows) || !fits(begin_x, ncols, self.cols) {
            return Err(containment_err);
        }

        let mut damage = Vec::new();
        damage
            .try_reserve_exact(nlines)
            .map_err(|_| Error::Allocation)?;
        damage.resize(nlines, DirtyRange::clean());

        Ok(Self {
            kind: WindowKind::Subpad,
            begin_y,
            begin_x,
            rows: nlines,
            cols: ncols,
            cur_y: 0,
            cur_x: 0,
            buf: Rc::clone(&self.buf),
            buf_y: self.buf_y + begin_y,
            buf_x: self.buf_x + begin_x,
            damage,
            attrs: self.attrs,
            leave_cursor: self.leave_cursor,
            auto_scroll: self.auto_scroll,
            non_blocking_reads: self.non_blocking_reads,
            keypad_translation: self.keypad_translation,
            clear_pending: Rc::clone(&self.clear_pending),
            echo_viewport: default_viewport(nlines, ncols, screen),
        })
    }

    /// Window kind
    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    /// Whether this window is a pad or subpad
    pub fn is_pad(&self) -> bool {
        matches!(self.kind, WindowKind::Pad | WindowKind::Subpad)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Position in the parent's coordinate space
    pub fn begin(&self) -> (usize, usize) {
        (self.begin_y, self.begin_x)
    }

    /// Cursor position, window-relative
    pub fn cursor(&self) -> (usize, usize) {
        (self.cur_y, self.cur_x)
    }

    /// Move the cursor, clamping to the window's extent
    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.cur_y = row.min(self.rows - 1);
        self.cur_x = col.min(self.cols - 1);
    }

    /// Attributes applied to blanks written by this window
    pub fn attrs(&self) -> CellAttributes {
        self.attrs
    }

    /// Set the active attributes
    pub fn set_attrs(&mut self, attrs: CellAttributes) {
        self.attrs = attrs;
    }

    /// Read a cell, `None` if out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buf.borrow().cell(self.buf_y + row, self.buf_x + col)
    }

    /// Store a cell at a window-relative position, marking that row's
    /// damage. Out-of-bounds stores are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        self.buf
            .borrow_mut()
            .set_cell(self.buf_y + row, self.buf_x + col, cell);
        self.damage[row].mark_col(col);
    }

    /// Write a cell at the cursor and advance it
    ///
    /// The cursor wraps to the next row at the right edge. At the
    /// bottom-right corner the window scrolls up one row when
    /// `auto_scroll` is set, otherwise the cursor stays put.
    pub fn write_cell(&mut self, cell: Cell) -> Result<()> {
        let (y, x) = (self.cur_y, self.cur_x);
        self.set_cell(y, x, cell);

        if x + 1 < self.cols {
            self.cur_x = x + 1;
        } else if y + 1 < self.rows {
            self.cur_y = y + 1;
            self.cur_x = 0;
        } else if self.auto_scroll {
            self.scroll_up(1);
            self.cur_x = 0;
        }
        // bottom-right without auto_scroll: cursor stays

        Ok(())
    }

    /// Scroll the window's extent up by `n` rows, filling the bottom with
    /// blanks in the active attributes. All rows are marked damaged.
    pub fn scroll_up(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let n = n.min(self.rows);
        let blank = Cell::blank(self.attrs);
        {
            let mut buf = self.buf.borrow_mut();
            for row in 0..self.rows - n {
                buf.copy_row_span(
                    self.buf_y + row + n,
                    self.buf_y + row,
                    self.buf_x,
                    self.cols,
                );
            }
            for row in self.rows - n..self.rows {
                buf.fill_span(self.buf_y + row, self.buf_x, self.cols, blank);
            }
        }
        self.touch();
    }

    /// Mark every row fully damaged, forcing the next refresh to copy the
    /// whole extent. Needed after writes through an overlapping handle.
    pub fn touch(&mut self) {
        let last = self.cols - 1;
        for range in &mut self.damage {
            range.mark(0, last);
        }
    }

    /// Fill the window with blanks in the active attributes
    pub fn erase(&mut self) {
        let blank = Cell::blank(self.attrs);
        {
            let mut buf = self.buf.borrow_mut();
            for row in 0..self.rows {
                buf.fill_span(self.buf_y + row, self.buf_x, self.cols, blank);
            }
        }
        self.touch();
        self.cur_y = 0;
        self.cur_x = 0;
    }

    /// Request a full screen clear on the next refresh of this window
    pub fn request_clear(&mut self) {
        self.clear_pending.set(true);
    }

    /// Consume the pending clear request, if any
    pub(crate) fn take_clear_pending(&mut self) -> bool {
        self.clear_pending.replace(false)
    }

    /// This row's dirty range
    pub fn row_damage(&self, row: usize) -> Option<DirtyRange> {
        self.damage.get(row).copied()
    }

    pub(crate) fn clear_row_damage(&mut self, row: usize) {
        if let Some(range) = self.damage.get_mut(row) {
            range.clear();
        }
    }

    pub(crate) fn buffer(&self) -> &Rc<RefCell<CellBuffer>> {
        &self.buf
    }

    pub(crate) fn buffer_origin(&self) -> (usize, usize) {
        (self.buf_y, self.buf_x)
    }

    /// The viewport `echo` will reuse
    pub fn echo_viewport(&self) -> Viewport {
        self.echo_viewport
    }

    pub(crate) fn set_echo_viewport(&mut self, viewport: Viewport) {
        self.echo_viewport = viewport;
    }
}

/// Whether `begin + extent` stays inside `bound` without overflowing
fn fits(begin: usize, extent: usize, bound: usize) -> bool {
    begin
        .checked_add(extent)
        .is_some_and(|end| end <= bound)
}

/// Creation-time echo viewport: the pad's top-left corner mapped onto as
/// much of the screen as both extents allow
fn default_viewport(nlines: usize, ncols: usize, screen: Dimensions) -> Viewport {
    Viewport {
        pad_row: 0,
        pad_col: 0,
        screen_top: 0,
        screen_left: 0,
        screen_bottom: screen.rows.min(nlines) - 1,
        screen_right: screen.cols.min(ncols) - 1,
    }
}
