//! Display context and refresh orchestration
//!
//! `Display` owns the virtual screen, the screen geometry, the active
//! blank cell, and the physical screen writer. Every operation that the
//! classic design routed through process globals is a method here, so
//! independent displays can coexist (and be driven headless in tests).
//!
//! The copy engine clips a pad rectangle onto the virtual screen, unions
//! damage, reconciles the pad's own dirty rows, and remaps the cursor.

use std::rc::Rc;

use crate::cell::{Cell, CellAttributes};
use crate::error::{Error, Result};
use crate::screen::VirtualScreen;
use crate::window::{Viewport, Window};
use crate::Dimensions;

/// The physical-terminal writer
///
/// `commit` reconciles the virtual screen's damaged rows (and its
/// pending-clear flag) with the device. The display clears the damage
/// only after `commit` returns `Ok`, so a failed commit can be retried.
pub trait PhysicalScreen {
    fn commit(&mut self, screen: &VirtualScreen) -> Result<()>;
}

/// Headless operation: drop every frame
impl PhysicalScreen for () {
    fn commit(&mut self, _screen: &VirtualScreen) -> Result<()> {
        Ok(())
    }
}

/// A terminal display: virtual screen plus physical writer
#[derive(Debug)]
pub struct Display<P: PhysicalScreen> {
    dims: Dimensions,
    /// Blank cell used for newly created windows and pads
    blank: Cell,
    screen: VirtualScreen,
    physical: P,
}

impl<P: PhysicalScreen> Display<P> {
    /// Create a display of the given geometry
    pub fn new(dims: Dimensions, physical: P) -> Result<Self> {
        let blank = Cell::default();
        Ok(Self {
            dims,
            blank,
            screen: VirtualScreen::new(dims, blank)?,
            physical,
        })
    }

    /// Screen geometry
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// The blank cell new pads are filled with
    pub fn blank(&self) -> Cell {
        self.blank
    }

    /// Set the attributes carried by the blank cell
    pub fn set_attrs(&mut self, attrs: CellAttributes) {
        self.blank = Cell::blank(attrs);
    }

    /// The virtual screen
    pub fn virtual_screen(&self) -> &VirtualScreen {
        &self.screen
    }

    /// The physical writer
    pub fn physical_mut(&mut self) -> &mut P {
        &mut self.physical
    }

    /// Create a root pad of `nlines` x `ncols`
    ///
    /// Pads may exceed the screen in either dimension; zero dimensions
    /// are rejected with `BadRectangle`.
    pub fn new_pad(&self, nlines: usize, ncols: usize) -> Result<Window> {
        log::trace!("new_pad: {}x{}", nlines, ncols);
        Window::new_pad(nlines, ncols, self.dims, self.blank)
    }

    /// Carve a subpad from `parent` at pad-relative `(begin_y, begin_x)`
    ///
    /// Zero `nlines`/`ncols` default to the parent's remaining extent
    /// minus one. The subpad shares the parent's cell storage.
    pub fn sub_pad(
        &self,
        parent: &Window,
        nlines: usize,
        ncols: usize,
        begin_y: usize,
        begin_x: usize,
    ) -> Result<Window> {
        log::trace!(
            "sub_pad: {}x{} at ({}, {})",
            nlines,
            ncols,
            begin_y,
            begin_x
        );
        parent.subpad(nlines, ncols, begin_y, begin_x, self.dims)
    }

    /// Create an ordinary window on the screen
    pub fn new_window(
        &self,
        nlines: usize,
        ncols: usize,
        begin_y: usize,
        begin_x: usize,
    ) -> Result<Window> {
        log::trace!(
            "new_window: {}x{} at ({}, {})",
            nlines,
            ncols,
            begin_y,
            begin_x
        );
        Window::new_window(nlines, ncols, begin_y, begin_x, self.dims, self.blank)
    }

    /// Copy a pad rectangle onto the virtual screen without flushing
    ///
    /// `(py, px)` is the top-left source cell in the pad;
    /// `(sy1, sx1)`-`(sy2, sx2)` is the inclusive destination rectangle
    /// on the screen. The destination must be ordered and on-screen; the
    /// *source* may run past the pad's extent, in which case the excess
    /// columns are dropped and the excess rows contribute nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn refresh_virtual_only(
        &mut self,
        pad: &mut Window,
        py: usize,
        px: usize,
        sy1: usize,
        sx1: usize,
        sy2: usize,
        sx2: usize,
    ) -> Result<()> {
        log::trace!(
            "refresh_virtual_only: src ({}, {}) dst ({}, {})-({}, {})",
            py,
            px,
            sy1,
            sx1,
            sy2,
            sx2
        );

        if !pad.is_pad() {
            return Err(Error::WrongKind);
        }
        if sy2 < sy1 || sx2 < sx1 {
            return Err(Error::BadRectangle);
        }
        if sy2 >= self.screen.rows() || sx2 >= self.screen.cols() {
            return Err(Error::BadRectangle);
        }

        // Truncate the rectangle to the columns the pad actually has
        // starting at px; excess is silently dropped.
        let num_cols = (sx2 - sx1 + 1).min(pad.cols().saturating_sub(px));

        let (buf_y, buf_x) = pad.buffer_origin();
        let buf = Rc::clone(pad.buffer());
        {
            let src = buf.borrow();
            for sline in sy1..=sy2 {
                let Some(pline) = py.checked_add(sline - sy1) else {
                    break;
                };
                if pline >= pad.rows() {
                    // Source rows are exhausted; the remaining destination
                    // rows keep whatever they already show.
                    break;
                }
                // The whole requested destination range is marked even
                // when the pad supplies fewer columns.
                let cells = src.span(buf_y + pline, buf_x + px, num_cols).unwrap_or(&[]);
                self.screen.stage_span(sline, sx1, sx2, cells);
                // The copy is the act of reconciling this pad row.
                pad.clear_row_damage(pline);
            }
        }

        pad.set_echo_viewport(Viewport {
            pad_row: py,
            pad_col: px,
            screen_top: sy1,
            screen_left: sx1,
            screen_bottom: sy2,
            screen_right: sx2,
        });

        // One-shot: a pending clear on the pad becomes a pending clear on
        // the screen, consumed exactly once.
        if pad.take_clear_pending() {
            self.screen.request_clear();
        }

        if !pad.leave_cursor {
            let (cy, cx) = pad.cursor();
            let in_rows = cy >= py && py.checked_add(sy2 - sy1).is_some_and(|end| cy <= end);
            let in_cols = cx >= px && px.checked_add(sx2 - sx1).is_some_and(|end| cx <= end);
            if in_rows && in_cols {
                self.screen.set_cursor(cy - py + sy1, cx - px + sx1);
            }
        }

        Ok(())
    }

    /// Copy a pad rectangle onto the virtual screen and flush it to the
    /// physical terminal
    #[allow(clippy::too_many_arguments)]
    pub fn refresh(
        &mut self,
        pad: &mut Window,
        py: usize,
        px: usize,
        sy1: usize,
        sx1: usize,
        sy2: usize,
        sx2: usize,
    ) -> Result<()> {
        self.refresh_virtual_only(pad, py, px, sy1, sx1, sy2, sx2)?;
        self.update()
    }

    /// Flush the virtual screen's accumulated damage to the physical
    /// terminal and clear it
    pub fn update(&mut self) -> Result<()> {
        log::trace!("update");
        self.physical.commit(&self.screen)?;
        self.screen.reset_damage();
        Ok(())
    }

    /// Write one cell at the pad's cursor, then refresh through the pad's
    /// cached viewport from its last refresh (or its creation-time
    /// default if it has never been refreshed)
    pub fn echo(&mut self, pad: &mut Window, cell: Cell) -> Result<()> {
        log::trace!("echo: {:?}", cell.ch);
        if !pad.is_pad() {
            return Err(Error::WrongKind);
        }
        pad.write_cell(cell)?;
        let vp = pad.echo_viewport();
        self.refresh(
            pad,
            vp.pad_row,
            vp.pad_col,
            vp.screen_top,
            vp.screen_left,
            vp.screen_bottom,
            vp.screen_right,
        )
    }
}
