//! Cell buffer - rectangular grid of display cells
//!
//! A `CellBuffer` is the backing storage of a window. A root pad owns its
//! buffer; subpads share the same buffer through `Rc<RefCell<...>>` and
//! address it with a row/column origin offset, so an edit through either
//! handle is visible through the other.
//!
//! Allocation goes row by row with `try_reserve_exact`; a mid-allocation
//! failure drops everything built so far and reports `Error::Allocation`,
//! so no partial buffer is ever observable.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{Error, Result};

/// A rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBuffer {
    /// Rows of cells (row 0 is top); every row has exactly `cols` cells
    rows: Vec<Vec<Cell>>,
    /// Number of columns
    cols: usize,
}

impl CellBuffer {
    /// Allocate a buffer of `nlines` x `ncols`, every cell set to `blank`
    ///
    /// Zero dimensions are rejected with `BadRectangle`; an allocation
    /// failure on any row rolls back and reports `Allocation`.
    pub fn try_new(nlines: usize, ncols: usize, blank: Cell) -> Result<Self> {
        if nlines == 0 || ncols == 0 {
            return Err(Error::BadRectangle);
        }

        let mut rows = Vec::new();
        rows.try_reserve_exact(nlines).map_err(|_| Error::Allocation)?;

        for _ in 0..nlines {
            let mut row = Vec::new();
            row.try_reserve_exact(ncols).map_err(|_| Error::Allocation)?;
            row.resize(ncols, blank);
            rows.push(row);
        }

        Ok(Self { rows, cols: ncols })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get a cell, `None` if out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Store a cell; out-of-bounds stores are ignored
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// A span of `len` cells in `row` starting at `col`
    ///
    /// `None` if the span does not lie entirely inside the buffer.
    pub fn span(&self, row: usize, col: usize, len: usize) -> Option<&[Cell]> {
        self.rows.get(row)?.get(col..col.checked_add(len)?)
    }

    /// Overwrite a span of cells in `row` starting at `col`
    ///
    /// Out-of-bounds spans are ignored.
    pub fn write_span(&mut self, row: usize, col: usize, cells: &[Cell]) {
        let Some(end) = col.checked_add(cells.len()) else {
            return;
        };
        if let Some(dst) = self.rows.get_mut(row).and_then(|r| r.get_mut(col..end)) {
            dst.copy_from_slice(cells);
        }
    }

    /// Fill a span of cells in `row` with `cell`
    pub fn fill_span(&mut self, row: usize, col: usize, len: usize, cell: Cell) {
        let Some(end) = col.checked_add(len) else {
            return;
        };
        if let Some(dst) = self.rows.get_mut(row).and_then(|r| r.get_mut(col..end)) {
            dst.fill(cell);
        }
    }

    /// Copy `len` cells from row `src_row` at `col` into row `dst_row` at
    /// the same column. Used when a window scrolls inside its extent.
    pub fn copy_row_span(&mut self, src_row: usize, dst_row: usize, col: usize, len: usize) {
        if src_row == dst_row {
            return;
        }
        let Some(end) = col.checked_add(len) else {
            return;
        };
        let hi = src_row.max(dst_row);
        if hi >= self.rows.len() {
            return;
        }
        let (head, tail) = self.rows.split_at_mut(hi);
        let (src, dst) = if src_row < dst_row {
            (&head[src_row], &mut tail[0])
        } else {
            (&tail[0], &mut head[dst_row])
        };
        if let (Some(s), Some(d)) = (src.get(col..end), dst.get_mut(col..end)) {
            d.copy_from_slice(s);
        }
    }
}
