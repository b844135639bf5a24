//! Virtual screen - the composited next frame
//!
//! A single buffer holding what the physical terminal should show next.
//! Refresh operations copy window rectangles into it and union their
//! damage into its per-row dirty ranges; an update hands those ranges to
//! the physical screen writer and clears them.

use serde::{Deserialize, Serialize};

use crate::buffer::CellBuffer;
use crate::cell::Cell;
use crate::damage::DirtyRange;
use crate::error::{Error, Result};
use crate::Dimensions;

/// The composited buffer representing the next intended display state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualScreen {
    buf: CellBuffer,
    /// Per-row dirty ranges, accumulated across refreshes until flushed
    damage: Vec<DirtyRange>,
    /// Where the hardware cursor should end up
    cursor: (usize, usize),
    /// One-shot request for a full clear before the next flush
    clear_pending: bool,
}

impl VirtualScreen {
    /// Allocate a virtual screen of the given geometry
    pub fn new(dims: Dimensions, blank: Cell) -> Result<Self> {
        let buf = CellBuffer::try_new(dims.rows, dims.cols, blank)?;
        let mut damage = Vec::new();
        damage
            .try_reserve_exact(dims.rows)
            .map_err(|_| Error::Allocation)?;
        damage.resize(dims.rows, DirtyRange::clean());
        Ok(Self {
            buf,
            damage,
            cursor: (0, 0),
            clear_pending: false,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.buf.rows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.buf.cols()
    }

    /// Read a cell, `None` if out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.buf.cell(row, col)
    }

    /// Where the hardware cursor should end up after the next flush
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
    }

    /// This row's accumulated dirty range
    pub fn row_damage(&self, row: usize) -> Option<DirtyRange> {
        self.damage.get(row).copied()
    }

    /// The damaged span of cells in `row`, if any
    pub fn damaged_span(&self, row: usize) -> Option<(usize, &[Cell])> {
        let (first, last) = self.damage.get(row)?.span()?;
        let cells = self.buf.span(row, first, last - first + 1)?;
        Some((first, cells))
    }

    /// Whether a full clear is pending
    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }

    pub(crate) fn request_clear(&mut self) {
        self.clear_pending = true;
    }

    /// Copy `cells` into `row` starting at `col` and union the columns
    /// `col..=mark_last` into the row's dirty range
    ///
    /// The marked range may exceed the copied span: a refresh marks the
    /// whole requested destination rectangle even where the source pad ran
    /// out of columns.
    pub(crate) fn stage_span(&mut self, row: usize, col: usize, mark_last: usize, cells: &[Cell]) {
        debug_assert!(mark_last < self.cols());
        self.buf.write_span(row, col, cells);
        if let Some(range) = self.damage.get_mut(row) {
            range.mark(col, mark_last);
        }
    }

    /// Clear all dirty ranges and the pending-clear flag; called once the
    /// physical writer has reconciled the screen
    pub(crate) fn reset_damage(&mut self) {
        for range in &mut self.damage {
            range.clear();
        }
        self.clear_pending = false;
    }

    /// Whether any row is damaged or a clear is pending
    pub fn has_damage(&self) -> bool {
        self.clear_pending || self.damage.iter().any(|d| !d.is_clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> VirtualScreen {
        VirtualScreen::new(Dimensions { rows: 4, cols: 10 }, Cell::default()).unwrap()
    }

    #[test]
    fn test_new_screen_is_clean() {
        let scr = screen();
        assert_eq!(scr.rows(), 4);
        assert_eq!(scr.cols(), 10);
        assert!(!scr.has_damage());
        assert_eq!(scr.cursor(), (0, 0));
    }

    #[test]
    fn test_stage_span_unions_damage() {
        let mut scr = screen();
        scr.stage_span(1, 2, 4, &[Cell::new('a'), Cell::new('b'), Cell::new('c')]);
        scr.stage_span(1, 0, 1, &[Cell::new('x'), Cell::new('y')]);
        assert_eq!(scr.row_damage(1).unwrap().span(), Some((0, 4)));
        assert_eq!(scr.cell(1, 0).unwrap().ch, 'x');
        assert_eq!(scr.cell(1, 4).unwrap().ch, 'c');
    }

    #[test]
    fn test_damaged_span() {
        let mut scr = screen();
        scr.stage_span(2, 3, 4, &[Cell::new('h'), Cell::new('i')]);
        let (first, cells) = scr.damaged_span(2).unwrap();
        assert_eq!(first, 3);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].ch, 'h');
        assert!(scr.damaged_span(0).is_none());
    }

    #[test]
    fn test_reset_damage() {
        let mut scr = screen();
        scr.stage_span(0, 0, 9, &[Cell::new('z'); 10]);
        scr.request_clear();
        assert!(scr.has_damage());
        scr.reset_damage();
        assert!(!scr.has_damage());
        assert!(!scr.clear_pending());
        // cells keep their composited values
        assert_eq!(scr.cell(0, 0).unwrap().ch, 'z');
    }
}
