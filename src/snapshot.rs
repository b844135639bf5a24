//! Screen and window snapshots for testing and debugging
//!
//! Provides a serializable representation of a virtual screen or window:
//! row text plus damage spans, cheap to diff in tests.

use serde::{Deserialize, Serialize};

use crate::screen::VirtualScreen;
use crate::window::Window;

/// A snapshot of a cell grid's visible state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Grid dimensions
    pub rows: usize,
    pub cols: usize,
    /// Cursor position
    pub cursor: (usize, usize),
    /// Text content per row
    pub lines: Vec<String>,
    /// Dirty span per row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub damage: Vec<Option<(usize, usize)>>,
}

impl Snapshot {
    /// Snapshot a virtual screen
    pub fn of_virtual(screen: &VirtualScreen) -> Self {
        let lines = (0..screen.rows())
            .map(|row| {
                (0..screen.cols())
                    .map(|col| screen.cell(row, col).map_or(' ', |c| c.ch))
                    .collect()
            })
            .collect();
        let damage = (0..screen.rows())
            .map(|row| screen.row_damage(row).and_then(|d| d.span()))
            .collect();
        Self {
            rows: screen.rows(),
            cols: screen.cols(),
            cursor: screen.cursor(),
            lines,
            damage,
        }
    }

    /// Snapshot a window or pad
    pub fn of_window(win: &Window) -> Self {
        let lines = (0..win.rows())
            .map(|row| {
                (0..win.cols())
                    .map(|col| win.cell(row, col).map_or(' ', |c| c.ch))
                    .collect()
            })
            .collect();
        let damage = (0..win.rows())
            .map(|row| win.row_damage(row).and_then(|d| d.span()))
            .collect();
        Self {
            rows: win.rows(),
            cols: win.cols(),
            cursor: win.cursor(),
            lines,
            damage,
        }
    }

    /// Row text with trailing blanks trimmed
    pub fn trimmed_line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", |l| l.trim_end())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::Dimensions;

    #[test]
    fn test_window_snapshot() {
        let mut pad =
            Window::new_pad(3, 8, Dimensions { rows: 24, cols: 80 }, Cell::default()).unwrap();
        pad.set_cell(1, 0, Cell::new('h'));
        pad.set_cell(1, 1, Cell::new('i'));

        let snap = Snapshot::of_window(&pad);
        assert_eq!(snap.rows, 3);
        assert_eq!(snap.trimmed_line(1), "hi");
        assert_eq!(snap.damage[1], Some((0, 1)));
        assert_eq!(snap.damage[0], None);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let pad =
            Window::new_pad(2, 4, Dimensions { rows: 24, cols: 80 }, Cell::default()).unwrap();
        let snap = Snapshot::of_window(&pad);
        let json = snap.to_json().unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
