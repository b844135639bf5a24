//! Per-row damage tracking
//!
//! Every row of a window or of the virtual screen carries a dirty range:
//! the inclusive span of columns changed since that row was last
//! reconciled. Merging is always a union so that damage contributed by
//! several windows to the same screen row survives until flushed.

use serde::{Deserialize, Serialize};

/// Dirty span of a single row
///
/// `None` means the row is unchanged since the last flush. A present span
/// `(first, last)` is inclusive on both ends and satisfies `first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirtyRange {
    span: Option<(usize, usize)>,
}

impl DirtyRange {
    /// A clean (unchanged) range
    pub const fn clean() -> Self {
        Self { span: None }
    }

    /// Whether the row is unchanged
    pub fn is_clean(&self) -> bool {
        self.span.is_none()
    }

    /// The current span, if any
    pub fn span(&self) -> Option<(usize, usize)> {
        self.span
    }

    /// Merge the columns `first..=last` into the range (union)
    pub fn mark(&mut self, first: usize, last: usize) {
        debug_assert!(first <= last);
        self.span = Some(match self.span {
            None => (first, last),
            Some((f, l)) => (f.min(first), l.max(last)),
        });
    }

    /// Mark a single column
    pub fn mark_col(&mut self, col: usize) {
        self.mark(col, col);
    }

    /// Reset to clean
    pub fn clear(&mut self) {
        self.span = None;
    }

    /// Return the span and reset to clean
    pub fn take(&mut self) -> Option<(usize, usize)> {
        self.span.take()
    }
}
