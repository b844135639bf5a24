//! Error types for pad and refresh operations

use thiserror::Error;

/// Pad/refresh error type
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Backing cell storage could not be allocated. No partially built
    /// window or buffer escapes when this is returned.
    #[error("cell buffer allocation failed")]
    Allocation,

    /// Requested subpad bounds exceed the parent pad's extent
    #[error(
        "subpad {nlines}x{ncols} at ({begin_y}, {begin_x}) \
         exceeds parent extent {parent_rows}x{parent_cols}"
    )]
    Containment {
        nlines: usize,
        ncols: usize,
        begin_y: usize,
        begin_x: usize,
        parent_rows: usize,
        parent_cols: usize,
    },

    /// A rectangle with inverted corners, zero extent, or corners outside
    /// the virtual screen
    #[error("empty, inverted, or out-of-screen rectangle")]
    BadRectangle,

    /// Operation requires a pad or subpad
    #[error("operation requires a pad or subpad")]
    WrongKind,

    /// The physical screen writer reported a device failure
    #[error("physical screen commit failed")]
    Device,
}

/// Result type for pad operations
pub type Result<T> = std::result::Result<T, Error>;
