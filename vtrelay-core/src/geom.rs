//! Cursor and window geometry
//!
//! Positions are signed: boundary arithmetic in the interpreter routinely
//! passes through negative intermediates before clamping, so the types here
//! do not pretend otherwise. Row 0 is the top of the buffer.

use serde::{Deserialize, Serialize};

/// A cursor position in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorPos {
    pub row: i32,
    pub col: i32,
}

impl CursorPos {
    pub const fn new(row: i32, col: i32) -> Self {
        CursorPos { row, col }
    }
}

/// The visible window of a surface, in buffer coordinates.
///
/// The window is usually smaller than the buffer; `bottom` and `right` are
/// inclusive, matching the console conventions the surface backends wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowRect {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl WindowRect {
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        WindowRect {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Number of visible rows.
    pub const fn rows(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Number of visible columns.
    pub const fn cols(&self) -> i32 {
        self.right - self.left + 1
    }
}
