//! The Surface capability trait
//!
//! A `Surface` is the abstract display device the interpreter drives: it
//! owns the ambient cursor position and attribute word, and exposes the
//! few mutations escape sequences need. Platform backends wrap a real
//! console API; [`MemSurface`](crate::mem::MemSurface) wraps a cell grid.
//!
//! All operations are synchronous and immediately observable to subsequent
//! calls. The interpreter reads a [`SurfaceInfo`] snapshot once per
//! sequence, computes, and writes once; callers sharing one physical
//! surface between logical streams must serialize access themselves.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attr::AttrWord;
use crate::geom::{CursorPos, WindowRect};

/// Snapshot of a surface's state, read once per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceInfo {
    /// Current cursor position, in buffer coordinates.
    pub cursor: CursorPos,
    /// Buffer width in columns.
    pub width: i32,
    /// Buffer height in rows.
    pub height: i32,
    /// The visible window within the buffer.
    pub window: WindowRect,
    /// Current attribute word.
    pub attrs: AttrWord,
}

/// Failure reported by a surface backend.
///
/// The interpreter never propagates these to the caller; a failed query or
/// mutation silently skips the operation at hand.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("surface state is unavailable")]
    Unavailable,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The abstract display device driven by the interpreter.
pub trait Surface {
    /// Read the current cursor, bounds, and attributes in one snapshot.
    fn info(&mut self) -> Result<SurfaceInfo, SurfaceError>;

    /// Move the cursor.
    fn set_cursor(&mut self, pos: CursorPos) -> Result<(), SurfaceError>;

    /// Fill `count` cells row-major from `start` with `ch` and `attrs`.
    fn fill_region(
        &mut self,
        start: CursorPos,
        count: u32,
        ch: char,
        attrs: AttrWord,
    ) -> Result<(), SurfaceError>;

    /// Replace the active attribute word.
    fn set_attributes(&mut self, attrs: AttrWord) -> Result<(), SurfaceError>;

    /// Forward bytes to the device verbatim. Encoding conversion, if the
    /// device needs any, is the backend's concern.
    fn raw_write(&mut self, bytes: &[u8]) -> Result<(), SurfaceError>;
}

/// Raw terminal input, adjacent to the interpreter but not part of it.
pub trait InputSource {
    /// Read up to `buf.len()` bytes of terminal input.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SurfaceError>;
}
