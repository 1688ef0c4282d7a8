//! In-memory surface
//!
//! A cell-grid implementation of [`Surface`] with no platform dependencies.
//! It backs headless callers and makes the interpreter testable without a
//! real console: fills land in an inspectable grid, raw writes accumulate
//! in an output log.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::attr::AttrWord;
use crate::geom::{CursorPos, WindowRect};
use crate::surface::{InputSource, Surface, SurfaceError, SurfaceInfo};

/// A single cell of the in-memory grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    pub attrs: AttrWord,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            attrs: AttrWord::default_text(),
        }
    }
}

/// An in-memory terminal surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemSurface {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    cursor: CursorPos,
    window: WindowRect,
    attrs: AttrWord,
    output: Vec<u8>,
}

impl MemSurface {
    /// Create a surface whose window covers the whole buffer.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_window(width, height, WindowRect::new(0, height - 1, 0, width - 1))
    }

    /// Create a surface with an explicit visible window, for backends whose
    /// buffer is taller than the view (scrollback).
    pub fn with_window(width: i32, height: i32, window: WindowRect) -> Self {
        assert!(width > 0 && height > 0, "surface must not be empty");
        MemSurface {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            cursor: CursorPos::default(),
            window,
            attrs: AttrWord::default_text(),
            output: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cursor(&self) -> CursorPos {
        self.cursor
    }

    pub fn attrs(&self) -> AttrWord {
        self.attrs
    }

    /// Get a cell. Panics if out of bounds.
    pub fn cell(&self, row: i32, col: i32) -> &Cell {
        assert!(row >= 0 && row < self.height && col >= 0 && col < self.width);
        &self.cells[(row * self.width + col) as usize]
    }

    /// Bytes forwarded verbatim so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Drain the raw output log.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl Surface for MemSurface {
    fn info(&mut self) -> Result<SurfaceInfo, SurfaceError> {
        Ok(SurfaceInfo {
            cursor: self.cursor,
            width: self.width,
            height: self.height,
            window: self.window,
            attrs: self.attrs,
        })
    }

    fn set_cursor(&mut self, pos: CursorPos) -> Result<(), SurfaceError> {
        // Stored as given: the interpreter clamps to [0, extent], and the
        // one-past-the-edge position is representable on real consoles too.
        self.cursor = pos;
        Ok(())
    }

    fn fill_region(
        &mut self,
        start: CursorPos,
        count: u32,
        ch: char,
        attrs: AttrWord,
    ) -> Result<(), SurfaceError> {
        let begin = start.row as i64 * self.width as i64 + start.col as i64;
        let end = self.cells.len() as i64;
        for i in 0..count as i64 {
            let idx = begin + i;
            if idx < 0 {
                continue;
            }
            if idx >= end {
                trace!("fill clipped at buffer end after {} cells", i);
                break;
            }
            self.cells[idx as usize] = Cell { ch, attrs };
        }
        Ok(())
    }

    fn set_attributes(&mut self, attrs: AttrWord) -> Result<(), SurfaceError> {
        self.attrs = attrs;
        Ok(())
    }

    fn raw_write(&mut self, bytes: &[u8]) -> Result<(), SurfaceError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}

/// Queued-byte input source for tests and headless callers.
#[derive(Debug, Clone, Default)]
pub struct MemInput {
    data: Vec<u8>,
    pos: usize,
}

impl MemInput {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        MemInput {
            data: data.into(),
            pos: 0,
        }
    }
}

impl InputSource for MemInput {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SurfaceError> {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}
