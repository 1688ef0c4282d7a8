//! Vtrelay Core
//!
//! This crate provides the platform-independent terminal surface model:
//! - Attribute word with independently settable bit groups
//! - Cursor position and window geometry
//! - The `Surface` capability trait consumed by the interpreter
//! - An in-memory surface for headless use and testing
//!
//! This crate has NO platform dependencies and can be used headlessly.

pub mod attr;
pub mod geom;
pub mod mem;
pub mod surface;

pub use attr::AttrWord;
pub use geom::{CursorPos, WindowRect};
pub use mem::{MemInput, MemSurface};
pub use surface::{InputSource, Surface, SurfaceError, SurfaceInfo};
