//! Vtrelay Console
//!
//! Translates the recognized subset of ANSI/VT100 escape sequences into
//! operations on a [`Surface`](vtrelay_core::Surface) that does not
//! understand ANSI natively. Text outside sequences passes through
//! verbatim; malformed, unsupported, or reserved sequences are absorbed
//! silently. Correctness here means "never crashes, never corrupts
//! unrelated output", not "rejects bad input".
//!
//! Supported sequences:
//! - CSI A/B/C/D (cursor up/down/right/left)
//! - CSI E/F (cursor to column 0, n lines down/up)
//! - CSI G (cursor to column), CSI H and f (cursor to row/column)
//! - CSI J (erase in display), CSI K (erase in line)
//! - CSI m (SGR, 16-color palette only)

pub mod console;
pub mod interp;

pub use console::{write_surface, Console};
pub use interp::interpret;
