//! Vtrelay Parser
//!
//! This crate locates escape sequences in a byte stream and parses their
//! numeric parameters. It is the side-effect-free half of the translator:
//!
//! - Stateless: every function takes a slice and an offset, nothing is
//!   buffered between calls
//! - Total: arbitrary input never panics; unrecognized bytes are simply
//!   not matched
//! - Meaning-free: what a recognized sequence *does* is the interpreter's
//!   concern, not this crate's
//!
//! Recognized lead-ins:
//! - ESC (0x1B) followed by a byte in `[0x40, 0x5F]`
//! - a single pre-combined C1 byte in `[0x80, 0x9F]`

pub mod params;
pub mod scan;

pub use scan::{SeqHead, SeqTerminator};
