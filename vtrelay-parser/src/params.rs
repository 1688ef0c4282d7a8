//! Numeric parameter parsing
//!
//! Parameters sit between a sequence's header and its terminator as
//! `;`-separated decimal fields. The grammar cannot produce a negative
//! number: a minus sign anywhere would itself have terminated the
//! sequence. Parsing is strict: a field must be all digits, end to end,
//! or the sequence it belongs to is invalid. How an absent field defaults
//! is per-operation and decided by the interpreter.

use log::trace;

/// The parameter separator byte.
pub const SEPARATOR: u8 = b';';

/// Strictly parse one decimal field.
///
/// Returns `None` for an empty field or any non-digit byte. Values
/// saturate at `u32::MAX` rather than wrap.
pub fn parse_field(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            trace!("rejecting parameter field with non-digit byte 0x{:02X}", byte);
            return None;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(byte - b'0'));
    }
    Some(value)
}

/// Iterate the `;`-separated fields of a parameter body.
///
/// An empty body yields a single empty field, so callers that allow a
/// wholly omitted parameter list must check for that case first.
pub fn fields(body: &[u8]) -> impl Iterator<Item = &[u8]> {
    body.split(|&byte| byte == SEPARATOR)
}
