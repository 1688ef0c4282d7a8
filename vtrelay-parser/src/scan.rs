//! Escape sequence scanning
//!
//! Two pure functions split the work so the driving loop can forward text
//! up to an unterminated trailing sequence without consuming it:
//! [`find_head`] locates the next lead-in, [`find_terminator`] the byte
//! that ends the sequence. Neither allocates; both are single linear
//! passes that never look behind their starting offset.

/// The escape lead-in byte.
pub const ESC: u8 = 0x1B;

/// A located sequence header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqHead {
    /// Header code: the byte after ESC, or the C1 byte minus 0x40.
    pub code: u8,
    /// Lead-in length in bytes: 2 for ESC form, 1 for C1 form.
    pub prefix_len: usize,
    /// Offset of the first parameter byte.
    pub params: usize,
}

impl SeqHead {
    /// Offset of the first byte of the lead-in.
    pub fn start(&self) -> usize {
        self.params - self.prefix_len
    }
}

/// A located sequence terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqTerminator {
    /// Terminator code, which also names the requested operation.
    pub code: u8,
    /// Offset of the terminator byte.
    pub index: usize,
}

/// Find the next escape sequence header at or after `from`.
///
/// Recognizes ESC followed by a byte in `[0x40, 0x5F]` (the reported code
/// is that second byte) and a lone byte in `[0x80, 0x9F]` (the reported
/// code is the byte minus 0x40, so 0x9B scans the same as ESC `[`).
/// Returns `None` when the slice runs out first.
pub fn find_head(buf: &[u8], from: usize) -> Option<SeqHead> {
    let mut escaped = false;
    for (i, &byte) in buf.iter().enumerate().skip(from) {
        if escaped && matches!(byte, 0x40..=0x5F) {
            return Some(SeqHead {
                code: byte,
                prefix_len: 2,
                params: i + 1,
            });
        }
        if matches!(byte, 0x80..=0x9F) {
            return Some(SeqHead {
                code: byte - 0x40,
                prefix_len: 1,
                params: i + 1,
            });
        }
        escaped = byte == ESC;
    }
    None
}

/// Find the sequence terminator at or after `from`, which should be the
/// `params` offset of a previously found header.
///
/// The terminator is the first byte in `[0x40, 0x7E]`; it doubles as the
/// sequence's operation code. Returns `None` when the slice runs out
/// first, leaving the trailing sequence unconsumed.
pub fn find_terminator(buf: &[u8], from: usize) -> Option<SeqTerminator> {
    for (i, &byte) in buf.iter().enumerate().skip(from) {
        if matches!(byte, 0x40..=0x7E) {
            return Some(SeqTerminator {
                code: byte,
                index: i,
            });
        }
    }
    None
}
