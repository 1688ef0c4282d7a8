//! Console entry points
//!
//! The driving loop: scan for the next escape sequence, forward the text
//! run before it verbatim, interpret the sequence, resume after its
//! terminator. A trailing sequence whose terminator has not arrived yet
//! is dropped along with everything after it, not buffered for the next
//! call; the text before its lead-in is still flushed. `write` therefore
//! always reports the whole input as consumed.

use log::{debug, trace};
use vtrelay_core::{InputSource, Surface, SurfaceError};
use vtrelay_parser::scan;

/// Translate escapes in `bytes` against `surface`, forwarding the rest.
pub fn write_surface<S: Surface>(surface: &mut S, bytes: &[u8]) {
    let mut read = 0;
    loop {
        let Some(head) = scan::find_head(bytes, read) else {
            // No more sequences: flush everything that is left.
            flush(surface, &bytes[read..]);
            return;
        };
        let Some(term) = scan::find_terminator(bytes, head.params) else {
            // Incomplete trailing sequence: flush the text before the
            // lead-in, drop the sequence bytes. They are not carried
            // over to the next call.
            trace!(
                "dropping unterminated trailing sequence of {} bytes",
                bytes.len() - head.start()
            );
            flush(surface, &bytes[read..head.start()]);
            return;
        };
        flush(surface, &bytes[read..head.start()]);
        crate::interp::interpret(surface, head.code, term.code, &bytes[head.params..term.index]);
        read = term.index + 1;
    }
}

fn flush<S: Surface>(surface: &mut S, text: &[u8]) {
    if text.is_empty() {
        return;
    }
    if let Err(err) = surface.raw_write(text) {
        debug!("surface rejected raw write of {} bytes: {err}", text.len());
    }
}

/// A console: one surface per logical output stream, plus raw input.
///
/// The two surfaces may wrap the same physical device; if they do, the
/// caller serializes `write` calls, as the core takes no locks.
#[derive(Debug)]
pub struct Console<S: Surface, I: InputSource> {
    out: S,
    err: S,
    input: I,
}

impl<S: Surface, I: InputSource> Console<S, I> {
    pub fn new(out: S, err: S, input: I) -> Self {
        Console { out, err, input }
    }

    /// Write `bytes` to the standard or error stream, translating escape
    /// sequences. Always reports the full input as consumed, even when an
    /// unterminated trailing sequence was dropped.
    pub fn write(&mut self, is_error_stream: bool, bytes: &[u8]) -> usize {
        let surface = if is_error_stream {
            &mut self.err
        } else {
            &mut self.out
        };
        write_surface(surface, bytes);
        bytes.len()
    }

    /// Read raw terminal input. Adjacent to the interpreter, not part of
    /// it: no escape handling happens here.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, SurfaceError> {
        self.input.read(buf)
    }

    pub fn out(&self) -> &S {
        &self.out
    }

    pub fn err(&self) -> &S {
        &self.err
    }

    pub fn into_parts(self) -> (S, S, I) {
        (self.out, self.err, self.input)
    }
}
