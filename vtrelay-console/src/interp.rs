//! Sequence interpreter
//!
//! Translates one recognized (header, terminator, parameter-body) triple
//! into a surface operation. Dispatch goes through a closed [`CsiOp`]
//! table; anything outside it is absorbed without touching the surface.
//! A parameter that fails the strict decimal parse drops the whole
//! operation (for SGR: the remaining fields), again without error.
//!
//! Every operation reads one [`SurfaceInfo`] snapshot, computes against
//! it, and writes back once. Boundary arithmetic mirrors classic console
//! semantics: cursor rows clamp to `[0, height]` and columns to
//! `[0, width]`, with the one-past-the-edge value allowed.

use log::{debug, trace};
use vtrelay_core::{AttrWord, CursorPos, Surface, SurfaceError, SurfaceInfo};
use vtrelay_parser::params;

/// The closed set of recognized operations, keyed by (header, terminator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsiOp {
    /// `[A` — cursor up
    Up,
    /// `[B` — cursor down
    Down,
    /// `[C` — cursor right
    Forward,
    /// `[D` — cursor left
    Back,
    /// `[E` — column 0, n lines down
    NextLine,
    /// `[F` — column 0, n lines up
    PrevLine,
    /// `[G` — cursor to 1-based column
    Column,
    /// `[H` and `[f` — cursor to 1-based row and column
    Position,
    /// `[J` — erase in display
    EraseDisplay,
    /// `[K` — erase in line
    EraseLine,
    /// `[m` — select graphic rendition
    SelectGraphic,
}

impl CsiOp {
    fn from_codes(head: u8, term: u8) -> Option<CsiOp> {
        if head != b'[' {
            return None;
        }
        match term {
            b'A' => Some(CsiOp::Up),
            b'B' => Some(CsiOp::Down),
            b'C' => Some(CsiOp::Forward),
            b'D' => Some(CsiOp::Back),
            b'E' => Some(CsiOp::NextLine),
            b'F' => Some(CsiOp::PrevLine),
            b'G' => Some(CsiOp::Column),
            b'H' | b'f' => Some(CsiOp::Position),
            b'J' => Some(CsiOp::EraseDisplay),
            b'K' => Some(CsiOp::EraseLine),
            b'm' => Some(CsiOp::SelectGraphic),
            _ => None,
        }
    }
}

/// Interpret one recognized escape sequence against `surface`.
///
/// `body` is the parameter bytes between the lead-in and the terminator.
/// Unsupported pairs, malformed parameters, and surface failures all
/// degrade to doing nothing.
pub fn interpret<S: Surface>(surface: &mut S, head: u8, term: u8, body: &[u8]) {
    let Some(op) = CsiOp::from_codes(head, term) else {
        trace!(
            "ignoring unsupported sequence 0x{:02X} 0x{:02X}",
            head,
            term
        );
        return;
    };

    let info = match surface.info() {
        Ok(info) => info,
        Err(err) => {
            debug!("surface state unavailable, skipping sequence: {err}");
            return;
        }
    };

    let result = match op {
        CsiOp::Up => move_vertical(surface, &info, body, true, false),
        CsiOp::Down => move_vertical(surface, &info, body, false, false),
        CsiOp::NextLine => move_vertical(surface, &info, body, false, true),
        CsiOp::PrevLine => move_vertical(surface, &info, body, true, true),
        CsiOp::Forward => move_horizontal(surface, &info, body, false),
        CsiOp::Back => move_horizontal(surface, &info, body, true),
        CsiOp::Column => move_to_column(surface, &info, body),
        CsiOp::Position => move_to_position(surface, &info, body),
        CsiOp::EraseDisplay => erase_display(surface, &info, body),
        CsiOp::EraseLine => erase_line(surface, &info, body),
        CsiOp::SelectGraphic => select_graphic(surface, &info, body),
    };

    if let Err(err) = result {
        debug!("surface rejected {:?}: {err}", op);
    }
}

/// Parse the single optional parameter of a cursor or erase code.
/// Returns `None` when the body is present but does not parse.
fn count_param(body: &[u8], default: i64) -> Option<i64> {
    if body.is_empty() {
        Some(default)
    } else {
        params::parse_field(body).map(i64::from)
    }
}

fn move_vertical<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
    up: bool,
    to_column_zero: bool,
) -> Result<(), SurfaceError> {
    let Some(n) = count_param(body, 1) else {
        return Ok(());
    };
    let mut pos = info.cursor;
    if to_column_zero {
        pos.col = 0;
    }
    let row = i64::from(info.cursor.row);
    pos.row = if up {
        // Stop at the topmost boundary.
        if row > n {
            (row - n) as i32
        } else {
            0
        }
    } else {
        // Stop at the bottommost boundary.
        if i64::from(info.height) - row > n {
            (row + n) as i32
        } else {
            info.height
        }
    };
    surface.set_cursor(pos)
}

fn move_horizontal<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
    back: bool,
) -> Result<(), SurfaceError> {
    let Some(n) = count_param(body, 1) else {
        return Ok(());
    };
    let mut pos = info.cursor;
    let col = i64::from(info.cursor.col);
    pos.col = if back {
        // Stop at the leftmost boundary.
        if col > n {
            (col - n) as i32
        } else {
            0
        }
    } else {
        // Stop at the rightmost boundary.
        if i64::from(info.width) - col > n {
            (col + n) as i32
        } else {
            info.width
        }
    };
    surface.set_cursor(pos)
}

fn move_to_column<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
) -> Result<(), SurfaceError> {
    let Some(n) = count_param(body, 1) else {
        return Ok(());
    };
    let n = n - 1;
    let col = if n < 0 {
        0
    } else if n > i64::from(info.width) {
        info.width
    } else {
        n as i32
    };
    surface.set_cursor(CursorPos::new(info.cursor.row, col))
}

fn move_to_position<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
) -> Result<(), SurfaceError> {
    let (n1, n2) = if body.is_empty() {
        // Both parameters omitted and set to 1 by default.
        (1, 1)
    } else if let Some(split) = body.iter().position(|&b| b == params::SEPARATOR) {
        // Both parameters present, the first ends at the separator.
        let Some(row) = params::parse_field(&body[..split]) else {
            return Ok(());
        };
        let Some(col) = params::parse_field(&body[split + 1..]) else {
            return Ok(());
        };
        (i64::from(row), i64::from(col))
    } else {
        // Only the first parameter is given.
        let Some(row) = params::parse_field(body) else {
            return Ok(());
        };
        (i64::from(row), 1)
    };

    // The parameters are 1-based and relative to the visible window
    // origin, which sits below any scrollback in the buffer.
    let row = n1 - 1 + i64::from(info.window.top);
    let col = n2 - 1 + i64::from(info.window.left);
    let row = row.clamp(0, i64::from(info.height)) as i32;
    let col = col.clamp(0, i64::from(info.width)) as i32;
    surface.set_cursor(CursorPos::new(row, col))
}

fn erase_display<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
) -> Result<(), SurfaceError> {
    // One of the few codes whose parameter defaults to zero.
    let Some(n) = count_param(body, 0) else {
        return Ok(());
    };
    let width = i64::from(info.width);
    let cursor = info.cursor;
    let window = info.window;

    // The cursor is not necessarily inside the window; modes 0 and 1 are
    // no-ops when it sits on the wrong side of it.
    let (start, cells, rows) = match n {
        0 => (
            cursor,
            width - i64::from(cursor.col),
            i64::from(window.bottom) - i64::from(cursor.row),
        ),
        1 => (
            CursorPos::new(window.top, 0),
            i64::from(cursor.col) + 1,
            i64::from(cursor.row) - i64::from(window.top),
        ),
        2 => (
            CursorPos::new(window.top, window.left),
            0,
            i64::from(window.rows()),
        ),
        _ => (CursorPos::new(0, 0), 0, i64::from(info.height)),
    };
    if rows < 0 {
        return Ok(());
    }
    fill_blank(surface, start, cells + rows * width, info.attrs)
}

fn erase_line<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
) -> Result<(), SurfaceError> {
    let Some(n) = count_param(body, 0) else {
        return Ok(());
    };
    let cursor = info.cursor;
    let (start, cells) = match n {
        // From the cursor to the end of the line.
        0 => (cursor, i64::from(info.width) - i64::from(cursor.col)),
        // From the start of the line through the cursor.
        1 => (CursorPos::new(cursor.row, 0), i64::from(cursor.col) + 1),
        // The entire line.
        _ => (CursorPos::new(cursor.row, 0), i64::from(info.width)),
    };
    fill_blank(surface, start, cells, info.attrs)
}

fn fill_blank<S: Surface>(
    surface: &mut S,
    start: CursorPos,
    cells: i64,
    attrs: AttrWord,
) -> Result<(), SurfaceError> {
    let cells = cells.clamp(0, i64::from(u32::MAX)) as u32;
    surface.fill_region(start, cells, ' ', attrs)
}

fn select_graphic<S: Surface>(
    surface: &mut S,
    info: &SurfaceInfo,
    body: &[u8],
) -> Result<(), SurfaceError> {
    let mut add: u16 = 0;
    let mut remove: u16 = 0;

    if body.is_empty() {
        // No parameters: reset the surface outright.
        add = AttrWord::FG_MASK;
        remove = AttrWord::REMOVE_ALL;
    } else {
        for field in params::fields(body) {
            let Some(code) = params::parse_field(field) else {
                debug!("malformed SGR field, applying sequence so far");
                break;
            };
            match code {
                0 => {
                    // Reset.
                    add |= AttrWord::FG_MASK;
                    remove = AttrWord::REMOVE_ALL;
                }
                1 => add |= AttrWord::BOLD,
                4 => add |= AttrWord::UNDERLINE,
                5 => add |= AttrWord::BLINK,
                7 => add |= AttrWord::REVERSE,
                22 => {
                    add &= !AttrWord::BOLD;
                    remove |= AttrWord::BOLD;
                }
                24 => {
                    add &= !AttrWord::UNDERLINE;
                    remove |= AttrWord::UNDERLINE;
                }
                25 => {
                    add &= !AttrWord::BLINK;
                    remove |= AttrWord::BLINK;
                }
                27 => {
                    add &= !AttrWord::REVERSE;
                    remove |= AttrWord::REVERSE;
                }
                30..=37 => {
                    // A later foreground wins over an earlier one in the
                    // same sequence.
                    add = (add & !AttrWord::FG_MASK) | AttrWord::fg_bits((code - 30) as u16);
                    remove |= AttrWord::FG_MASK;
                }
                38 | 48 => {
                    // Extended color; the remaining fields belong to it
                    // and cannot be told apart, so bail out.
                    debug!("extended color SGR {code} unsupported, applying sequence so far");
                    break;
                }
                39 => {
                    // Reset foreground to full grey.
                    add |= AttrWord::FG_MASK;
                    remove |= AttrWord::FG_MASK;
                }
                40..=47 => {
                    add = (add & !AttrWord::BG_MASK) | AttrWord::bg_bits((code - 40) as u16);
                    remove |= AttrWord::BG_MASK;
                }
                49 => {
                    // Reset background to black.
                    add &= !AttrWord::BG_MASK;
                    remove |= AttrWord::BG_MASK;
                }
                other => {
                    debug!("unrecognized SGR code {other}, applying sequence so far");
                    break;
                }
            }
        }
    }

    surface.set_attributes(AttrWord::merged(info.attrs, add, remove))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtrelay_core::{MemSurface, WindowRect};

    fn surface() -> MemSurface {
        MemSurface::new(80, 25)
    }

    fn place(surface: &mut MemSurface, row: i32, col: i32) {
        surface.set_cursor(CursorPos::new(row, col)).unwrap();
    }

    #[test]
    fn test_cursor_up_defaults_to_one() {
        let mut s = surface();
        place(&mut s, 10, 4);
        interpret(&mut s, b'[', b'A', b"");
        assert_eq!(s.cursor(), CursorPos::new(9, 4));
    }

    #[test]
    fn test_cursor_up_clamps_at_top() {
        let mut s = surface();
        place(&mut s, 3, 0);
        interpret(&mut s, b'[', b'A', b"10");
        assert_eq!(s.cursor(), CursorPos::new(0, 0));
    }

    #[test]
    fn test_cursor_down_clamps_at_buffer_height() {
        let mut s = surface();
        place(&mut s, 20, 7);
        interpret(&mut s, b'[', b'B', b"99");
        assert_eq!(s.cursor(), CursorPos::new(25, 7));
    }

    #[test]
    fn test_cursor_forward_and_back() {
        let mut s = surface();
        place(&mut s, 0, 10);
        interpret(&mut s, b'[', b'C', b"5");
        assert_eq!(s.cursor(), CursorPos::new(0, 15));
        interpret(&mut s, b'[', b'D', b"");
        assert_eq!(s.cursor(), CursorPos::new(0, 14));
        interpret(&mut s, b'[', b'D', b"200");
        assert_eq!(s.cursor(), CursorPos::new(0, 0));
    }

    #[test]
    fn test_next_and_prev_line_reset_column() {
        let mut s = surface();
        place(&mut s, 10, 33);
        interpret(&mut s, b'[', b'E', b"2");
        assert_eq!(s.cursor(), CursorPos::new(12, 0));
        place(&mut s, 10, 33);
        interpret(&mut s, b'[', b'F', b"");
        assert_eq!(s.cursor(), CursorPos::new(9, 0));
    }

    #[test]
    fn test_column_is_one_based_and_clamped() {
        let mut s = surface();
        place(&mut s, 5, 0);
        interpret(&mut s, b'[', b'G', b"10");
        assert_eq!(s.cursor(), CursorPos::new(5, 9));
        interpret(&mut s, b'[', b'G', b"");
        assert_eq!(s.cursor(), CursorPos::new(5, 0));
        interpret(&mut s, b'[', b'G', b"500");
        assert_eq!(s.cursor(), CursorPos::new(5, 80));
    }

    #[test]
    fn test_position_defaults_to_window_origin() {
        let mut s = MemSurface::with_window(80, 100, WindowRect::new(75, 99, 0, 79));
        interpret(&mut s, b'[', b'H', b"");
        assert_eq!(s.cursor(), CursorPos::new(75, 0));
    }

    #[test]
    fn test_position_offsets_by_window_origin() {
        let mut s = MemSurface::with_window(80, 100, WindowRect::new(75, 99, 0, 79));
        interpret(&mut s, b'[', b'H', b"3;11");
        assert_eq!(s.cursor(), CursorPos::new(77, 10));
        // The f terminator is an alias.
        interpret(&mut s, b'[', b'f', b"1;1");
        assert_eq!(s.cursor(), CursorPos::new(75, 0));
    }

    #[test]
    fn test_position_single_parameter() {
        let mut s = surface();
        interpret(&mut s, b'[', b'H', b"7");
        assert_eq!(s.cursor(), CursorPos::new(6, 0));
    }

    #[test]
    fn test_position_empty_second_field_is_malformed() {
        let mut s = surface();
        place(&mut s, 13, 17);
        interpret(&mut s, b'[', b'H', b"1;");
        assert_eq!(s.cursor(), CursorPos::new(13, 17));
        interpret(&mut s, b'[', b'H', b";1");
        assert_eq!(s.cursor(), CursorPos::new(13, 17));
    }

    #[test]
    fn test_erase_display_whole_buffer() {
        let mut s = surface();
        place(&mut s, 5, 5);
        interpret(&mut s, b'[', b'J', b"9");
        for row in 0..25 {
            assert_eq!(s.cell(row, 79).ch, ' ');
        }
    }

    #[test]
    fn test_erase_display_from_cursor_stops_at_window_bottom() {
        let mut s = MemSurface::with_window(10, 30, WindowRect::new(20, 29, 0, 9));
        // Scribble on the row after the window bottom.
        s.fill_region(CursorPos::new(20, 0), 100, 'x', AttrWord::default_text())
            .unwrap();
        place(&mut s, 25, 4);
        interpret(&mut s, b'[', b'J', b"");
        assert_eq!(s.cell(25, 3).ch, 'x');
        assert_eq!(s.cell(25, 4).ch, ' ');
        assert_eq!(s.cell(29, 9).ch, ' ');
    }

    #[test]
    fn test_erase_display_noop_when_cursor_below_window() {
        let mut s = MemSurface::with_window(10, 30, WindowRect::new(0, 9, 0, 9));
        s.fill_region(CursorPos::new(0, 0), 300, 'x', AttrWord::default_text())
            .unwrap();
        place(&mut s, 15, 0);
        interpret(&mut s, b'[', b'J', b"0");
        assert_eq!(s.cell(0, 0).ch, 'x');
        assert_eq!(s.cell(9, 9).ch, 'x');
    }

    #[test]
    fn test_erase_display_above_cursor() {
        let mut s = surface();
        s.fill_region(CursorPos::new(0, 0), 80 * 25, 'x', AttrWord::default_text())
            .unwrap();
        place(&mut s, 2, 10);
        interpret(&mut s, b'[', b'J', b"1");
        assert_eq!(s.cell(0, 0).ch, ' ');
        assert_eq!(s.cell(2, 10).ch, ' ');
        assert_eq!(s.cell(2, 11).ch, 'x');
        assert_eq!(s.cell(3, 0).ch, 'x');
    }

    #[test]
    fn test_erase_line_variants() {
        let mut s = surface();
        s.fill_region(CursorPos::new(4, 0), 80, 'x', AttrWord::default_text())
            .unwrap();
        place(&mut s, 4, 10);
        interpret(&mut s, b'[', b'K', b"");
        assert_eq!(s.cell(4, 9).ch, 'x');
        assert_eq!(s.cell(4, 10).ch, ' ');
        assert_eq!(s.cell(4, 79).ch, ' ');

        s.fill_region(CursorPos::new(4, 0), 80, 'x', AttrWord::default_text())
            .unwrap();
        interpret(&mut s, b'[', b'K', b"1");
        assert_eq!(s.cell(4, 0).ch, ' ');
        assert_eq!(s.cell(4, 10).ch, ' ');
        assert_eq!(s.cell(4, 11).ch, 'x');

        s.fill_region(CursorPos::new(4, 0), 80, 'x', AttrWord::default_text())
            .unwrap();
        interpret(&mut s, b'[', b'K', b"2");
        assert_eq!(s.cell(4, 0).ch, ' ');
        assert_eq!(s.cell(4, 79).ch, ' ');
    }

    #[test]
    fn test_erase_fills_with_current_attributes() {
        let mut s = surface();
        let attrs = AttrWord::new(AttrWord::FG_RED | AttrWord::BG_BLUE);
        s.set_attributes(attrs).unwrap();
        place(&mut s, 0, 0);
        interpret(&mut s, b'[', b'K', b"2");
        assert_eq!(s.cell(0, 40).attrs, attrs);
    }

    #[test]
    fn test_sgr_empty_resets() {
        let mut s = surface();
        s.set_attributes(AttrWord::new(AttrWord::BOLD | AttrWord::BG_GREEN))
            .unwrap();
        interpret(&mut s, b'[', b'm', b"");
        assert_eq!(s.attrs(), AttrWord::default_text());
    }

    #[test]
    fn test_sgr_preserves_unrelated_groups() {
        let mut s = surface();
        s.set_attributes(AttrWord::new(AttrWord::BG_BLUE | AttrWord::UNDERLINE))
            .unwrap();
        interpret(&mut s, b'[', b'm', b"1;31");
        assert_eq!(
            s.attrs().bits(),
            AttrWord::BOLD | AttrWord::FG_RED | AttrWord::BG_BLUE | AttrWord::UNDERLINE
        );
    }

    #[test]
    fn test_sgr_later_color_wins() {
        let mut s = surface();
        interpret(&mut s, b'[', b'm', b"31;34");
        assert_eq!(s.attrs().bits(), AttrWord::FG_BLUE);
    }

    #[test]
    fn test_sgr_off_codes() {
        let mut s = surface();
        s.set_attributes(AttrWord::new(
            AttrWord::BOLD | AttrWord::UNDERLINE | AttrWord::BLINK | AttrWord::REVERSE,
        ))
        .unwrap();
        interpret(&mut s, b'[', b'm', b"22;24");
        assert_eq!(s.attrs().bits(), AttrWord::BLINK | AttrWord::REVERSE);
        interpret(&mut s, b'[', b'm', b"25;27");
        assert!(s.attrs().is_empty());
    }

    #[test]
    fn test_sgr_extended_color_aborts_rest() {
        let mut s = surface();
        interpret(&mut s, b'[', b'm', b"1;38;5;196;4");
        // Bold was accumulated before the bail-out; 4 never applied.
        assert_eq!(
            s.attrs().bits(),
            AttrWord::BOLD | AttrWord::FG_MASK
        );
    }

    #[test]
    fn test_sgr_unrecognized_code_aborts_rest() {
        let mut s = surface();
        s.set_attributes(AttrWord::empty()).unwrap();
        interpret(&mut s, b'[', b'm', b"4;99;31");
        assert_eq!(s.attrs().bits(), AttrWord::UNDERLINE);
    }

    #[test]
    fn test_sgr_color_resets() {
        let mut s = surface();
        interpret(&mut s, b'[', b'm', b"31;42");
        interpret(&mut s, b'[', b'm', b"39;49");
        assert_eq!(s.attrs(), AttrWord::default_text());
    }

    #[test]
    fn test_malformed_parameter_leaves_surface_untouched() {
        let mut s = surface();
        place(&mut s, 10, 10);
        interpret(&mut s, b'[', b'A', b"x");
        interpret(&mut s, b'[', b'H', b"1;y");
        interpret(&mut s, b'[', b'J', b"2x");
        assert_eq!(s.cursor(), CursorPos::new(10, 10));
        assert_eq!(s.cell(0, 0).ch, ' ');
    }

    #[test]
    fn test_unsupported_pairs_are_ignored() {
        let mut s = surface();
        place(&mut s, 3, 3);
        interpret(&mut s, b'[', b'Z', b"4");
        interpret(&mut s, b']', b'A', b"");
        interpret(&mut s, b'[', b'S', b"2");
        assert_eq!(s.cursor(), CursorPos::new(3, 3));
        assert_eq!(s.attrs(), AttrWord::default_text());
    }
}
