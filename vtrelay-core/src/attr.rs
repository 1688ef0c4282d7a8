//! Terminal attribute word
//!
//! A 16-bit word describing the active text attributes of a surface:
//! 3-bit RGB foreground and background colors, intensity (bold), a secondary
//! intensity reused as blink, reverse video, and underline. Bit groups are
//! independently settable; changing one group never disturbs the others
//! unless the whole word is explicitly discarded.

use serde::{Deserialize, Serialize};

/// The attribute word of a terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttrWord {
    bits: u16,
}

impl AttrWord {
    pub const NONE: u16 = 0;
    /// Foreground red. The low bit of the 3-bit RGB group.
    pub const FG_RED: u16 = 1 << 0;
    pub const FG_GREEN: u16 = 1 << 1;
    pub const FG_BLUE: u16 = 1 << 2;
    /// Intensity (SGR bold).
    pub const BOLD: u16 = 1 << 3;
    pub const BG_RED: u16 = 1 << 4;
    pub const BG_GREEN: u16 = 1 << 5;
    pub const BG_BLUE: u16 = 1 << 6;
    /// Background intensity, reused as blink.
    pub const BLINK: u16 = 1 << 7;
    pub const REVERSE: u16 = 1 << 8;
    pub const UNDERLINE: u16 = 1 << 9;

    /// All three foreground color bits.
    pub const FG_MASK: u16 = Self::FG_RED | Self::FG_GREEN | Self::FG_BLUE;
    /// All three background color bits.
    pub const BG_MASK: u16 = Self::BG_RED | Self::BG_GREEN | Self::BG_BLUE;

    /// Removal mask that discards the prior word outright instead of
    /// merging with it.
    pub const REMOVE_ALL: u16 = 0xFFFF;

    pub const fn empty() -> Self {
        AttrWord { bits: Self::NONE }
    }

    pub const fn new(bits: u16) -> Self {
        AttrWord { bits }
    }

    /// The reset state: full (grey) foreground on a black background.
    pub const fn default_text() -> Self {
        AttrWord {
            bits: Self::FG_MASK,
        }
    }

    pub const fn bits(self) -> u16 {
        self.bits
    }

    pub fn contains(self, flag: u16) -> bool {
        self.bits & flag != 0
    }

    pub fn insert(&mut self, flag: u16) {
        self.bits |= flag;
    }

    pub fn remove(&mut self, flag: u16) {
        self.bits &= !flag;
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Foreground bits for a 3-bit RGB color code (SGR code minus 30).
    /// Red is the low bit, green the second, blue the third.
    pub const fn fg_bits(code: u16) -> u16 {
        code & 0x7
    }

    /// Background bits for a 3-bit RGB color code (SGR code minus 40).
    pub const fn bg_bits(code: u16) -> u16 {
        (code & 0x7) << 4
    }

    /// Apply an additive mask and a removal mask over `current`.
    ///
    /// A removal mask of [`REMOVE_ALL`](Self::REMOVE_ALL) discards the prior
    /// word entirely; any other mask keeps the surviving bits of `current`.
    pub fn merged(current: AttrWord, add: u16, remove: u16) -> AttrWord {
        if remove == Self::REMOVE_ALL {
            AttrWord::new(add)
        } else {
            AttrWord::new(add | (current.bits & !remove))
        }
    }
}
