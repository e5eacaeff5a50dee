#![forbid(unsafe_code)]

//! Console color pairs.

use std::fmt;

/// The 16 console colors, in ANSI index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ConsoleColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    Gray = 7,
    DarkGray = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    White = 15,
}

impl ConsoleColor {
    const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::Gray,
        Self::DarkGray,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::White,
    ];

    /// Raw index (0–15).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Color for the low four bits of `value`.
    #[must_use]
    pub const fn from_nibble(value: u8) -> Self {
        Self::ALL[(value & 0x0F) as usize]
    }

    /// True for the high-intensity half of the palette.
    #[must_use]
    pub const fn is_bright(self) -> bool {
        self.as_u8() >= 8
    }

    /// SGR parameter selecting this color as foreground (`30..=37` or `90..=97`).
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        let idx = self.as_u8();
        if idx < 8 { 30 + idx } else { 90 + (idx - 8) }
    }

    /// SGR parameter selecting this color as background (`40..=47` or `100..=107`).
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }
}

/// Foreground/background pair packed into one byte.
///
/// The foreground lives in the low nibble, the background in the high nibble.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(u8);

impl Color {
    /// Gray on black, the usual console default.
    pub const DEFAULT: Self = Self::new(ConsoleColor::Gray, ConsoleColor::Black);

    /// Pair a foreground with a background.
    #[must_use]
    pub const fn new(fore: ConsoleColor, back: ConsoleColor) -> Self {
        Self(fore.as_u8() | (back.as_u8() << 4))
    }

    /// Rebuild a pair from its packed byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Packed byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn fore(self) -> ConsoleColor {
        ConsoleColor::from_nibble(self.0)
    }

    #[must_use]
    pub const fn back(self) -> ConsoleColor {
        ConsoleColor::from_nibble(self.0 >> 4)
    }

    /// Swap foreground and background.
    #[must_use]
    pub const fn invert(self) -> Self {
        Self(self.0.rotate_left(4))
    }

    /// Same background, different foreground.
    #[must_use]
    pub const fn with_fore(self, fore: ConsoleColor) -> Self {
        Self::new(fore, self.back())
    }

    /// Same foreground, different background.
    #[must_use]
    pub const fn with_back(self, back: ConsoleColor) -> Self {
        Self::new(self.fore(), back)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({:?} on {:?})", self.fore(), self.back())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_fore_low_back_high() {
        let c = Color::new(ConsoleColor::Red, ConsoleColor::BrightBlue);
        assert_eq!(c.bits(), 0xC1);
        assert_eq!(c.fore(), ConsoleColor::Red);
        assert_eq!(c.back(), ConsoleColor::BrightBlue);
    }

    #[test]
    fn invert_swaps_and_is_involution() {
        let c = Color::new(ConsoleColor::Yellow, ConsoleColor::Black);
        let inv = c.invert();
        assert_eq!(inv.fore(), ConsoleColor::Black);
        assert_eq!(inv.back(), ConsoleColor::Yellow);
        assert_eq!(inv.invert(), c);
    }

    #[test]
    fn sgr_codes() {
        assert_eq!(ConsoleColor::Black.fg_code(), 30);
        assert_eq!(ConsoleColor::Gray.fg_code(), 37);
        assert_eq!(ConsoleColor::DarkGray.fg_code(), 90);
        assert_eq!(ConsoleColor::White.fg_code(), 97);
        assert_eq!(ConsoleColor::Red.bg_code(), 41);
        assert_eq!(ConsoleColor::BrightCyan.bg_code(), 106);
    }

    #[test]
    fn nibble_round_trip_covers_palette() {
        for idx in 0..16u8 {
            assert_eq!(ConsoleColor::from_nibble(idx).as_u8(), idx);
        }
        assert_eq!(ConsoleColor::from_nibble(0xF3), ConsoleColor::Yellow);
    }
}
