#![forbid(unsafe_code)]

//! ANSI/VT100 escape sequence encoding.
//!
//! Pure byte generation over any [`Write`]; state tracking lives in
//! [`RenderTarget`](crate::RenderTarget). Numeric parameters are always
//! written out, so the output is a fixed, bit-exact subset.
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ row ; col H` | CUP (cursor position, 1-indexed) |
//! | CSI | `ESC [ n A/B/C/D` | cursor up / down / forward / back |
//! | CSI | `ESC [ n G` | CHA (cursor to column, 1-indexed) |
//! | CSI | `ESC [ n K` | EL (erase line) |
//! | CSI | `ESC [ n J` | ED (erase display) |
//! | CSI | `ESC [ ? 25 h/l` | show / hide cursor |
//! | CSI | `ESC [ s` / `ESC [ u` | save / restore cursor |
//! | CSI | `ESC [ n m` | SGR (16 colors, bold, underline) |
//! | OSC | `ESC ] 8 ; ; url ST` | hyperlink |
//! | OSC | `ESC ] 9 ; 4 ; n ; ST` | progress indicator |

use std::io::{self, Write};

use orbit_style::ConsoleColor;

// =============================================================================
// SGR (Select Graphic Rendition)
// =============================================================================

/// Default foreground: `CSI 39 m`
pub const SGR_FG_DEFAULT: &[u8] = b"\x1b[39m";
/// Default background: `CSI 49 m`
pub const SGR_BG_DEFAULT: &[u8] = b"\x1b[49m";
/// Bold on: `CSI 1 m`
pub const SGR_BOLD_ON: &[u8] = b"\x1b[1m";
/// Bold off: `CSI 21 m`
pub const SGR_BOLD_OFF: &[u8] = b"\x1b[21m";
/// Underline on: `CSI 4 m`
pub const SGR_UNDERLINE_ON: &[u8] = b"\x1b[4m";
/// Underline off: `CSI 24 m`
pub const SGR_UNDERLINE_OFF: &[u8] = b"\x1b[24m";

#[inline]
fn write_u8_dec(buf: &mut [u8], n: u8) -> usize {
    if n >= 100 {
        buf[0] = b'0' + n / 100;
        buf[1] = b'0' + (n / 10) % 10;
        buf[2] = b'0' + n % 10;
        3
    } else if n >= 10 {
        buf[0] = b'0' + n / 10;
        buf[1] = b'0' + n % 10;
        2
    } else {
        buf[0] = b'0' + n;
        1
    }
}

#[inline]
fn write_sgr_code<W: Write>(w: &mut W, code: u8) -> io::Result<()> {
    let mut buf = [0u8; 6];
    buf[0] = 0x1b;
    buf[1] = b'[';
    let len = write_u8_dec(&mut buf[2..], code);
    buf[2 + len] = b'm';
    w.write_all(&buf[..2 + len + 1])
}

/// Foreground color: `CSI 30..37 m` or `CSI 90..97 m`
pub fn sgr_fg<W: Write>(w: &mut W, color: ConsoleColor) -> io::Result<()> {
    write_sgr_code(w, color.fg_code())
}

/// Background color: `CSI 40..47 m` or `CSI 100..107 m`
pub fn sgr_bg<W: Write>(w: &mut W, color: ConsoleColor) -> io::Result<()> {
    write_sgr_code(w, color.bg_code())
}

/// Reset both colors to the terminal default.
pub fn sgr_colors_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_FG_DEFAULT)?;
    w.write_all(SGR_BG_DEFAULT)
}

pub fn sgr_bold<W: Write>(w: &mut W, on: bool) -> io::Result<()> {
    w.write_all(if on { SGR_BOLD_ON } else { SGR_BOLD_OFF })
}

pub fn sgr_underline<W: Write>(w: &mut W, on: bool) -> io::Result<()> {
    w.write_all(if on { SGR_UNDERLINE_ON } else { SGR_UNDERLINE_OFF })
}

// =============================================================================
// Cursor Positioning
// =============================================================================

/// CUP (Cursor Position): `CSI row ; col H`
///
/// Row and col are 0-indexed input, converted to 1-indexed for ANSI.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// CHA (Cursor Horizontal Absolute): `CSI col G`, 0-indexed input.
pub fn cha<W: Write>(w: &mut W, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", col.saturating_add(1))
}

/// Move cursor up: `CSI n A`
pub fn cuu<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}A")
}

/// Move cursor down: `CSI n B`
pub fn cud<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}B")
}

/// Move cursor forward (right): `CSI n C`
pub fn cuf<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}C")
}

/// Move cursor back (left): `CSI n D`
pub fn cub<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}D")
}

/// Save cursor: `CSI s`
pub const CURSOR_SAVE: &[u8] = b"\x1b[s";
/// Restore cursor: `CSI u`
pub const CURSOR_RESTORE: &[u8] = b"\x1b[u";
/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

#[inline]
pub fn cursor_save<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SAVE)
}

#[inline]
pub fn cursor_restore<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_RESTORE)
}

#[inline]
pub fn cursor_visible<W: Write>(w: &mut W, visible: bool) -> io::Result<()> {
    w.write_all(if visible { CURSOR_SHOW } else { CURSOR_HIDE })
}

// =============================================================================
// Erase Operations
// =============================================================================

/// Span selector shared by EL and ED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// From the cursor to the end.
    ToEnd = 0,
    /// From the start to the cursor.
    ToStart = 1,
    /// Everything.
    All = 2,
}

/// EL (Erase Line): `CSI n K`
pub fn erase_line<W: Write>(w: &mut W, mode: EraseMode) -> io::Result<()> {
    match mode {
        EraseMode::ToEnd => w.write_all(b"\x1b[0K"),
        EraseMode::ToStart => w.write_all(b"\x1b[1K"),
        EraseMode::All => w.write_all(b"\x1b[2K"),
    }
}

/// ED (Erase Display): `CSI n J`
pub fn erase_display<W: Write>(w: &mut W, mode: EraseMode) -> io::Result<()> {
    match mode {
        EraseMode::ToEnd => w.write_all(b"\x1b[0J"),
        EraseMode::ToStart => w.write_all(b"\x1b[1J"),
        EraseMode::All => w.write_all(b"\x1b[2J"),
    }
}

// =============================================================================
// OSC 8 Hyperlinks
// =============================================================================

/// Open a hyperlink: `OSC 8 ; ; url ST`, with ST = `ESC \`.
pub fn hyperlink_start<W: Write>(w: &mut W, url: &str) -> io::Result<()> {
    write!(w, "\x1b]8;;{url}\x1b\\")
}

/// Close a hyperlink: `OSC 8 ; ; ST`
pub fn hyperlink_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b]8;;\x1b\\")
}

// =============================================================================
// OSC 9;4 Progress
// =============================================================================

/// Indeterminate progress: `OSC 9 ; 4 ; 3 ; ST`
pub const PROGRESS_ON: &[u8] = b"\x1b]9;4;3;\x1b\\";
/// Clear progress: `OSC 9 ; 4 ; 0 ; ST`
pub const PROGRESS_OFF: &[u8] = b"\x1b]9;4;0;\x1b\\";

#[inline]
pub fn progress<W: Write>(w: &mut W, on: bool) -> io::Result<()> {
    w.write_all(if on { PROGRESS_ON } else { PROGRESS_OFF })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn sgr_colors() {
        assert_eq!(to_bytes(|w| sgr_fg(w, ConsoleColor::Red)), b"\x1b[31m");
        assert_eq!(to_bytes(|w| sgr_fg(w, ConsoleColor::White)), b"\x1b[97m");
        assert_eq!(to_bytes(|w| sgr_bg(w, ConsoleColor::Blue)), b"\x1b[44m");
        assert_eq!(to_bytes(|w| sgr_bg(w, ConsoleColor::DarkGray)), b"\x1b[100m");
        assert_eq!(to_bytes(sgr_colors_default), b"\x1b[39m\x1b[49m");
    }

    #[test]
    fn sgr_effects() {
        assert_eq!(to_bytes(|w| sgr_bold(w, true)), b"\x1b[1m");
        assert_eq!(to_bytes(|w| sgr_bold(w, false)), b"\x1b[21m");
        assert_eq!(to_bytes(|w| sgr_underline(w, true)), b"\x1b[4m");
        assert_eq!(to_bytes(|w| sgr_underline(w, false)), b"\x1b[24m");
    }

    #[test]
    fn cursor_moves() {
        assert_eq!(to_bytes(|w| cup(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(to_bytes(|w| cha(w, 9)), b"\x1b[10G");
        assert_eq!(to_bytes(|w| cuu(w, 1)), b"\x1b[1A");
        assert_eq!(to_bytes(|w| cud(w, 3)), b"\x1b[3B");
        assert_eq!(to_bytes(|w| cuf(w, 2)), b"\x1b[2C");
        assert_eq!(to_bytes(|w| cub(w, 4)), b"\x1b[4D");
        assert_eq!(to_bytes(|w| cuu(w, 0)), b"");
    }

    #[test]
    fn erase_sequences() {
        assert_eq!(to_bytes(|w| erase_line(w, EraseMode::ToEnd)), b"\x1b[0K");
        assert_eq!(to_bytes(|w| erase_line(w, EraseMode::All)), b"\x1b[2K");
        assert_eq!(to_bytes(|w| erase_display(w, EraseMode::ToEnd)), b"\x1b[0J");
        assert_eq!(to_bytes(|w| erase_display(w, EraseMode::ToStart)), b"\x1b[1J");
    }

    #[test]
    fn cursor_state() {
        assert_eq!(to_bytes(|w| cursor_visible(w, false)), b"\x1b[?25l");
        assert_eq!(to_bytes(|w| cursor_visible(w, true)), b"\x1b[?25h");
        assert_eq!(to_bytes(cursor_save), b"\x1b[s");
        assert_eq!(to_bytes(cursor_restore), b"\x1b[u");
    }

    #[test]
    fn osc_sequences() {
        assert_eq!(
            to_bytes(|w| hyperlink_start(w, "https://example.com")),
            b"\x1b]8;;https://example.com\x1b\\"
        );
        assert_eq!(to_bytes(hyperlink_end), b"\x1b]8;;\x1b\\");
        assert_eq!(to_bytes(|w| progress(w, true)), b"\x1b]9;4;3;\x1b\\");
        assert_eq!(to_bytes(|w| progress(w, false)), b"\x1b]9;4;0;\x1b\\");
    }
}
