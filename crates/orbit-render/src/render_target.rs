#![forbid(unsafe_code)]

//! Style-tracking output sink.
//!
//! [`RenderTarget`] is the only place that knows what the terminal's current
//! colors and effects are. Painters ask it for a [`TextStyle`]; it resolves
//! the style against its default color and emits only the SGR codes that
//! differ from the last style it applied.
//!
//! Everything is buffered until [`RenderTarget::flush`], so a whole frame
//! reaches the terminal in a single write. Write failures never propagate
//! into layout or paint: the first one is kept for
//! [`RenderTarget::last_error`] and the target keeps accepting output.

use std::io::{self, Write};

use orbit_core::config::ConsoleConfig;
use orbit_core::terminal_capabilities::TerminalCapabilities;
use orbit_style::{Color, Effect, ResolvedStyle, TextStyle};

use crate::ansi::{self, EraseMode};
use crate::fixed_buffer::FixedBufferWriter;

/// Scratch space for a single escape sequence.
const SEQ_CAPACITY: usize = 48;

/// What the target may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCaps {
    /// Escape sequences of any kind.
    pub ansi: bool,
    /// SGR color codes.
    pub colors: bool,
    /// OSC 8 hyperlinks.
    pub hyperlinks: bool,
    /// OSC 9;4 progress indicator.
    pub progress: bool,
}

impl RenderCaps {
    /// Plain text only.
    pub const PLAIN: Self = Self {
        ansi: false,
        colors: false,
        hyperlinks: false,
        progress: false,
    };

    /// Cursor control and colors, no OSC extensions.
    pub const ANSI: Self = Self {
        ansi: true,
        colors: true,
        hyperlinks: false,
        progress: false,
    };

    /// Everything.
    pub const FULL: Self = Self {
        ansi: true,
        colors: true,
        hyperlinks: true,
        progress: true,
    };

    /// Combine detected terminal support with user configuration.
    #[must_use]
    pub fn negotiate(caps: &TerminalCapabilities, config: &ConsoleConfig) -> Self {
        Self {
            ansi: caps.ansi,
            colors: caps.ansi && config.colors,
            hyperlinks: caps.osc8_hyperlinks,
            progress: caps.progress_indicator && config.progress,
        }
    }
}

/// Buffered, style-diffing writer for one output stream.
#[derive(Debug)]
pub struct RenderTarget<W: Write> {
    out: W,
    pending: Vec<u8>,
    caps: RenderCaps,
    default_color: Color,
    /// Style the terminal is in (None = unknown).
    current: Option<ResolvedStyle>,
    link_open: bool,
    /// Whether the cursor sits in column 1, as far as this target has written.
    at_line_start: bool,
    error: Option<io::Error>,
}

impl<W: Write> RenderTarget<W> {
    /// Wrap `out`; the terminal is assumed to be in its default style.
    pub fn new(out: W, caps: RenderCaps) -> Self {
        Self::with_default_color(out, caps, Color::DEFAULT)
    }

    pub fn with_default_color(out: W, caps: RenderCaps, default_color: Color) -> Self {
        Self {
            out,
            pending: Vec::with_capacity(4096),
            caps,
            default_color,
            current: Some(ResolvedStyle::plain(default_color)),
            link_open: false,
            at_line_start: true,
            error: None,
        }
    }

    #[inline]
    pub fn caps(&self) -> RenderCaps {
        self.caps
    }

    #[inline]
    pub fn is_ansi(&self) -> bool {
        self.caps.ansi
    }

    #[inline]
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Bytes buffered since the last flush.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// First write error since the last [`take_error`](Self::take_error).
    pub fn last_error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    /// Switch to `style`, emitting only what changed.
    pub fn set_style(&mut self, style: &TextStyle) {
        self.apply(style.resolve(self.default_color));
    }

    /// Switch to an already resolved style.
    pub fn apply(&mut self, next: ResolvedStyle) {
        if !self.caps.ansi || self.current == Some(next) {
            self.current = Some(next);
            return;
        }
        let prev = self.current;
        let colors = self.caps.colors;
        let default = self.default_color;
        self.emit(|w| {
            if colors {
                let fore = next.color.fore();
                if prev.map(|p| p.color.fore()) != Some(fore) {
                    if fore == default.fore() {
                        w.write_all(ansi::SGR_FG_DEFAULT)?;
                    } else {
                        ansi::sgr_fg(w, fore)?;
                    }
                }
                let back = next.color.back();
                if prev.map(|p| p.color.back()) != Some(back) {
                    if back == default.back() {
                        w.write_all(ansi::SGR_BG_DEFAULT)?;
                    } else {
                        ansi::sgr_bg(w, back)?;
                    }
                }
            }
            let bold = next.effect.contains(Effect::BOLD);
            if prev.map(|p| p.effect.contains(Effect::BOLD)) != Some(bold) {
                ansi::sgr_bold(w, bold)?;
            }
            let underline = next.effect.contains(Effect::UNDERLINE);
            if prev.map(|p| p.effect.contains(Effect::UNDERLINE)) != Some(underline) {
                ansi::sgr_underline(w, underline)?;
            }
            Ok(())
        });
        self.current = Some(next);
    }

    /// Return the terminal to its default colors and no effects.
    pub fn reset_style(&mut self) {
        let plain = ResolvedStyle::plain(self.default_color);
        if self.caps.ansi {
            let prev = self.current;
            self.emit(|w| {
                ansi::sgr_colors_default(w)?;
                let had = |flag| prev.is_none_or(|p: ResolvedStyle| p.effect.contains(flag));
                if had(Effect::BOLD) {
                    ansi::sgr_bold(w, false)?;
                }
                if had(Effect::UNDERLINE) {
                    ansi::sgr_underline(w, false)?;
                }
                Ok(())
            });
        }
        self.current = Some(plain);
    }

    /// Forget the tracked style; the next style change is emitted in full.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    pub fn write_str(&mut self, text: &str) {
        if let Some(last) = text.bytes().last() {
            self.at_line_start = matches!(last, b'\n' | b'\r');
        }
        self.pending.extend_from_slice(text.as_bytes());
    }

    pub fn write_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.pending
            .extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
        self.at_line_start = matches!(c, '\n' | '\r');
    }

    /// `count` spaces in the current style.
    pub fn write_fill(&mut self, count: usize) {
        if count > 0 {
            self.at_line_start = false;
        }
        self.pending.resize(self.pending.len() + count, b' ');
    }

    /// Line break: `\r\n` on an ANSI terminal, `\n` otherwise.
    pub fn new_line(&mut self) {
        if self.caps.ansi {
            self.pending.extend_from_slice(b"\r\n");
        } else {
            self.pending.push(b'\n');
        }
        self.at_line_start = true;
    }

    pub fn carriage_return(&mut self) {
        self.pending.push(b'\r');
        self.at_line_start = true;
    }

    /// True unless text was written since the last line break or return.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Break the line if the cursor was left after some text.
    pub fn ensure_line_start(&mut self) {
        if !self.at_line_start {
            self.new_line();
        }
    }

    /// Open a hyperlink. Returns false when links are not supported, in which
    /// case the caller paints the text alone.
    pub fn begin_link(&mut self, url: &str) -> bool {
        if !(self.caps.ansi && self.caps.hyperlinks) {
            return false;
        }
        if self.link_open {
            self.end_link();
        }
        // URLs are unbounded, so they skip the sequence scratch buffer.
        if let Err(err) = ansi::hyperlink_start(&mut self.pending, url) {
            self.record_error(err);
            return false;
        }
        self.link_open = true;
        true
    }

    pub fn end_link(&mut self) {
        if self.link_open {
            self.emit(|w| ansi::hyperlink_end(w));
            self.link_open = false;
        }
    }

    // ------------------------------------------------------------------
    // Cursor and erase
    // ------------------------------------------------------------------

    pub fn cursor_up(&mut self, n: u16) {
        self.emit_ansi(|w| ansi::cuu(w, n));
    }

    pub fn cursor_down(&mut self, n: u16) {
        self.emit_ansi(|w| ansi::cud(w, n));
    }

    pub fn cursor_forward(&mut self, n: u16) {
        if self.caps.ansi && n > 0 {
            self.at_line_start = false;
        }
        self.emit_ansi(|w| ansi::cuf(w, n));
    }

    pub fn cursor_back(&mut self, n: u16) {
        self.emit_ansi(|w| ansi::cub(w, n));
    }

    /// Move to `col` (0-indexed) on the current row.
    pub fn cursor_to_column(&mut self, col: u16) {
        if self.caps.ansi {
            self.at_line_start = col == 0;
        }
        self.emit_ansi(|w| ansi::cha(w, col));
    }

    /// Move to `(row, col)` (0-indexed).
    pub fn cursor_to(&mut self, row: u16, col: u16) {
        if self.caps.ansi {
            self.at_line_start = col == 0;
        }
        self.emit_ansi(|w| ansi::cup(w, row, col));
    }

    pub fn save_cursor(&mut self) {
        self.emit_ansi(|w| ansi::cursor_save(w));
    }

    pub fn restore_cursor(&mut self) {
        self.emit_ansi(|w| ansi::cursor_restore(w));
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.emit_ansi(|w| ansi::cursor_visible(w, visible));
    }

    pub fn erase_line(&mut self, mode: EraseMode) {
        self.emit_ansi(|w| ansi::erase_line(w, mode));
    }

    pub fn erase_display(&mut self, mode: EraseMode) {
        self.emit_ansi(|w| ansi::erase_display(w, mode));
    }

    /// Turn the taskbar/tab progress indicator on or off, where supported.
    pub fn set_progress(&mut self, on: bool) {
        if self.caps.progress {
            self.emit_ansi(|w| ansi::progress(w, on));
        }
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Write everything buffered to the underlying stream.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            let result = self.out.write_all(&self.pending);
            self.pending.clear();
            if let Err(err) = result {
                self.record_error(err);
                return;
            }
        }
        if let Err(err) = self.out.flush() {
            self.record_error(err);
        }
    }

    /// Flush and hand back the stream.
    pub fn into_inner(mut self) -> W {
        self.flush();
        self.out
    }

    fn emit_ansi<F>(&mut self, f: F)
    where
        F: FnOnce(&mut FixedBufferWriter<'_>) -> io::Result<()>,
    {
        if self.caps.ansi {
            self.emit(f);
        }
    }

    fn emit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut FixedBufferWriter<'_>) -> io::Result<()>,
    {
        let mut scratch = [0u8; SEQ_CAPACITY];
        let mut seq = FixedBufferWriter::new(&mut scratch);
        match f(&mut seq) {
            Ok(()) => self.pending.extend_from_slice(seq.as_bytes()),
            Err(err) => self.record_error(err),
        }
    }

    fn record_error(&mut self, err: io::Error) {
        orbit_core::warn!(error = %err, "terminal write failed");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
