#![forbid(unsafe_code)]

//! Word-wrap producing byte ranges into the source text.
//!
//! # Algorithm
//!
//! Each logical line is trimmed first. While the remainder is wider than the
//! target width:
//!
//! - if the character just past the last fitting column is whitespace, the
//!   line is cut there;
//! - otherwise the fitting prefix is searched backward for the last cut
//!   character (see [`is_cut_char`]). Whitespace cuts before itself,
//!   punctuation stays on the produced line;
//! - with no cut character the token is kept whole up to the next whitespace,
//!   even if that exceeds the width.
//!
//! Produced lines are trimmed of trailing whitespace and the whitespace run
//! after a cut is skipped.
//!
//! # Example
//! ```
//! use orbit_text::wrap::wrap_ranges;
//!
//! let text = "Hello   World";
//! let lines: Vec<&str> = wrap_ranges(text, 7).iter().map(|r| r.slice(text)).collect();
//! assert_eq!(lines, vec!["Hello", "World"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::width::display_width;

/// Narrowest width a render tree may be reflowed to.
pub const MIN_WIDTH: usize = 15;

const CUT_PUNCTUATION: [char; 6] = [',', ';', '!', '-', '?', '.'];

/// One laid-out line: a byte range into the source plus its display width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    pub start: usize,
    pub len: usize,
    pub width: usize,
}

impl LineRange {
    /// Range covering `text[start..start + len]`; width is measured.
    #[must_use]
    pub fn measure(source: &str, start: usize, len: usize) -> Self {
        Self {
            start,
            len,
            width: display_width(&source[start..start + len]),
        }
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The text this range points at.
    ///
    /// Returns an empty string if the range does not belong to `source`.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end()).unwrap_or("")
    }
}

/// Characters a line may be broken at.
#[inline]
#[must_use]
pub fn is_cut_char(c: char) -> bool {
    c.is_whitespace() || CUT_PUNCTUATION.contains(&c)
}

/// Number of `\n` in `text`.
#[inline]
#[must_use]
pub fn newline_count(text: &str) -> usize {
    memchr::memchr_iter(b'\n', text.as_bytes()).count()
}

/// Logical lines of `text`, each trimmed, without wrapping.
#[must_use]
pub fn line_ranges(text: &str) -> Vec<LineRange> {
    let mut out = Vec::with_capacity(newline_count(text) + 1);
    let mut start = 0;
    for raw in text.split('\n') {
        out.push(trimmed_range(text, start, raw));
        start += raw.len() + 1;
    }
    out
}

/// Word-wrap every logical line of `text` to `width` cells.
///
/// A zero width disables wrapping.
#[must_use]
pub fn wrap_ranges(text: &str, width: usize) -> Vec<LineRange> {
    let logical = line_ranges(text);
    if width == 0 {
        return logical;
    }
    let mut out = Vec::with_capacity(logical.len());
    for line in logical {
        wrap_line(text, line, width, &mut out);
    }
    out
}

/// Word-wrap one already-trimmed line of `source`, appending the pieces to `out`.
pub fn wrap_line(source: &str, line: LineRange, width: usize, out: &mut Vec<LineRange>) {
    if width == 0 || line.width <= width {
        out.push(line);
        return;
    }

    let text = line.slice(source);
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let rest_width = display_width(rest);
        if rest_width <= width {
            out.push(LineRange {
                start: line.start + pos,
                len: rest.len(),
                width: rest_width,
            });
            break;
        }

        let fit = fitting_prefix(rest, width);
        let next_is_space = rest[fit..].chars().next().is_some_and(char::is_whitespace);
        let cut = if next_is_space {
            fit
        } else {
            match rest[..fit].char_indices().rev().find(|&(_, c)| is_cut_char(c)) {
                Some((idx, c)) if c.is_whitespace() => idx,
                Some((idx, c)) => idx + c.len_utf8(),
                None => rest[fit..]
                    .find(char::is_whitespace)
                    .map_or(rest.len(), |p| fit + p),
            }
        };

        let piece = rest[..cut].trim_end();
        if !piece.is_empty() {
            out.push(LineRange::measure(source, line.start + pos, piece.len()));
        }
        pos += skip_whitespace(rest, cut);
    }
}

/// Byte length of the longest prefix of `text` at most `width` cells wide.
fn fitting_prefix(text: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let gw = grapheme.width();
        if used + gw > width {
            return idx;
        }
        used += gw;
    }
    text.len()
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .find(|c: char| !c.is_whitespace())
        .map_or(text.len(), |p| from + p)
}

fn trimmed_range(source: &str, start: usize, raw: &str) -> LineRange {
    let lead = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    LineRange::measure(source, start + lead, trimmed.len())
}
