#![forbid(unsafe_code)]

//! Immutable block of styled text.
//!
//! The source text is stored once as an `Arc<str>`; lines are byte ranges
//! into it. Re-wrapping with [`TextBlock::set_text_width`] builds a new block
//! that shares the same source.

use std::sync::Arc;

use orbit_style::TextStyle;
use orbit_text::{LineRange, display_width, line_ranges, newline_count, wrap_line};

use crate::segment::SegmentRenderer;

#[derive(Debug, Clone)]
pub struct TextBlock {
    text: Arc<str>,
    /// Trimmed logical lines, before any wrapping.
    logical: Arc<[LineRange]>,
    lines: Vec<LineRange>,
    width: usize,
    style: TextStyle,
    multi_line: bool,
}

impl TextBlock {
    /// Build a block from `text`, trimming surrounding whitespace.
    ///
    /// Text without a newline is laid out as a single line; otherwise every
    /// logical line is trimmed on its own.
    pub fn from_text(text: &str) -> Self {
        Self::styled(text, TextStyle::UNSPECIFIED)
    }

    pub fn styled(text: &str, style: TextStyle) -> Self {
        let text: Arc<str> = Arc::from(text.trim());
        let multi_line = newline_count(&text) > 0;
        let logical: Arc<[LineRange]> = if multi_line {
            line_ranges(&text).into()
        } else {
            let single = LineRange {
                start: 0,
                len: text.len(),
                width: display_width(&text),
            };
            Arc::from([single])
        };
        let lines = logical.to_vec();
        let width = max_width(&lines);
        Self {
            text,
            logical,
            lines,
            width,
            style,
            multi_line,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Re-wrap to at most `width` columns.
    ///
    /// Returns the same block when it already fits or when `width` is zero.
    /// Unbreakable words may still exceed `width`.
    #[must_use]
    pub fn set_text_width(self: &Arc<Self>, width: usize) -> Arc<Self> {
        if width == 0 || width >= self.width {
            return Arc::clone(self);
        }
        let mut lines = Vec::with_capacity(self.logical.len() * 2);
        for line in self.logical.iter() {
            wrap_line(&self.text, *line, width, &mut lines);
        }
        let new_width = max_width(&lines);
        orbit_core::trace!(
            requested = width,
            resolved = new_width,
            lines = lines.len(),
            "text block rewrapped"
        );
        Arc::new(Self {
            text: Arc::clone(&self.text),
            logical: Arc::clone(&self.logical),
            lines,
            width: new_width,
            style: self.style,
            multi_line: self.multi_line,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Trimmed source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the source contained a newline.
    pub fn is_multi_line(&self) -> bool {
        self.multi_line
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Line ranges into [`text`](Self::text).
    pub fn line_ranges(&self) -> &[LineRange] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|r| r.slice(&self.text))
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|r| r.slice(&self.text))
    }

    /// Whether two blocks share the same source allocation.
    pub fn shares_text_with(&self, other: &TextBlock) -> bool {
        Arc::ptr_eq(&self.text, &other.text)
    }

    pub(crate) fn build_segment_tree<'a>(&'a self, row: usize, parent: &mut SegmentRenderer<'a>) {
        let Some(line) = self.lines.get(row) else {
            return;
        };
        let length = self.width.min(parent.remaining());
        if length == 0 {
            return;
        }
        let seg = parent.text(line.slice(&self.text), line.width, length, self.style);
        parent.attach(seg);
    }
}

impl PartialEq for TextBlock {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.style == other.style
            && self.lines.len() == other.lines.len()
            && self.lines().eq(other.lines())
    }
}

impl Eq for TextBlock {}

fn max_width(lines: &[LineRange]) -> usize {
    lines.iter().map(|l| l.width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_line_is_trimmed() {
        let block = TextBlock::from_text("  Hello   World  ");
        assert!(!block.is_multi_line());
        assert_eq!(block.width(), 13);
        assert_eq!(block.height(), 1);
        assert_eq!(block.text(), "Hello   World");
        assert_eq!(block.line(0), Some("Hello   World"));
    }

    #[test]
    fn set_text_width_wraps_and_shares_source() {
        let block = Arc::new(TextBlock::from_text("  Hello   World  "));
        let narrow = block.set_text_width(7);
        assert_eq!(narrow.lines().collect::<Vec<_>>(), vec!["Hello", "World"]);
        assert_eq!(narrow.width(), 5);
        assert!(narrow.shares_text_with(&block));
    }

    #[test]
    fn set_text_width_noop_returns_same_block() {
        let block = Arc::new(TextBlock::from_text("short"));
        assert!(Arc::ptr_eq(&block, &block.set_text_width(5)));
        assert!(Arc::ptr_eq(&block, &block.set_text_width(80)));
        assert!(Arc::ptr_eq(&block, &block.set_text_width(0)));
    }

    #[test]
    fn multi_line_trims_each_line() {
        let block = TextBlock::from_text("first  \n   second line\n");
        assert!(block.is_multi_line());
        assert_eq!(block.lines().collect::<Vec<_>>(), vec!["first", "second line"]);
        assert_eq!(block.width(), 11);
    }

    #[test]
    fn rewrap_starts_from_logical_lines() {
        let block = Arc::new(TextBlock::from_text("aaa bbb ccc ddd eee"));
        let mid = block.set_text_width(11);
        assert_eq!(mid.lines().collect::<Vec<_>>(), vec!["aaa bbb ccc", "ddd eee"]);
        let narrow = mid.set_text_width(7);
        assert_eq!(
            narrow.lines().collect::<Vec<_>>(),
            vec!["aaa bbb", "ccc ddd", "eee"]
        );
    }

    #[test]
    fn empty_text_has_zero_width() {
        let block = TextBlock::from_text("   ");
        assert_eq!(block.width(), 0);
        assert_eq!(block.height(), 1);
    }
}
