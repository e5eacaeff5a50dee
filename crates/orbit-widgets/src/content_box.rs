#![forbid(unsafe_code)]

//! Box with padding, outer margin, alignment and an optional style.
//!
//! A box row is resolved into five spans:
//!
//! ```text
//! | margin.left | padding.left + slack | child | padding.right + slack | margin.right |
//! ```
//!
//! Margins are painted in the parent's style, everything between them in
//! the box's style. Slack is the extra width of the segment the box is given
//! beyond its own width; horizontal alignment decides how it is split.
//! Vertical slack only exists when the box is asked to fill more rows than
//! its own height, for example next to a taller sibling.

use orbit_core::geometry::{Filler, Padding};
use orbit_style::TextStyle;

use crate::renderable::Renderable;
use crate::segment::SegmentRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Right,
    /// Odd remainder goes to the right.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Bottom,
    /// Odd remainder goes below.
    Middle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBox {
    child: Renderable,
    padding: Padding,
    margin: Filler,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    style: TextStyle,
    width: usize,
    height: usize,
}

impl ContentBox {
    pub fn new(child: Renderable) -> Self {
        let mut this = Self {
            child,
            padding: Padding::ZERO,
            margin: Filler::ZERO,
            horizontal: HorizontalAlignment::Left,
            vertical: VerticalAlignment::Top,
            style: TextStyle::UNSPECIFIED,
            width: 0,
            height: 0,
        };
        this.measure();
        this
    }

    #[must_use]
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self.measure();
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: impl Into<Filler>) -> Self {
        self.margin = margin.into();
        self.measure();
        self
    }

    #[must_use]
    pub fn align(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    #[must_use]
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Same box around a different child.
    #[must_use]
    pub fn with_child(&self, child: Renderable) -> Self {
        let mut this = self.clone();
        this.child = child;
        this.measure();
        this
    }

    fn measure(&mut self) {
        self.width = self.horizontal_edges() + self.child.width();
        self.height = self.margin.vertical_sum() + self.padding.vertical_sum() + self.child.height();
    }

    /// Columns taken by margin and padding on both sides, summed unclamped.
    pub(crate) fn horizontal_edges(&self) -> usize {
        self.margin.horizontal_sum() + self.padding.horizontal_sum()
    }

    pub fn child(&self) -> &Renderable {
        &self.child
    }

    pub fn padding_edges(&self) -> Padding {
        self.padding
    }

    pub fn margin_edges(&self) -> Filler {
        self.margin
    }

    pub fn alignment(&self) -> (HorizontalAlignment, VerticalAlignment) {
        (self.horizontal, self.vertical)
    }

    pub fn box_style(&self) -> TextStyle {
        self.style
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows of vertical slack above the content when filling `actual_height` rows.
    fn slack_above(&self, actual_height: usize) -> usize {
        let slack = actual_height.saturating_sub(self.height);
        match self.vertical {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Bottom => slack,
            VerticalAlignment::Middle => slack / 2,
        }
    }

    /// Columns of horizontal slack left of the padding.
    fn slack_left(&self, slack: usize) -> usize {
        match self.horizontal {
            HorizontalAlignment::Left => 0,
            HorizontalAlignment::Right => slack,
            HorizontalAlignment::Center => slack / 2,
        }
    }

    pub(crate) fn build_segment_tree<'a>(
        &'a self,
        row: usize,
        parent: &mut SegmentRenderer<'a>,
        actual_height: usize,
    ) {
        let rows = actual_height.max(self.height);
        let margin_top = usize::from(self.margin.top);
        let margin_bottom = usize::from(self.margin.bottom);
        if row < margin_top || row >= rows.saturating_sub(margin_bottom) {
            return;
        }

        let given = parent.remaining();
        let margin_left = usize::from(self.margin.left).min(given);
        let box_len = given
            .saturating_sub(margin_left)
            .saturating_sub(usize::from(self.margin.right));
        parent.add_fill(margin_left, TextStyle::UNSPECIFIED);
        if box_len == 0 {
            return;
        }

        let mut body = parent.fill(box_len, self.style);
        let content_row = (row - margin_top)
            .checked_sub(usize::from(self.padding.top) + self.slack_above(actual_height));
        if let Some(local) = content_row.filter(|&r| r < self.child.height()) {
            let inner = self.padding.horizontal_sum() + self.child.width();
            let lead = usize::from(self.padding.left) + self.slack_left(box_len.saturating_sub(inner));
            body.add_fill(lead, TextStyle::UNSPECIFIED);
            let mut slot = body.fill(self.child.width(), TextStyle::UNSPECIFIED);
            self.child
                .build_segment_tree(local, &mut slot, self.child.height());
            body.attach(slot);
        }
        parent.attach(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(r: &Renderable, width: usize) -> Vec<String> {
        r.plain_rows(width)
    }

    #[test]
    fn padding_adds_to_size_and_offsets_content() {
        let b: Renderable = ContentBox::new(Renderable::text("0123456789"))
            .padding(Padding::new(1, 2, 0, 0))
            .into();
        assert_eq!(b.width(), 12);
        assert_eq!(b.height(), 2);
        assert_eq!(rows(&b, 12), vec!["            ", "  0123456789"]);
    }

    #[test]
    fn margin_and_padding_both_count() {
        let b = ContentBox::new(Renderable::text("ab"))
            .padding(1u8)
            .margin((0u8, 2u8));
        assert_eq!(b.width(), 2 + 1 + 2 + 1 + 2);
        assert_eq!(b.height(), 3);
    }

    #[test]
    fn horizontal_alignment_uses_segment_slack() {
        let text = Renderable::text("ab");
        let right: Renderable = ContentBox::new(text.clone())
            .align(HorizontalAlignment::Right, VerticalAlignment::Top)
            .into();
        assert_eq!(rows(&right, 6), vec!["    ab"]);

        let center: Renderable = ContentBox::new(text)
            .align(HorizontalAlignment::Center, VerticalAlignment::Top)
            .into();
        assert_eq!(rows(&center, 7), vec!["  ab   "]);
    }

    #[test]
    fn vertical_alignment_fills_actual_height() {
        let tall = Renderable::text("1\n2\n3\n4");
        let bottom: Renderable = ContentBox::new(Renderable::text("x"))
            .align(HorizontalAlignment::Left, VerticalAlignment::Bottom)
            .into();
        let middle: Renderable = ContentBox::new(Renderable::text("y"))
            .align(HorizontalAlignment::Left, VerticalAlignment::Middle)
            .into();
        let row = tall.add_right(bottom).add_right(middle);
        assert_eq!(row.plain_rows(3), vec!["1  ", "2 y", "3  ", "4x "]);
    }

    #[test]
    fn wide_margin_plus_padding_is_not_clamped() {
        let b: Renderable = ContentBox::new(Renderable::text("x"))
            .padding(Padding::new(200, 0, 0, 0))
            .margin(Filler::new(200, 150, 0, 150))
            .into();
        assert_eq!(b.height(), 401);
        assert_eq!(b.width(), 301);
        let painted = rows(&b, b.width());
        assert_eq!(painted.len(), 401);
        let hits: Vec<usize> = painted
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains('x'))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![400]);
        assert_eq!(painted[400].find('x'), Some(150));
    }

    #[test]
    fn margin_rows_are_blank() {
        let b: Renderable = ContentBox::new(Renderable::text("z"))
            .margin(Filler::new(1, 1, 1, 0))
            .into();
        assert_eq!(b.height(), 3);
        assert_eq!(rows(&b, 2), vec!["  ", " z", "  "]);
    }
}
