#![forbid(unsafe_code)]

//! Summary line with optional detail.
//!
//! Collapsed, only the summary is shown. Expanded, the summary is stacked
//! above the content. Toggling returns a new node; existing trees are never
//! mutated.

use crate::renderable::Renderable;
use crate::segment::SegmentRenderer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapsable {
    summary: Renderable,
    content: Renderable,
    collapsed: bool,
}

impl Collapsable {
    /// A collapsed node.
    pub fn new(summary: Renderable, content: Renderable) -> Self {
        Self {
            summary,
            content,
            collapsed: true,
        }
    }

    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Copy with the opposite state.
    #[must_use]
    pub fn toggled(&self) -> Self {
        self.clone().collapsed(!self.collapsed)
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn summary(&self) -> &Renderable {
        &self.summary
    }

    pub fn content(&self) -> &Renderable {
        &self.content
    }

    pub fn width(&self) -> usize {
        if self.collapsed {
            self.summary.width()
        } else {
            self.summary.width().max(self.content.width())
        }
    }

    pub fn height(&self) -> usize {
        if self.collapsed {
            self.summary.height()
        } else {
            self.summary.height() + self.content.height()
        }
    }

    pub(crate) fn build_segment_tree<'a>(&'a self, row: usize, parent: &mut SegmentRenderer<'a>) {
        let summary_height = self.summary.height();
        if row < summary_height {
            self.summary.build_segment_tree(row, parent, summary_height);
        } else if !self.collapsed {
            let local = row - summary_height;
            self.content
                .build_segment_tree(local, parent, self.content.height());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Collapsable {
        Collapsable::new(Renderable::text("> build"), Renderable::text("step one\nstep two"))
    }

    #[test]
    fn collapsed_shows_summary_only() {
        let c = node();
        assert!(c.is_collapsed());
        assert_eq!(c.height(), 1);
        assert_eq!(c.width(), 7);
        let r = Renderable::from(c);
        assert_eq!(r.plain_rows(8), vec!["> build "]);
    }

    #[test]
    fn expanded_stacks_content_below() {
        let c = node().toggled();
        assert_eq!(c.height(), 3);
        assert_eq!(c.width(), 8);
        let r = Renderable::from(c);
        assert_eq!(r.plain_rows(8), vec!["> build ", "step one", "step two"]);
    }
}
