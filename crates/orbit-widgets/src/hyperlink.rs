#![forbid(unsafe_code)]

//! Single-line clickable text.

use orbit_style::TextStyle;
use orbit_text::display_width;

use crate::error::{LinkPart, WidgetError};
use crate::segment::SegmentRenderer;

/// Text painted inside an OSC 8 hyperlink.
///
/// On terminals without hyperlink support only the text is painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperLink {
    text: String,
    url: String,
    style: TextStyle,
    width: usize,
}

impl HyperLink {
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidHyperlink`] when either part is empty or
    /// has leading or trailing whitespace.
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Result<Self, WidgetError> {
        let text = text.into();
        let url = url.into();
        validate(LinkPart::Text, &text)?;
        validate(LinkPart::Url, &url)?;
        let width = display_width(&text);
        Ok(Self {
            text,
            url,
            style: TextStyle::UNSPECIFIED,
            width,
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        1
    }

    pub(crate) fn build_segment_tree<'a>(&'a self, row: usize, parent: &mut SegmentRenderer<'a>) {
        if row != 0 {
            return;
        }
        let length = self.width.min(parent.remaining());
        if length == 0 {
            return;
        }
        let seg = parent.link(&self.text, self.width, &self.url, length, self.style);
        parent.attach(seg);
    }
}

fn validate(part: LinkPart, value: &str) -> Result<(), WidgetError> {
    if value.is_empty() {
        return Err(WidgetError::InvalidHyperlink {
            part,
            reason: "must not be empty",
        });
    }
    if value.trim() != value {
        return Err(WidgetError::InvalidHyperlink {
            part,
            reason: "must not have surrounding whitespace",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_link_measures_text() {
        let link = HyperLink::new("docs", "https://example.com/docs").unwrap();
        assert_eq!(link.width(), 4);
        assert_eq!(link.height(), 1);
        assert_eq!(link.url(), "https://example.com/docs");
    }

    #[test]
    fn rejects_empty_parts() {
        assert_eq!(
            HyperLink::new("", "https://x.dev"),
            Err(WidgetError::InvalidHyperlink {
                part: LinkPart::Text,
                reason: "must not be empty",
            })
        );
        assert!(matches!(
            HyperLink::new("x", ""),
            Err(WidgetError::InvalidHyperlink { part: LinkPart::Url, .. })
        ));
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(HyperLink::new(" x", "https://x.dev").is_err());
        assert!(HyperLink::new("x", "https://x.dev\n").is_err());
        assert!(HyperLink::new("two words", "https://x.dev").is_ok());
    }

    #[test]
    fn error_message_names_the_part() {
        let err = HyperLink::new("x", " u").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid hyperlink url: must not have surrounding whitespace"
        );
    }
}
