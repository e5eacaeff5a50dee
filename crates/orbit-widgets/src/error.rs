#![forbid(unsafe_code)]

//! Construction errors.

use std::fmt;

/// Which part of a hyperlink was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPart {
    Text,
    Url,
}

impl fmt::Display for LinkPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Url => "url",
        })
    }
}

/// Error building a render node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Hyperlink text or URL is empty or has surrounding whitespace.
    InvalidHyperlink { part: LinkPart, reason: &'static str },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHyperlink { part, reason } => {
                write!(f, "invalid hyperlink {part}: {reason}")
            }
        }
    }
}

impl std::error::Error for WidgetError {}
