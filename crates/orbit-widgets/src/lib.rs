#![forbid(unsafe_code)]

//! Immutable render tree and its two-pass, row-oriented painter.
//!
//! A tree of [`Renderable`] nodes is laid out once at construction: every node
//! knows its width and height. Painting a row builds a short-lived
//! [`SegmentRenderer`] forest for that row only, then paints it left to right
//! into a [`RenderTarget`](orbit_render::RenderTarget).

pub mod collapsable;
pub mod content_box;
pub mod error;
pub mod hyperlink;
pub mod renderable;
pub mod segment;
pub mod stack;
pub mod text_block;

pub use collapsable::Collapsable;
pub use content_box::{ContentBox, HorizontalAlignment, VerticalAlignment};
pub use error::WidgetError;
pub use hyperlink::HyperLink;
pub use renderable::Renderable;
pub use segment::{SegmentContent, SegmentRenderer};
pub use stack::{HorizontalContent, VerticalContent};
pub use text_block::TextBlock;
