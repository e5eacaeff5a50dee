#![forbid(unsafe_code)]

//! Text measurement and layout.
//!
//! Everything here works on borrowed `&str` and produces byte ranges into it,
//! so callers can keep a single shared copy of the source text.

pub mod width;
pub mod wrap;

pub use width::{ELLIPSIS, display_width, truncate_to_width, truncate_with_ellipsis};
pub use wrap::{LineRange, MIN_WIDTH, is_cut_char, line_ranges, newline_count, wrap_line, wrap_ranges};
