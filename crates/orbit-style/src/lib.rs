#![forbid(unsafe_code)]

//! Style primitives: 16-color console colors and cascading text styles.

pub mod color;
pub mod style;

pub use color::{Color, ConsoleColor};
pub use style::{Effect, ResolvedStyle, TextStyle};
