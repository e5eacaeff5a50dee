#![forbid(unsafe_code)]

//! Render kernel: bounded sequence assembly, ANSI encoding and the
//! style-tracking render target.

pub mod ansi;
pub mod fixed_buffer;
pub mod render_target;

pub use fixed_buffer::FixedBufferWriter;
pub use render_target::{RenderCaps, RenderTarget};
