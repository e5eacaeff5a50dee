#![forbid(unsafe_code)]

//! Core: terminal lifecycle, capability detection, configuration and geometry.

pub mod config;
pub mod geometry;
pub mod logging;
pub mod screen_size;
pub mod terminal_capabilities;
pub mod terminal_session;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
