#![forbid(unsafe_code)]

//! orbit public facade crate.
//!
//! Re-exports the types a command implementation needs to build render
//! trees and drive the console, plus a prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use orbit_core::config::{ConsoleConfig, LogLevel};
pub use orbit_core::geometry::{Filler, Padding};
pub use orbit_core::screen_size::{FixedScreen, ScreenSize, TerminalScreen};
pub use orbit_core::terminal_capabilities::{
    RestoreToken, TerminalCapabilities, detect_ansi_support,
};
pub use orbit_core::terminal_session::{SessionOptions, TerminalSession};

// --- Style re-exports ------------------------------------------------------

pub use orbit_style::{Color, ConsoleColor, Effect, TextStyle};

// --- Render re-exports -----------------------------------------------------

pub use orbit_render::{FixedBufferWriter, RenderCaps, RenderTarget};

// --- Widget re-exports -----------------------------------------------------

pub use orbit_widgets::{
    Collapsable, ContentBox, HorizontalAlignment, HyperLink, Renderable, TextBlock,
    VerticalAlignment, WidgetError,
};

// --- Runtime re-exports ----------------------------------------------------

pub use orbit_runtime::{Animation, AnimationOptions, Console, SharedSink};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for orbit.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// A render node was built from invalid input.
    Widget(WidgetError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Widget(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Widget(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<WidgetError> for Error {
    fn from(err: WidgetError) -> Self {
        Self::Widget(err)
    }
}

/// Standard result type for orbit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Color, Console, ConsoleColor, ConsoleConfig, ContentBox, Effect, Error, HyperLink,
        LogLevel, Padding, Renderable, Result, TextStyle,
    };

    pub use crate::{core, render, runtime, style, text, widgets};
}

pub use orbit_core as core;
pub use orbit_render as render;
pub use orbit_runtime as runtime;
pub use orbit_style as style;
pub use orbit_text as text;
pub use orbit_widgets as widgets;
