#![forbid(unsafe_code)]

//! Sources for the usable column count.

use std::sync::atomic::{AtomicU16, Ordering};

/// Columns assumed when the terminal cannot be queried.
pub const FALLBACK_COLUMNS: u16 = 80;

/// Something that can report the current terminal width.
///
/// Sampled by the animation timer on every tick to detect resizes.
pub trait ScreenSize: Send + Sync {
    /// Current usable column count.
    fn columns(&self) -> u16;
}

/// Width of the real terminal, via crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalScreen;

impl ScreenSize for TerminalScreen {
    fn columns(&self) -> u16 {
        match crossterm::terminal::size() {
            Ok((cols, _)) if cols > 0 => cols,
            _ => FALLBACK_COLUMNS,
        }
    }
}

/// A width that only changes when told to. Used for redirected output and tests.
#[derive(Debug)]
pub struct FixedScreen {
    columns: AtomicU16,
}

impl FixedScreen {
    /// Create a fixed-width screen.
    pub fn new(columns: u16) -> Self {
        Self {
            columns: AtomicU16::new(columns.max(1)),
        }
    }

    /// Simulate a resize.
    pub fn resize(&self, columns: u16) {
        self.columns.store(columns.max(1), Ordering::Relaxed);
    }
}

impl ScreenSize for FixedScreen {
    fn columns(&self) -> u16 {
        self.columns.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_screen_resizes() {
        let screen = FixedScreen::new(40);
        assert_eq!(screen.columns(), 40);
        screen.resize(0);
        assert_eq!(screen.columns(), 1);
    }
}
