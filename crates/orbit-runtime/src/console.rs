#![forbid(unsafe_code)]

//! The console facade used by command implementations.
//!
//! A [`Console`] ties the pieces together: the terminal session guard, the
//! style-diffing render target and the live region. On a terminal without
//! ANSI support (or with animation disabled) it degrades to plain,
//! indented lines and never moves the cursor.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use orbit_core::config::{ConsoleConfig, LogLevel};
use orbit_core::screen_size::{ScreenSize, TerminalScreen};
use orbit_core::terminal_capabilities::{TerminalCapabilities, detect_ansi_support};
use orbit_core::terminal_session::{OutputStream, SessionOptions, TerminalSession};
use orbit_render::{RenderCaps, RenderTarget};
use orbit_style::{Color, ConsoleColor, Effect, TextStyle};
use orbit_widgets::Renderable;

use crate::animation::{Animation, AnimationOptions};

/// Prefix and style for committed log lines.
fn level_decoration(level: LogLevel) -> (&'static str, TextStyle) {
    match level {
        LogLevel::Warn => ("warning: ", TextStyle::fore(ConsoleColor::Yellow)),
        LogLevel::Error => (
            "error: ",
            TextStyle::new(
                Some(Color::DEFAULT.with_fore(ConsoleColor::BrightRed)),
                Some(Effect::BOLD),
            ),
        ),
        _ => ("", TextStyle::UNSPECIFIED),
    }
}

pub struct Console<W: Write + Send + 'static = io::Stdout> {
    animation: Animation<W>,
    session: Mutex<Option<TerminalSession>>,
    config: ConsoleConfig,
    caps: RenderCaps,
    animated: bool,
    /// Group depth in plain mode.
    plain_depth: AtomicUsize,
    closed: AtomicBool,
}

impl Console<io::Stdout> {
    /// Console on stdout, with capabilities detected from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal session cannot be set up.
    pub fn stdout(config: ConsoleConfig) -> io::Result<Self> {
        let (ansi, token) = detect_ansi_support();
        let detected = TerminalCapabilities {
            ansi,
            ..TerminalCapabilities::detect()
        };
        let caps = RenderCaps::negotiate(&detected, &config);
        let session = TerminalSession::new(
            SessionOptions {
                stream: OutputStream::Stdout,
                ansi: caps.ansi,
                progress: caps.progress,
                handle_signals: true,
            },
            token,
        )?;
        let console = Self::new(io::stdout(), caps, Arc::new(TerminalScreen), config);
        *console.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(console)
    }
}

impl<W: Write + Send + 'static> Console<W> {
    pub fn new(out: W, caps: RenderCaps, size: Arc<dyn ScreenSize>, config: ConsoleConfig) -> Self {
        let options = AnimationOptions::from_config(&config);
        Self::with_options(out, caps, size, config, options)
    }

    /// Like [`new`](Self::new) with explicit animation options.
    pub fn with_options(
        out: W,
        caps: RenderCaps,
        size: Arc<dyn ScreenSize>,
        config: ConsoleConfig,
        options: AnimationOptions,
    ) -> Self {
        let animated = caps.ansi && config.animation;
        orbit_core::debug!(
            ansi = caps.ansi,
            colors = caps.colors,
            animated,
            "console created"
        );
        Self {
            animation: Animation::new(out, caps, size, options),
            session: Mutex::new(None),
            config,
            caps,
            animated,
            plain_depth: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn caps(&self) -> RenderCaps {
        self.caps
    }

    /// Whether log events drive the live region.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn animation(&self) -> &Animation<W> {
        &self.animation
    }

    /// Current screen width in columns.
    pub fn width(&self) -> usize {
        self.animation.columns()
    }

    /// Columns available to content; ANSI output keeps the last column free.
    fn usable_width(&self) -> usize {
        let columns = self.width();
        if self.caps.ansi {
            columns.saturating_sub(1).max(1)
        } else {
            columns
        }
    }

    /// Print `tree`, reflowed to the screen width.
    ///
    /// While the live region is shown the output always ends on a new line
    /// so the region can be redrawn below it.
    pub fn display(&self, tree: &Renderable, new_line: bool) {
        if self.is_closed() {
            return;
        }
        let fitted = tree.fit_to_width(self.usable_width());
        let width = fitted.width().min(self.usable_width());
        let rows = fitted.height();
        let _span = orbit_core::debug_span!("console_display", rows, width).entered();
        self.animation.write_above(|target, live| {
            for row in 0..rows {
                fitted.paint_row(row, width, target);
                target.set_style(&TextStyle::UNSPECIFIED);
                if row + 1 < rows {
                    target.new_line();
                }
            }
            if new_line || live {
                target.new_line();
            }
        });
    }

    /// Handle one log event.
    ///
    /// `Some(text)` with `is_open_group` opens a nested group, `Some(text)`
    /// alone replaces the current line, and `None` closes the innermost
    /// group. Lines below the configured minimum level are dropped; group
    /// opens and closes are never filtered so nesting stays balanced.
    pub fn on_log(&self, level: LogLevel, text: Option<&str>, is_open_group: bool) {
        if self.is_closed() {
            return;
        }
        let is_line = text.is_some() && !is_open_group;
        if is_line && level < self.config.min_level {
            orbit_core::trace!(%level, "log line below minimum level");
            return;
        }
        if !self.animated {
            self.plain_log(level, text, is_open_group);
            return;
        }
        if let Some(line) = text.filter(|_| is_line && level >= LogLevel::Warn) {
            self.commit(level, line);
        }
        self.animation.on_log(text, is_open_group);
    }

    /// Replace the header shown at the top of the live region.
    pub fn set_header(&self, header: Renderable) {
        self.animation.set_header(Some(header));
    }

    /// Hide the live region and restore the terminal. Idempotent.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.animation.hide();
        let session = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut session) = session {
            session.close();
        }
        orbit_core::debug!("console closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Write a warning or error above the live region so it stays in the
    /// scrollback.
    fn commit(&self, level: LogLevel, text: &str) {
        let (prefix, style) = level_decoration(level);
        self.animation.write_above(|target, _| {
            write_decorated(target, "", prefix, text, &style);
        });
    }

    fn plain_log(&self, level: LogLevel, text: Option<&str>, is_open_group: bool) {
        let Some(text) = text else {
            let _ = self
                .plain_depth
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |d| d.checked_sub(1));
            return;
        };
        let indent = "  ".repeat(self.plain_depth.load(Ordering::Acquire));
        let (prefix, style) = level_decoration(level);
        self.animation.write_above(|target, _| {
            write_decorated(target, &indent, prefix, text, &style);
        });
        if is_open_group {
            self.plain_depth.fetch_add(1, Ordering::AcqRel);
        }
    }
}

impl<W: Write + Send + 'static> Drop for Console<W> {
    fn drop(&mut self) {
        self.close();
    }
}

fn write_decorated<W: Write>(
    target: &mut RenderTarget<W>,
    indent: &str,
    prefix: &str,
    text: &str,
    style: &TextStyle,
) {
    target.ensure_line_start();
    for line in text.lines() {
        target.write_str(indent);
        target.set_style(style);
        target.write_str(prefix);
        target.write_str(line);
        target.set_style(&TextStyle::UNSPECIFIED);
        target.new_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedSink;
    use orbit_core::screen_size::FixedScreen;

    fn plain_console() -> (Console<SharedSink>, SharedSink) {
        let sink = SharedSink::new();
        let console = Console::new(
            sink.clone(),
            RenderCaps::PLAIN,
            Arc::new(FixedScreen::new(40)),
            ConsoleConfig::default(),
        );
        (console, sink)
    }

    #[test]
    fn plain_mode_is_not_animated() {
        let (console, _) = plain_console();
        assert!(!console.is_animated());
        assert_eq!(console.width(), 40);
    }

    #[test]
    fn plain_log_indents_groups() {
        let (console, sink) = plain_console();
        console.on_log(LogLevel::Info, Some("build"), true);
        console.on_log(LogLevel::Info, Some("step1"), false);
        console.on_log(LogLevel::Warn, Some("slow"), false);
        console.on_log(LogLevel::Info, None, false);
        console.on_log(LogLevel::Error, Some("failed"), false);
        assert_eq!(
            sink.text(),
            "build\n  step1\n  warning: slow\nerror: failed\n"
        );
        assert!(!console.animation().is_visible());
    }

    #[test]
    fn plain_log_after_partial_display_starts_a_new_line() {
        let (console, sink) = plain_console();
        console.display(&Renderable::text("prompt>"), false);
        console.on_log(LogLevel::Info, Some("building"), false);
        assert_eq!(sink.text(), "prompt>\nbuilding\n");
    }

    #[test]
    fn lines_below_minimum_level_are_dropped() {
        let (console, sink) = plain_console();
        console.on_log(LogLevel::Debug, Some("noise"), false);
        console.on_log(LogLevel::Trace, Some("group"), true);
        console.on_log(LogLevel::Debug, Some("noise"), false);
        console.on_log(LogLevel::Trace, None, false);
        assert_eq!(sink.text(), "group\n");
    }

    #[test]
    fn display_pads_rows_to_tree_width() {
        let (console, sink) = plain_console();
        console.display(&Renderable::text("a\nbb"), false);
        assert_eq!(sink.text(), "a \nbb");
        sink.clear();
        console.display(&Renderable::text("hello"), true);
        assert_eq!(sink.text(), "hello\n");
    }

    #[test]
    fn display_reflows_to_screen_width() {
        let sink = SharedSink::new();
        let console = Console::new(
            sink.clone(),
            RenderCaps::PLAIN,
            Arc::new(FixedScreen::new(20)),
            ConsoleConfig::default(),
        );
        console.display(
            &Renderable::text("every repository was tagged and pushed"),
            true,
        );
        assert_eq!(
            sink.text(),
            "every repository was\ntagged and pushed   \n"
        );
    }

    #[test]
    fn close_is_idempotent_and_silences_output() {
        let (console, sink) = plain_console();
        console.close();
        console.close();
        assert!(console.is_closed());
        console.on_log(LogLevel::Error, Some("late"), false);
        console.display(&Renderable::text("late"), true);
        assert!(sink.is_empty());
    }
}
