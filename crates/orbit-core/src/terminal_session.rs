#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] owns the console state captured at start-up and puts it
//! back on teardown, whether that happens through [`TerminalSession::close`],
//! `Drop`, a panic, or a termination signal.
//!
//! # Cleanup Order
//!
//! 1. Clear the progress indicator (if it may have been set)
//! 2. Reset colors (`CSI 39 m`, `CSI 49 m`)
//! 3. Show cursor (`CSI ? 25 h`)
//! 4. Hand the [`RestoreToken`] back to [`restore`]
//! 5. Flush
//!
//! Closing is idempotent and safe even if nothing was ever painted.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::terminal_capabilities::RestoreToken;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

const RESET_COLORS: &[u8] = b"\x1b[39m\x1b[49m";
const CURSOR_SHOW: &[u8] = b"\x1b[?25h";
const PROGRESS_OFF: &[u8] = b"\x1b]9;4;0;\x1b\\";

/// Stream the console paints on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStream {
    #[default]
    Stdout,
    Stderr,
}

impl OutputStream {
    fn write_all(self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Self::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(bytes)?;
                err.flush()
            }
        }
    }

    fn encode(self) -> u8 {
        match self {
            Self::Stdout => STREAM_STDOUT,
            Self::Stderr => STREAM_STDERR,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Stream to write the cleanup sequences to.
    pub stream: OutputStream,
    /// Whether escape sequences may be written at all.
    pub ansi: bool,
    /// Whether the progress indicator may have been turned on.
    pub progress: bool,
    /// Install SIGINT/SIGTERM handlers that restore the terminal before exiting.
    pub handle_signals: bool,
}

/// Restores the console state captured at construction.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    token: Option<RestoreToken>,
    closed: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Start a session.
    ///
    /// `token` is the value returned by
    /// [`detect_ansi_support`](crate::terminal_capabilities::detect_ansi_support)
    /// and is handed back unchanged on close.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handlers cannot be registered.
    pub fn new(options: SessionOptions, token: Option<RestoreToken>) -> io::Result<Self> {
        if options.ansi {
            install_panic_hook(options.stream);
        }

        #[cfg(unix)]
        let signal_guard = if options.handle_signals && options.ansi {
            Some(SignalGuard::new(options.stream)?)
        } else {
            None
        };

        crate::debug!(ansi = options.ansi, "terminal session started");
        Ok(Self {
            options,
            token,
            closed: false,
            #[cfg(unix)]
            signal_guard,
        })
    }

    /// Session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Whether [`close`](Self::close) already ran.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Restore cursor, colors and console mode. Subsequent calls do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        #[cfg(unix)]
        let _ = self.signal_guard.take();

        if self.options.ansi {
            let mut seq = Vec::with_capacity(32);
            if self.options.progress {
                seq.extend_from_slice(PROGRESS_OFF);
            }
            seq.extend_from_slice(RESET_COLORS);
            seq.extend_from_slice(CURSOR_SHOW);
            if let Err(_err) = self.options.stream.write_all(&seq) {
                crate::warn!(error = %_err, "failed to write terminal cleanup sequence");
            }
        }

        if let Some(token) = self.token.take() {
            if let Err(_err) = restore(token) {
                crate::warn!(error = %_err, "failed to restore console mode");
            }
        }
        crate::debug!("terminal session closed");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Put the console mode back the way it was when `token` was captured.
///
/// # Errors
///
/// Returns an error if the console mode cannot be changed.
pub fn restore(token: RestoreToken) -> io::Result<()> {
    let current = crossterm::terminal::is_raw_mode_enabled()?;
    if current != token.raw_mode {
        if token.raw_mode {
            crossterm::terminal::enable_raw_mode()?;
        } else {
            crossterm::terminal::disable_raw_mode()?;
        }
    }
    Ok(())
}

const STREAM_NONE: u8 = 0;
const STREAM_STDOUT: u8 = 1;
const STREAM_STDERR: u8 = 2;

/// Stream the panic hook cleans up; set by the first ANSI session.
static PANIC_STREAM: AtomicU8 = AtomicU8::new(STREAM_NONE);

fn install_panic_hook(stream: OutputStream) {
    PANIC_STREAM.store(stream.encode(), Ordering::Relaxed);
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let stream = match PANIC_STREAM.load(Ordering::Relaxed) {
        STREAM_STDOUT => OutputStream::Stdout,
        STREAM_STDERR => OutputStream::Stderr,
        _ => return,
    };
    let mut seq = Vec::with_capacity(32);
    seq.extend_from_slice(RESET_COLORS);
    seq.extend_from_slice(CURSOR_SHOW);
    let _ = stream.write_all(&seq);
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new(stream: OutputStream) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                crate::warn!(signal, "termination signal received, restoring terminal");
                let _ = stream.write_all(PROGRESS_OFF);
                PANIC_STREAM.store(stream.encode(), Ordering::Relaxed);
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_options_default_is_plain() {
        let opts = SessionOptions::default();
        assert_eq!(opts.stream, OutputStream::Stdout);
        assert!(!opts.ansi);
        assert!(!opts.progress);
        assert!(!opts.handle_signals);
    }

    #[test]
    fn close_is_idempotent_without_output() {
        let mut session =
            TerminalSession::new(SessionOptions::default(), None).expect("plain session");
        assert!(!session.is_closed());
        session.close();
        session.close();
        assert!(session.is_closed());
    }
}
