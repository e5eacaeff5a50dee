#![forbid(unsafe_code)]

//! Terminal capability detection.
//!
//! Detection is environment-driven and one-shot: the console asks once at
//! construction whether ANSI output is supported and receives an opaque
//! [`RestoreToken`] capturing the console mode it found. The token is handed
//! back unchanged at teardown (see [`crate::terminal_session`]).
//!
//! A failed or negative detection never reaches the layout or paint code; it
//! only switches the console to its plain-text fallback.

use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Default)]
struct DetectInputs {
    stdout_is_tty: bool,
    term: String,
    term_program: String,
    wt_session: bool,
    conemu_ansi: bool,
    in_tmux: bool,
    in_screen: bool,
    in_zellij: bool,
    force_ansi: Option<bool>,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            stdout_is_tty: std::io::stdout().is_terminal(),
            term: env::var("TERM").unwrap_or_default(),
            term_program: env::var("TERM_PROGRAM").unwrap_or_default(),
            wt_session: env::var("WT_SESSION").is_ok(),
            conemu_ansi: env::var("ConEmuANSI").is_ok_and(|v| v == "ON"),
            in_tmux: env::var("TMUX").is_ok(),
            in_screen: env::var("STY").is_ok(),
            in_zellij: env::var("ZELLIJ").is_ok(),
            force_ansi: env::var("ORBIT_FORCE_ANSI")
                .ok()
                .map(|v| v.trim() == "1"),
        }
    }
}

/// Terminal programs known to render OSC 8 hyperlinks.
const HYPERLINK_TERMINALS: &[&str] = &[
    "iTerm.app",
    "WezTerm",
    "Ghostty",
    "kitty",
    "vscode",
    "Hyper",
    "Rio",
];

/// Terminal programs known to understand the OSC 9;4 progress indicator.
const PROGRESS_TERMINALS: &[&str] = &["WezTerm", "Ghostty"];

/// What the attached terminal can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// ANSI/VT100 escape sequences are interpreted.
    pub ansi: bool,
    /// OSC 8 hyperlinks are rendered.
    pub osc8_hyperlinks: bool,
    /// OSC 9;4 progress indicator is understood.
    pub progress_indicator: bool,
    /// Running inside tmux, GNU screen or Zellij.
    pub in_mux: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self::basic()
    }
}

impl TerminalCapabilities {
    /// Detect capabilities from the environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from_inputs(&DetectInputs::from_env())
    }

    fn detect_from_inputs(env: &DetectInputs) -> Self {
        let term = env.term.as_str();
        let term_program = env.term_program.as_str();
        let in_mux = env.in_tmux || env.in_screen || env.in_zellij;

        let is_dumb = term == "dumb" || (term.is_empty() && !env.wt_session && !env.conemu_ansi);
        let ansi = env
            .force_ansi
            .unwrap_or(env.stdout_is_tty && !is_dumb && platform_ansi_ok());

        let osc8_hyperlinks = ansi
            && !in_mux
            && (env.wt_session || HYPERLINK_TERMINALS.iter().any(|t| term_program.contains(t)));

        let progress_indicator = ansi
            && !in_mux
            && (env.wt_session
                || env.conemu_ansi
                || PROGRESS_TERMINALS.iter().any(|t| term_program.contains(t)));

        Self {
            ansi,
            osc8_hyperlinks,
            progress_indicator,
            in_mux,
        }
    }

    /// Plain output, no escape sequences at all.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            ansi: false,
            osc8_hyperlinks: false,
            progress_indicator: false,
            in_mux: false,
        }
    }

    /// ANSI colors and cursor control, no optional OSC extensions.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            ansi: true,
            osc8_hyperlinks: false,
            progress_indicator: false,
            in_mux: false,
        }
    }

    /// Everything enabled.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            ansi: true,
            osc8_hyperlinks: true,
            progress_indicator: true,
            in_mux: false,
        }
    }
}

#[cfg(windows)]
fn platform_ansi_ok() -> bool {
    crossterm::ansi_support::supports_ansi()
}

#[cfg(not(windows))]
fn platform_ansi_ok() -> bool {
    true
}

/// Console mode captured at detection time.
///
/// Opaque to callers: obtain it from [`detect_ansi_support`] and hand it back
/// to [`crate::terminal_session::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreToken {
    pub(crate) raw_mode: bool,
}

/// One-shot capability bootstrap.
///
/// Returns whether ANSI output is supported, plus a token describing the
/// console mode to restore at teardown. The token is `None` when the mode
/// could not be queried (for example when stdout is not a terminal).
pub fn detect_ansi_support() -> (bool, Option<RestoreToken>) {
    let caps = TerminalCapabilities::detect();
    let token = crossterm::terminal::is_raw_mode_enabled()
        .ok()
        .map(|raw_mode| RestoreToken { raw_mode });
    crate::debug!(ansi = caps.ansi, has_token = token.is_some(), "ansi support detected");
    (caps.ansi, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty(term: &str) -> DetectInputs {
        DetectInputs {
            stdout_is_tty: true,
            term: term.to_string(),
            ..DetectInputs::default()
        }
    }

    #[test]
    fn dumb_terminal_has_no_ansi() {
        let caps = TerminalCapabilities::detect_from_inputs(&tty("dumb"));
        assert!(!caps.ansi);
        assert!(!caps.osc8_hyperlinks);
    }

    #[test]
    fn redirected_stdout_has_no_ansi() {
        let mut env = tty("xterm-256color");
        env.stdout_is_tty = false;
        assert!(!TerminalCapabilities::detect_from_inputs(&env).ansi);
    }

    #[test]
    fn force_flag_wins() {
        let mut env = tty("dumb");
        env.force_ansi = Some(true);
        assert!(TerminalCapabilities::detect_from_inputs(&env).ansi);
    }

    #[cfg(not(windows))]
    #[test]
    fn modern_terminal_gets_extensions() {
        let mut env = tty("xterm-256color");
        env.term_program = "WezTerm".to_string();
        let caps = TerminalCapabilities::detect_from_inputs(&env);
        assert!(caps.ansi);
        assert!(caps.osc8_hyperlinks);
        assert!(caps.progress_indicator);
    }

    #[cfg(not(windows))]
    #[test]
    fn multiplexer_disables_osc_extensions() {
        let mut env = tty("screen-256color");
        env.term_program = "WezTerm".to_string();
        env.in_tmux = true;
        let caps = TerminalCapabilities::detect_from_inputs(&env);
        assert!(caps.ansi);
        assert!(caps.in_mux);
        assert!(!caps.osc8_hyperlinks);
        assert!(!caps.progress_indicator);
    }

    #[test]
    fn presets() {
        assert!(!TerminalCapabilities::basic().ansi);
        assert!(TerminalCapabilities::ansi().ansi);
        assert!(TerminalCapabilities::full().progress_indicator);
    }
}
