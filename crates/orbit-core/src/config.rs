#![forbid(unsafe_code)]

//! Console configuration.
//!
//! [`ConsoleConfig`] is a plain options struct with builder setters. It can be
//! seeded from the process environment with [`ConsoleConfig::from_env`], or
//! from any key lookup with [`ConsoleConfig::from_lookup`] so tests never have
//! to touch global state.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `ORBIT_NO_ANIMATION=1` | disable the live region |
//! | `ORBIT_TICK_MS` | repaint period in milliseconds (16..=2000) |
//! | `ORBIT_MAX_DEPTH` | visible dynamic-line cap (1..=32) |
//! | `ORBIT_LOG_LEVEL` | minimum event level shown |
//! | `ORBIT_PROGRESS=0` | disable OSC 9;4 progress reporting |
//! | `NO_COLOR` | suppress SGR colors |

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default repaint period of the animation timer.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Default number of dynamic lines shown below the header.
pub const DEFAULT_MAX_DEPTH: usize = 5;

const TICK_RANGE_MS: (u64, u64) = (16, 2000);
const DEPTH_RANGE: (usize, usize) = (1, 32);

/// Severity of a log event handed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a log level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {:?}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// Options controlling the console and its live region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Keep a live, periodically repainted region at the bottom of the screen.
    pub animation: bool,
    /// Repaint period of the animation timer.
    pub tick: Duration,
    /// Maximum number of dynamic lines painted below the header.
    pub max_depth: usize,
    /// Events below this level are ignored.
    pub min_level: LogLevel,
    /// Emit OSC 9;4 progress indicator sequences while animating.
    pub progress: bool,
    /// Emit SGR color sequences.
    pub colors: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            animation: true,
            tick: DEFAULT_TICK,
            max_depth: DEFAULT_MAX_DEPTH,
            min_level: LogLevel::Info,
            progress: true,
            colors: true,
        }
    }
}

impl ConsoleConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset or malformed values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if flag(&lookup, "ORBIT_NO_ANIMATION") {
            config.animation = false;
        }
        if let Some(ms) = lookup("ORBIT_TICK_MS").and_then(|v| v.trim().parse::<u64>().ok()) {
            config.tick = Duration::from_millis(ms.clamp(TICK_RANGE_MS.0, TICK_RANGE_MS.1));
        }
        if let Some(depth) =
            lookup("ORBIT_MAX_DEPTH").and_then(|v| v.trim().parse::<usize>().ok())
        {
            config.max_depth = depth.clamp(DEPTH_RANGE.0, DEPTH_RANGE.1);
        }
        if let Some(level) = lookup("ORBIT_LOG_LEVEL").and_then(|v| v.parse().ok()) {
            config.min_level = level;
        }
        if lookup("ORBIT_PROGRESS").is_some_and(|v| v.trim() == "0") {
            config.progress = false;
        }
        if lookup("NO_COLOR").is_some() {
            config.colors = false;
        }
        config
    }

    /// Enable or disable the live region.
    #[must_use]
    pub fn animation(mut self, enabled: bool) -> Self {
        self.animation = enabled;
        self
    }

    /// Set the repaint period.
    #[must_use]
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the visible dynamic-line cap (at least one line).
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Set the minimum event level.
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Enable or disable progress indicator sequences.
    #[must_use]
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Enable or disable SGR colors.
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }
}

fn flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).is_some_and(|v| v.trim() == "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ConsoleConfig::from_lookup(|_| None);
        assert_eq!(config, ConsoleConfig::default());
        assert!(config.animation);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn overrides_are_applied_and_clamped() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[
            ("ORBIT_NO_ANIMATION", "1"),
            ("ORBIT_TICK_MS", "5"),
            ("ORBIT_MAX_DEPTH", "99"),
            ("ORBIT_LOG_LEVEL", "Warning"),
            ("ORBIT_PROGRESS", "0"),
            ("NO_COLOR", ""),
        ]));
        assert!(!config.animation);
        assert_eq!(config.tick, Duration::from_millis(16));
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.min_level, LogLevel::Warn);
        assert!(!config.progress);
        assert!(!config.colors);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[
            ("ORBIT_TICK_MS", "soon"),
            ("ORBIT_LOG_LEVEL", "loud"),
            ("ORBIT_NO_ANIMATION", "yes"),
        ]));
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("nope".parse::<LogLevel>().is_err());
    }

    #[test]
    fn builder_keeps_depth_positive() {
        assert_eq!(ConsoleConfig::default().max_depth(0).max_depth, 1);
    }
}
