//! Severity levels and their console colors.
//!
//! Ranks run from 0 (most urgent) to 6 and are strictly increasing across
//! the table. A message passes a logger's threshold when its rank is less
//! than or equal to the threshold's rank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// ANSI foreground color used when a line is written to a color console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    /// The SGR parameter for this color (`ESC[<code>m`).
    pub const fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::Gray => 90,
        }
    }

    /// Wrap `text` in this color's escape sequence and a reset.
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.code(), text)
    }
}

/// Urgency of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Success,
    Info,
    Debug,
    Trace,
}

impl Severity {
    /// Every severity, most urgent first.
    pub const ALL: [Severity; 7] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Success,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            Severity::Fatal => 0,
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Success => 3,
            Severity::Info => 4,
            Severity::Debug => 5,
            Severity::Trace => 6,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Success => "SUCCESS",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        }
    }

    /// Default display color for this severity.
    pub const fn color(self) -> Color {
        match self {
            Severity::Fatal => Color::Magenta,
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Success => Color::Green,
            Severity::Info => Color::Cyan,
            Severity::Debug => Color::Blue,
            Severity::Trace => Color::Gray,
        }
    }

    /// Whether a message of this severity passes `threshold`.
    pub const fn enabled(self, threshold: Severity) -> bool {
        self.rank() <= threshold.rank()
    }

    /// Case-insensitive, whitespace-trimmed lookup. `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Severity> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn from_rank(rank: u8) -> Option<Severity> {
        Self::ALL.get(rank as usize).copied()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::from_name(s).ok_or_else(|| LogError::UnknownSeverity(s.trim().to_string()))
    }
}

impl TryFrom<String> for Severity {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.name().to_string()
    }
}
