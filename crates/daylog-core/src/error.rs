//! Error types for Daylog

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Daylog configuration operations.
///
/// Emitting a line never produces one of these: file failures during a log
/// call are reported on the logger's diagnostic stream instead.
#[derive(Error, Debug)]
pub enum LogError {
    /// Output directory could not be used (e.g. a regular file occupies the path)
    #[error("Configuration error for {}: {reason}", path.display())]
    Configuration {
        /// The rejected path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Severity name did not match any known level
    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    /// Header field name is not registered
    #[error("Unknown header field: {0}")]
    UnknownField(String),

    /// Format scheme name is not registered
    #[error("Unknown format scheme: {0}")]
    UnknownScheme(String),

    /// Timestamp pattern contains an invalid specifier
    #[error("Invalid timestamp pattern: {0}")]
    InvalidPattern(String),

    /// Settings store content is malformed
    #[error("Settings error: {0}")]
    Settings(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be (de)serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogError::UnknownSeverity("LOUD".to_string());
        assert_eq!(format!("{}", err), "Unknown severity: LOUD");

        let err = LogError::Configuration {
            path: PathBuf::from("logs"),
            reason: "not a directory".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error for logs: not a directory");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LogError = io_err.into();
        assert!(matches!(err, LogError::Io(_)));
    }
}
