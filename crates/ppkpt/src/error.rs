//! Error types for ppkpt.
//!
//! This module defines all error types used throughout the ppkpt crate,
//! providing detailed context for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ppkpt operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Snapshot storage errors ===
    /// A storage slot exists but could not be read.
    #[error("failed to read slot '{key}': {source}")]
    SlotRead {
        /// Name of the slot.
        key: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A storage slot could not be written.
    #[error("failed to write slot '{key}': {source}")]
    SlotWrite {
        /// Name of the slot.
        key: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Report errors ===
    /// No report matches the given id.
    #[error("no report with id '{id}'")]
    ReportNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// An attachment file could not be read from disk.
    #[error("failed to read attachment {path}: {source}")]
    AttachmentRead {
        /// Path that couldn't be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A stored attachment payload failed to decode.
    #[error("attachment '{name}' has an undecodable payload: {source}")]
    AttachmentDecode {
        /// Name of the attachment.
        name: String,
        /// The underlying error.
        #[source]
        source: base64::DecodeError,
    },

    // === Configuration errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Analysis errors ===
    /// The analysis request could not be sent or read.
    #[error("analysis request failed: {0}")]
    AnalysisRequest(#[from] reqwest::Error),

    /// The analysis service produced no usable assessment.
    #[error("analysis unavailable: {message}")]
    AnalysisUnavailable {
        /// What went wrong.
        message: String,
    },

    // === Session errors ===
    /// A command that needs the admin session was run without one.
    #[error("administrator login required")]
    LoginRequired,

    // === I/O & serialization errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ppkpt operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an analysis-unavailable error.
    #[must_use]
    pub fn analysis_unavailable(message: impl Into<String>) -> Self {
        Self::AnalysisUnavailable {
            message: message.into(),
        }
    }

    /// Create a slot read error.
    #[must_use]
    pub fn slot_read(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::SlotRead {
            key: key.into(),
            source,
        }
    }

    /// Create a slot write error.
    #[must_use]
    pub fn slot_write(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::SlotWrite {
            key: key.into(),
            source,
        }
    }

    /// Check if this error means a looked-up report does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ReportNotFound { .. })
    }

    /// Check if this error means the admin session is missing.
    #[must_use]
    pub fn is_login_required(&self) -> bool {
        matches!(self, Self::LoginRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ReportNotFound {
            id: "REP-123456".to_string(),
        };
        assert_eq!(err.to_string(), "no report with id 'REP-123456'");

        let err = Error::LoginRequired;
        assert_eq!(err.to_string(), "administrator login required");
    }

    #[test]
    fn test_error_is_not_found() {
        let err = Error::ReportNotFound {
            id: "REP-1".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!Error::LoginRequired.is_not_found());
    }

    #[test]
    fn test_error_is_login_required() {
        assert!(Error::LoginRequired.is_login_required());
        assert!(!Error::analysis_unavailable("x").is_login_required());
    }

    #[test]
    fn test_analysis_unavailable_display() {
        let err = Error::analysis_unavailable("service returned 503");
        assert_eq!(
            err.to_string(),
            "analysis unavailable: service returned 503"
        );
    }

    #[test]
    fn test_slot_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::slot_read("ppkpt_reports", io_err);
        let msg = err.to_string();
        assert!(msg.contains("ppkpt_reports"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "empty model".to_string(),
        };
        assert!(err.to_string().contains("empty model"));
    }
}
