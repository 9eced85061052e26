//! # Error Types
//!
//! Structured error types for platform_core. The thickness solver never
//! returns these: an unbuildable platform is a normal [`PlatformCase`], not a
//! fault. `CalcError` covers the layers around it: configuration validation,
//! range expansion and scenario files.
//!
//! ## Example
//!
//! ```rust
//! use platform_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(b_m: f64) -> CalcResult<()> {
//!     if b_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "b_m".to_string(),
//!             value: b_m.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`PlatformCase`]: crate::calculations::PlatformCase

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for platform_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for configuration and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A value range cannot be expanded into a list of values
    #[error("Invalid range: {reason}")]
    InvalidRange { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File extension is not a known scenario format
    #[error("Unsupported file format: '{path}' (expected .json or .toml)")]
    UnsupportedFormat { path: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidRange error
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        CalcError::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidRange { .. } => "INVALID_RANGE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("b_m", "-1.0", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_range("step is zero").error_code(), "INVALID_RANGE");
        assert_eq!(
            CalcError::UnsupportedFormat { path: "a.xlsx".into() }.error_code(),
            "UNSUPPORTED_FORMAT"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::file_error("open", "scenario.json", "not found");
        assert_eq!(error.to_string(), "File error: open on 'scenario.json' - not found");
    }
}
