//! Error types for the comparison engine.
//!
//! Every failure is deterministic: the engine has no network or external
//! process dependency, so the same two input files always produce the same
//! error. Error messages carry file and column context but never record
//! values.

use std::path::Path;

use thiserror::Error;

/// Main error type for SynthGuard operations.
#[derive(Debug, Error)]
pub enum SynthGuardError {
    /// Reading a dataset file failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Delimited input could not be decoded
    #[error("Failed to parse delimited input: {context}")]
    Parse {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// Original and synthetic records cannot be compared column by column
    #[error("Schema mismatch: {reason}")]
    SchemaMismatch { reason: String },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with SynthGuardError
pub type Result<T> = std::result::Result<T, SynthGuardError>;

impl SynthGuardError {
    /// Creates an I/O error naming the file that could not be read or written
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            context: format!("Failed to access {}", path.display()),
            source,
        }
    }

    /// Creates a parse error naming the offending file
    pub fn parse(path: &Path, source: csv::Error) -> Self {
        Self::Parse {
            context: format!("Malformed record in {}", path.display()),
            source,
        }
    }

    /// Creates a schema mismatch error
    pub fn schema_mismatch(reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Returns true when the error reports incompatible record schemas.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = SynthGuardError::io(&PathBuf::from("/data/original.csv"), source);

        assert!(error.to_string().contains("/data/original.csv"));
        assert!(matches!(error, SynthGuardError::Io { .. }));
    }

    #[test]
    fn test_error_creation() {
        let error = SynthGuardError::configuration("histogram_bins must be positive");
        assert!(error.to_string().contains("histogram_bins must be positive"));

        let error = SynthGuardError::schema_mismatch("column 'salary' missing");
        assert!(error.to_string().contains("column 'salary' missing"));
        assert!(error.is_schema_mismatch());
    }

    #[test]
    fn test_non_schema_errors_are_not_mismatches() {
        let error = SynthGuardError::configuration("bad");
        assert!(!error.is_schema_mismatch());
    }
}
