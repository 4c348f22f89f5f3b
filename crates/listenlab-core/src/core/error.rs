//! ListenLab Error Definitions
//!
//! Defines error types used throughout the engine.

use thiserror::Error;

use super::TimeSec;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Timing Errors
    // =========================================================================
    /// A timing string does not match `HH:MM:SS,mmm`.
    ///
    /// Only raised inside caption block parsing, where it turns into a silent
    /// block skip.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Negative or non-finite seconds handed to the timestamp formatter.
    #[error("Invalid duration: {0} seconds")]
    InvalidDuration(TimeSec),

    // =========================================================================
    // Ingestion Errors
    // =========================================================================
    #[error("Unsupported or corrupt input: {0}")]
    UnsupportedOrCorruptInput(String),

    #[error("Unsupported transcript format: {0}")]
    UnsupportedFormat(String),

    // =========================================================================
    // Segment Errors
    // =========================================================================
    #[error("Invalid segment: {0}")]
    InvalidSegment(String),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Wraps a container-level failure (zip, XML, PDF) with the adapter that hit it.
    pub fn corrupt(source: &str, cause: impl std::fmt::Display) -> Self {
        Self::UnsupportedOrCorruptInput(format!("{source}: {cause}"))
    }

    /// Returns true for failures the caller can recover from by choosing another file.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOrCorruptInput(_) | Self::UnsupportedFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_message_names_source() {
        let err = CoreError::corrupt("docx", "invalid Zip archive");
        assert_eq!(
            err.to_string(),
            "Unsupported or corrupt input: docx: invalid Zip archive"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
        assert!(!err.is_input_error());
    }
}
