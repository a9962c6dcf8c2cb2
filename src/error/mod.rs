// Error types for the voice analyzer
//
// Decode failures (the input is not readable audio) and processing failures
// (the numeric pipeline cannot produce a report) are kept as separate enums
// so callers can tell them apart. AnalysisError is the union returned by the
// FeatureExtractor.

mod decode;
mod processing;

use std::fmt;

pub use decode::{log_decode_error, DecodeError, DecodeErrorCodes};
pub use processing::{log_processing_error, ProcessingError, ProcessingErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Failure of a single analysis request
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Decode(DecodeError),
    Processing(ProcessingError),
}

impl AnalysisError {
    /// Log through the component-specific logger
    pub fn log(&self, context: &str) {
        match self {
            AnalysisError::Decode(err) => log_decode_error(err, context),
            AnalysisError::Processing(err) => log_processing_error(err, context),
        }
    }
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::Decode(err) => err.code(),
            AnalysisError::Processing(err) => err.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::Decode(err) => err.message(),
            AnalysisError::Processing(err) => err.message(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Decode(err) => fmt::Display::fmt(err, f),
            AnalysisError::Processing(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Decode(err) => Some(err),
            AnalysisError::Processing(err) => Some(err),
        }
    }
}

impl From<DecodeError> for AnalysisError {
    fn from(err: DecodeError) -> Self {
        AnalysisError::Decode(err)
    }
}

impl From<ProcessingError> for AnalysisError {
    fn from(err: ProcessingError) -> Self {
        AnalysisError::Processing(err)
    }
}
