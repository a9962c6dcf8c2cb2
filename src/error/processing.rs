// Processing error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Processing error code constants
///
/// Error code range: 4001-4007
pub struct ProcessingErrorCodes {}

impl ProcessingErrorCodes {
    /// Signal contains no samples
    pub const EMPTY_SIGNAL: i32 = 4001;

    /// Every sample is zero
    pub const SILENT_SIGNAL: i32 = 4002;

    /// A sample is NaN or infinite
    pub const NON_FINITE_SAMPLE: i32 = 4003;

    /// Sample rate cannot resolve the pitch search band
    pub const INVALID_SAMPLE_RATE: i32 = 4004;

    /// A reduced feature came out NaN or infinite
    pub const NON_FINITE_FEATURE: i32 = 4005;

    /// Analyzer configuration is inconsistent
    pub const INVALID_CONFIG: i32 = 4006;

    /// Temporary storage for an upload could not be created
    pub const TEMP_FILE: i32 = 4007;
}

/// Log a processing error with structured context
pub fn log_processing_error(err: &ProcessingError, context: &str) {
    error!(
        "Processing error in {}: code={}, component=FeatureExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the numeric pipeline on degenerate input
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    /// Zero-length signal; duration and every mean would be undefined
    EmptySignal,

    /// All samples are zero; pitch and spectral shape are undefined
    SilentSignal { sample_count: usize },

    /// NaN or infinite sample at `index`
    NonFiniteSample { index: usize },

    /// Sample rate too low (or zero) for the configured pitch band
    InvalidSampleRate { sample_rate: u32, reason: String },

    /// Reduction of `feature` produced a NaN or infinite value
    NonFiniteFeature { feature: String },

    /// Analyzer configuration rejected by validation
    InvalidConfig { reason: String },

    /// Temporary upload file could not be written
    TempFile { reason: String },
}

impl ErrorCode for ProcessingError {
    fn code(&self) -> i32 {
        match self {
            ProcessingError::EmptySignal => ProcessingErrorCodes::EMPTY_SIGNAL,
            ProcessingError::SilentSignal { .. } => ProcessingErrorCodes::SILENT_SIGNAL,
            ProcessingError::NonFiniteSample { .. } => ProcessingErrorCodes::NON_FINITE_SAMPLE,
            ProcessingError::InvalidSampleRate { .. } => ProcessingErrorCodes::INVALID_SAMPLE_RATE,
            ProcessingError::NonFiniteFeature { .. } => ProcessingErrorCodes::NON_FINITE_FEATURE,
            ProcessingError::InvalidConfig { .. } => ProcessingErrorCodes::INVALID_CONFIG,
            ProcessingError::TempFile { .. } => ProcessingErrorCodes::TEMP_FILE,
        }
    }

    fn message(&self) -> String {
        match self {
            ProcessingError::EmptySignal => "Audio signal is empty (0 samples)".to_string(),
            ProcessingError::SilentSignal { sample_count } => {
                format!("Audio signal is silent ({} zero samples)", sample_count)
            }
            ProcessingError::NonFiniteSample { index } => {
                format!("Non-finite sample at index {}", index)
            }
            ProcessingError::InvalidSampleRate {
                sample_rate,
                reason,
            } => {
                format!("Invalid sample rate {} Hz: {}", sample_rate, reason)
            }
            ProcessingError::NonFiniteFeature { feature } => {
                format!("Feature '{}' is not finite", feature)
            }
            ProcessingError::InvalidConfig { reason } => {
                format!("Invalid analyzer config: {}", reason)
            }
            ProcessingError::TempFile { reason } => {
                format!("Failed to stage upload: {}", reason)
            }
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessingError (code {}): {}",
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ProcessingError {}

impl From<std::io::Error> for ProcessingError {
    fn from(err: std::io::Error) -> Self {
        ProcessingError::TempFile {
            reason: err.to_string(),
        }
    }
}
