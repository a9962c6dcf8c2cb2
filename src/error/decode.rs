// Decode error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Decode error code constants
///
/// Single source of truth for the numeric codes carried by [`DecodeError`].
///
/// Error code range: 3001-3005
pub struct DecodeErrorCodes {}

impl DecodeErrorCodes {
    /// Input file could not be opened
    pub const FILE_OPEN: i32 = 3001;

    /// Container format could not be recognized
    pub const PROBE: i32 = 3002;

    /// Container holds no decodable audio track
    pub const NO_AUDIO_TRACK: i32 = 3003;

    /// Audio track does not declare a sample rate
    pub const UNKNOWN_SAMPLE_RATE: i32 = 3004;

    /// Packet could not be read or decoded
    pub const DECODE: i32 = 3005;
}

/// Log a decode error with structured context
pub fn log_decode_error(err: &DecodeError, context: &str) {
    error!(
        "Decode error in {}: code={}, component=Decoder, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while turning an input file into PCM samples
///
/// Every variant means the file is not valid or readable audio.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// File could not be opened for reading
    FileOpen { path: String, reason: String },

    /// No registered container format matched the file contents
    Probe { path: String, reason: String },

    /// The container has no track with a known codec
    NoAudioTrack { path: String },

    /// The audio track does not declare its sample rate
    UnknownSampleRate { path: String },

    /// A packet failed to read or decode
    Decode { path: String, reason: String },
}

impl ErrorCode for DecodeError {
    fn code(&self) -> i32 {
        match self {
            DecodeError::FileOpen { .. } => DecodeErrorCodes::FILE_OPEN,
            DecodeError::Probe { .. } => DecodeErrorCodes::PROBE,
            DecodeError::NoAudioTrack { .. } => DecodeErrorCodes::NO_AUDIO_TRACK,
            DecodeError::UnknownSampleRate { .. } => DecodeErrorCodes::UNKNOWN_SAMPLE_RATE,
            DecodeError::Decode { .. } => DecodeErrorCodes::DECODE,
        }
    }

    fn message(&self) -> String {
        match self {
            DecodeError::FileOpen { path, reason } => {
                format!("Failed to open audio file {}: {}", path, reason)
            }
            DecodeError::Probe { path, reason } => {
                format!("Unrecognized audio format in {}: {}", path, reason)
            }
            DecodeError::NoAudioTrack { path } => {
                format!("No audio track found in {}", path)
            }
            DecodeError::UnknownSampleRate { path } => {
                format!("Sample rate unknown for {}", path)
            }
            DecodeError::Decode { path, reason } => {
                format!("Failed to decode {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecodeError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_codes() {
        let path = "a.wav".to_string();
        assert_eq!(
            DecodeError::FileOpen {
                path: path.clone(),
                reason: "x".to_string()
            }
            .code(),
            3001
        );
        assert_eq!(
            DecodeError::Probe {
                path: path.clone(),
                reason: "x".to_string()
            }
            .code(),
            3002
        );
        assert_eq!(DecodeError::NoAudioTrack { path: path.clone() }.code(), 3003);
        assert_eq!(
            DecodeError::UnknownSampleRate { path: path.clone() }.code(),
            3004
        );
        assert_eq!(
            DecodeError::Decode {
                path,
                reason: "x".to_string()
            }
            .code(),
            3005
        );
    }

    #[test]
    fn test_decode_error_display_names_file() {
        let err = DecodeError::Probe {
            path: "/tmp/upload.wav".to_string(),
            reason: "end of stream".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("3002"));
        assert!(rendered.contains("/tmp/upload.wav"));
        assert!(rendered.contains("end of stream"));
    }
}
