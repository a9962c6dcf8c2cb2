//! Analyzer configuration
//!
//! Every threshold and framing parameter used by the feature pipeline lives
//! here with defaults equal to the named constants in the analysis modules.
//! A JSON file can override them for experimentation; the file is validated
//! before the extractor accepts it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::classifier::GENDER_THRESHOLD_HZ;
use crate::analysis::features::{FRAME_LENGTH, HOP_LENGTH, ROLLOFF_PERCENT};
use crate::analysis::pitch::{
    PITCH_FMAX_HZ, PITCH_FMIN_HZ, YIN_FRAME_LENGTH, YIN_HOP_LENGTH, YIN_TROUGH_THRESHOLD,
    YIN_WIN_LENGTH,
};
use crate::error::ProcessingError;

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub framing: FramingConfig,
    #[serde(default)]
    pub pitch: PitchConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
}

/// Framing for RMS, ZCR and the STFT behind the spectral features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Frame length in samples; also the FFT size and Hann window length
    pub frame_length: usize,
    /// Hop between consecutive frame starts
    pub hop_length: usize,
    /// Fraction of spectral magnitude below the rolloff frequency
    pub rolloff_percent: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            frame_length: FRAME_LENGTH,
            hop_length: HOP_LENGTH,
            rolloff_percent: ROLLOFF_PERCENT,
        }
    }
}

/// YIN pitch tracker parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Lowest fundamental frequency searched (Hz)
    pub fmin_hz: f32,
    /// Highest fundamental frequency searched (Hz)
    pub fmax_hz: f32,
    pub frame_length: usize,
    /// Integration window of the difference function
    pub win_length: usize,
    pub hop_length: usize,
    /// Absolute threshold on the normalized difference for trough picking
    pub trough_threshold: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            fmin_hz: PITCH_FMIN_HZ,
            fmax_hz: PITCH_FMAX_HZ,
            frame_length: YIN_FRAME_LENGTH,
            win_length: YIN_WIN_LENGTH,
            hop_length: YIN_HOP_LENGTH,
            trough_threshold: YIN_TROUGH_THRESHOLD,
        }
    }
}

/// Gender decision parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Mean pitch strictly above this value is classified Female
    pub gender_threshold_hz: f32,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            gender_threshold_hz: GENDER_THRESHOLD_HZ,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    ///
    /// Falls back to the default configuration (with a warning) when the
    /// file is missing or is not valid JSON. Validation is left to
    /// [`AnalyzerConfig::validate`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Reject parameter combinations the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ProcessingError> {
        let invalid = |reason: String| Err(ProcessingError::InvalidConfig { reason });

        let framing = &self.framing;
        if framing.frame_length < 2 {
            return invalid(format!(
                "framing.frame_length must be at least 2 (got {})",
                framing.frame_length
            ));
        }
        if framing.hop_length == 0 || framing.hop_length > framing.frame_length {
            return invalid(format!(
                "framing.hop_length must be in 1..={} (got {})",
                framing.frame_length, framing.hop_length
            ));
        }
        if !(framing.rolloff_percent > 0.0 && framing.rolloff_percent <= 1.0) {
            return invalid(format!(
                "framing.rolloff_percent must be in (0, 1] (got {})",
                framing.rolloff_percent
            ));
        }

        let pitch = &self.pitch;
        if !(pitch.fmin_hz > 0.0 && pitch.fmin_hz < pitch.fmax_hz) {
            return invalid(format!(
                "pitch band must satisfy 0 < fmin < fmax (got {}..{})",
                pitch.fmin_hz, pitch.fmax_hz
            ));
        }
        if pitch.win_length == 0 || pitch.win_length >= pitch.frame_length {
            return invalid(format!(
                "pitch.win_length must be in 1..{} (got {})",
                pitch.frame_length, pitch.win_length
            ));
        }
        if pitch.hop_length == 0 {
            return invalid("pitch.hop_length must be positive".to_string());
        }
        if !(pitch.trough_threshold > 0.0 && pitch.trough_threshold < 1.0) {
            return invalid(format!(
                "pitch.trough_threshold must be in (0, 1) (got {})",
                pitch.trough_threshold
            ));
        }

        if !self.classification.gender_threshold_hz.is_finite() {
            return invalid("classification.gender_threshold_hz must be finite".to_string());
        }

        Ok(())
    }
}
