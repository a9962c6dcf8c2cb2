// Analysis module - voice feature extraction and classification
//
// This module orchestrates the complete analysis of one recording:
// decode → validate → pitch track + frame features → means → gender.
//
// Architecture:
// - FeatureExtractor: entry point, one call per uploaded file
// - Pipeline: YinTracker (pitch) + FrameFeatureExtractor (RMS, ZCR,
//   spectral shape) → GenderClassifier
// - Output: FeatureReport, consumed by the presentation layer

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::{decode_file, AudioSignal};
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, ProcessingError};

pub mod classifier;
pub mod features;
pub mod pitch;

use classifier::{Gender, GenderClassifier};
use features::{mean, FrameFeatureExtractor};
use pitch::YinTracker;

/// Result of analyzing one recording
///
/// Every frame-wise feature has been reduced to its arithmetic mean; only
/// the pitch track is kept whole, for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Gender label derived from `pitch`
    pub gender: Gender,
    /// Mean fundamental frequency over all frames (Hz)
    pub pitch: f32,
    /// Signal length in seconds
    pub duration: f32,
    /// Mean squared sample amplitude
    pub energy: f32,
    /// Mean frame RMS amplitude
    pub rms: f32,
    /// Mean frame zero-crossing rate
    pub zcr: f32,
    /// Mean spectral centroid (Hz)
    pub centroid: f32,
    /// Mean spectral bandwidth (Hz)
    pub bandwidth: f32,
    /// Mean spectral rolloff (Hz)
    pub rolloff: f32,
    /// Per-frame pitch track (Hz)
    pub pitch_array: Vec<f32>,
}

/// FeatureExtractor runs the fixed analysis pipeline
///
/// Holds only immutable configuration and pre-planned FFTs, so one
/// instance can serve any number of sequential or concurrent requests.
pub struct FeatureExtractor {
    config: AnalyzerConfig,
    frame_features: FrameFeatureExtractor,
    pitch_tracker: YinTracker,
    classifier: GenderClassifier,
}

impl FeatureExtractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self::build(AnalyzerConfig::default())
    }

    /// Create an extractor with a custom configuration
    ///
    /// # Errors
    /// [`ProcessingError::InvalidConfig`] when the configuration fails
    /// validation.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AnalyzerConfig) -> Self {
        Self {
            frame_features: FrameFeatureExtractor::with_framing(&config.framing),
            pitch_tracker: YinTracker::with_config(&config.pitch),
            classifier: GenderClassifier::new(config.classification.gender_threshold_hz),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Decode the file at `path` and analyze it
    ///
    /// # Errors
    /// - [`AnalysisError::Decode`] when the file is not readable audio
    /// - [`AnalysisError::Processing`] when the decoded signal is degenerate
    pub fn extract_from_path(&self, path: &Path) -> Result<FeatureReport, AnalysisError> {
        let signal = decode_file(path)?;
        log::info!(
            "[Analysis] Decoded {} samples at {} Hz ({} channel(s)) from {}",
            signal.len(),
            signal.sample_rate(),
            signal.source_channels(),
            path.display()
        );
        Ok(self.extract_signal(&signal)?)
    }

    /// Analyze an already-decoded signal
    ///
    /// 1. Validate the signal (non-empty, finite, not silent)
    /// 2. Track pitch and average the track
    /// 3. Compute duration and energy over the raw samples
    /// 4. Compute frame features and average each series
    /// 5. Classify gender from mean pitch
    pub fn extract_signal(&self, signal: &AudioSignal) -> Result<FeatureReport, ProcessingError> {
        signal.validate()?;

        let samples = signal.samples();
        let sample_rate = signal.sample_rate();

        let pitch_array = self.pitch_tracker.track(samples, sample_rate)?;
        let pitch = finite("pitch", mean(&pitch_array))?;

        let frames = self.frame_features.extract(samples, sample_rate);
        let means = frames.means();

        let report = FeatureReport {
            gender: self.classifier.classify(pitch),
            pitch,
            duration: finite("duration", signal.duration_seconds())?,
            energy: finite("energy", signal.energy())?,
            rms: finite("rms", means.rms)?,
            zcr: finite("zcr", means.zcr)?,
            centroid: finite("centroid", means.centroid)?,
            bandwidth: finite("bandwidth", means.bandwidth)?,
            rolloff: finite("rolloff", means.rolloff)?,
            pitch_array,
        };

        log::info!(
            "[Analysis] {} voice: pitch={:.2} Hz over {} frames, duration={:.2}s",
            report.gender,
            report.pitch,
            report.pitch_array.len(),
            report.duration
        );
        log::debug!("[Analysis] Report: {:?}", report);

        Ok(report)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(feature: &str, value: f32) -> Result<f32, ProcessingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProcessingError::NonFiniteFeature {
            feature: feature.to_string(),
        })
    }
}

#[cfg(test)]
mod tests;
