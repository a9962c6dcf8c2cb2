// Frame features - DSP feature extraction over centered frames
//
// This module computes the frame-wise loudness and spectral-shape
// descriptors of a voice recording. Every feature is computed on the same
// centered framing so the series line up frame for frame.
//
// Module organization:
// - frames: Centered framing and padding
// - fft: STFT with Hann windowing
// - spectral: Frequency-domain features (centroid, bandwidth, rolloff)
// - temporal: Time-domain features (RMS, ZCR)
// - types: Frame-wise series and their means
// - mod.rs: Coordinator (FrameFeatureExtractor)
//
// Framing (held constant unless overridden through AnalyzerConfig):
// - frame length / FFT size / window length: 2048 samples
// - hop length: 512 samples
// - periodic Hann window, frames centered with half-frame padding
//   (zero padding for STFT and RMS, edge padding for ZCR)

mod fft;
pub mod frames;
mod spectral;
mod temporal;
mod types;

pub use fft::{hann_window, StftProcessor};
pub use spectral::{SpectralFeatures, ROLLOFF_PERCENT};
pub use temporal::{TemporalFeatures, ZCR_ZERO_THRESHOLD};
pub use types::{mean, FeatureMeans, FrameFeatures};

use crate::config::FramingConfig;
use frames::{CenteredFrames, PadMode};

/// Frame length in samples for RMS and ZCR, and the STFT size
pub const FRAME_LENGTH: usize = 2048;

/// Hop between consecutive frames in samples
pub const HOP_LENGTH: usize = 512;

/// FrameFeatureExtractor coordinates the frame-wise DSP pipeline
///
/// Combines STFT processing, spectral feature extraction and temporal
/// feature extraction into a single unified interface.
pub struct FrameFeatureExtractor {
    stft: StftProcessor,
    frame_length: usize,
    hop_length: usize,
    rolloff_percent: f32,
}

impl FrameFeatureExtractor {
    /// Create an extractor with the default framing
    pub fn new() -> Self {
        Self::with_framing(&FramingConfig::default())
    }

    pub fn with_framing(framing: &FramingConfig) -> Self {
        Self {
            stft: StftProcessor::new(framing.frame_length, framing.hop_length),
            frame_length: framing.frame_length,
            hop_length: framing.hop_length,
            rolloff_percent: framing.rolloff_percent,
        }
    }

    /// Extract every frame-wise series from a mono signal
    ///
    /// 1. Frame the zero-padded signal and compute RMS per frame
    /// 2. Frame the edge-padded signal and compute ZCR per frame
    /// 3. Compute the magnitude spectrogram and derive centroid,
    ///    bandwidth and rolloff per frame
    ///
    /// # Arguments
    /// * `signal` - Mono samples
    /// * `sample_rate` - Sample rate in Hz, for bin frequencies
    pub fn extract(&self, signal: &[f32], sample_rate: u32) -> FrameFeatures {
        let rms = CenteredFrames::new(signal, self.frame_length, self.hop_length, PadMode::Zero)
            .iter()
            .map(TemporalFeatures::compute_rms)
            .collect();

        let zcr = CenteredFrames::new(signal, self.frame_length, self.hop_length, PadMode::Edge)
            .iter()
            .map(TemporalFeatures::compute_zcr)
            .collect();

        let spectral =
            SpectralFeatures::new(sample_rate, self.stft.n_fft(), self.rolloff_percent);
        let spectrogram = self.stft.magnitude_spectrogram(signal);

        let mut centroid = Vec::with_capacity(spectrogram.len());
        let mut bandwidth = Vec::with_capacity(spectrogram.len());
        let mut rolloff = Vec::with_capacity(spectrogram.len());
        for spectrum in &spectrogram {
            let c = spectral.compute_centroid(spectrum);
            centroid.push(c);
            bandwidth.push(spectral.compute_bandwidth(spectrum, c));
            rolloff.push(spectral.compute_rolloff(spectrum));
        }

        FrameFeatures {
            rms,
            zcr,
            centroid,
            bandwidth,
            rolloff,
        }
    }
}

impl Default for FrameFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
