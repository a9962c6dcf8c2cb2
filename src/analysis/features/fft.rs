// FFT module - Short-time Fourier transform
//
// This module handles STFT computation with Hann windowing to reduce
// spectral leakage. The magnitude spectrogram is used by the spectral
// feature functions.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::frames::{CenteredFrames, PadMode};

/// Periodic Hann window of `len` samples
///
/// The periodic form (denominator `len` rather than `len - 1`) is the one
/// used for spectral analysis, so that overlapping windows sum flat.
pub fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 - 0.5 * ((2.0 * std::f32::consts::PI * i as f32) / len as f32).cos())
        .collect()
}

/// STFT processor that computes magnitude spectra over centered frames
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    n_fft: usize,
    hop_length: usize,
    /// Hann window for FFT (pre-computed)
    window: Vec<f32>,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `n_fft` - FFT size, equal to the window and frame length
    /// * `hop_length` - Samples between consecutive frames
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(n_fft);

        Self {
            fft,
            n_fft,
            hop_length,
            window: hann_window(n_fft),
        }
    }

    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// Number of non-negative frequency bins per frame
    pub fn bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Compute magnitude spectrum of a single frame
    ///
    /// The frame is windowed and zero-padded to `n_fft` if shorter.
    ///
    /// # Returns
    /// Magnitude spectrum (size = n_fft / 2 + 1)
    pub fn compute_magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .zip(&self.window)
            .map(|(&sample, &w)| Complex::new(sample * w, 0.0))
            .collect();
        buffer.resize(self.n_fft, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer[..self.bins()].iter().map(|c| c.norm()).collect()
    }

    /// Magnitude spectrogram of `signal`, one spectrum per centered frame
    pub fn magnitude_spectrogram(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        let frames = CenteredFrames::new(signal, self.n_fft, self.hop_length, PadMode::Zero);
        frames
            .iter()
            .map(|frame| self.compute_magnitude_spectrum(frame))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window_is_periodic() {
        let window = hann_window(8);
        assert_eq!(window.len(), 8);
        assert!(window[0].abs() < 1e-7);
        assert!((window[4] - 1.0).abs() < 1e-6);
        // periodic: no trailing zero
        assert!(window[7] > 0.1);
    }

    #[test]
    fn test_spectrum_peak_at_tone_bin() {
        let n_fft = 1024;
        let sample_rate = 16000.0;
        let stft = StftProcessor::new(n_fft, 256);

        // 1000 Hz lands exactly on bin 64
        let frame: Vec<f32> = (0..n_fft)
            .map(|i| (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / sample_rate).sin())
            .collect();
        let spectrum = stft.compute_magnitude_spectrum(&frame);

        assert_eq!(spectrum.len(), stft.bins());
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 64);
    }

    #[test]
    fn test_spectrogram_frame_count() {
        let stft = StftProcessor::new(2048, 512);
        let signal = vec![0.1; 16000];
        let spectrogram = stft.magnitude_spectrogram(&signal);
        assert_eq!(spectrogram.len(), 32);
        assert!(spectrogram.iter().all(|s| s.len() == 1025));
    }
}
