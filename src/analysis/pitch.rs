// Pitch - YIN fundamental-frequency tracking
//
// Implements the YIN estimator (de Cheveigné & Kawahara, 2002) over centered
// frames. For each frame the difference function is computed via FFT
// autocorrelation, normalized by its cumulative mean, and the first trough
// below an absolute threshold inside the period search range is refined by
// parabolic interpolation.
//
// A frame with no trough below the threshold (unvoiced speech, silence)
// falls back to the global minimum of the normalized difference. The track
// therefore never contains NaN, and every frame contributes to the mean.
//
// References:
// - de Cheveigné, A., & Kawahara, H. (2002). YIN, a fundamental frequency
//   estimator for speech and music. JASA 111(4).

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::analysis::features::frames::{CenteredFrames, PadMode};
use crate::config::PitchConfig;
use crate::error::ProcessingError;

/// Lowest fundamental frequency searched (Hz)
pub const PITCH_FMIN_HZ: f32 = 75.0;

/// Highest fundamental frequency searched (Hz)
pub const PITCH_FMAX_HZ: f32 = 300.0;

/// YIN analysis frame length in samples
pub const YIN_FRAME_LENGTH: usize = 2048;

/// Integration window of the difference function (half a frame)
pub const YIN_WIN_LENGTH: usize = 1024;

/// Hop between YIN frames (a quarter frame)
pub const YIN_HOP_LENGTH: usize = 512;

/// Absolute threshold for trough selection
pub const YIN_TROUGH_THRESHOLD: f32 = 0.1;

/// Autocorrelation and energy terms below this magnitude are clamped to 0
const YIN_NUMERIC_FLOOR: f32 = 1e-6;

/// YIN pitch tracker
///
/// Holds pre-planned forward and inverse FFTs of the frame length, so a
/// single tracker can be reused across calls and threads.
pub struct YinTracker {
    config: PitchConfig,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl YinTracker {
    /// Create a tracker with the default 75-300 Hz configuration
    pub fn new() -> Self {
        Self::with_config(&PitchConfig::default())
    }

    pub fn with_config(config: &PitchConfig) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            config: config.clone(),
            forward: planner.plan_fft_forward(config.frame_length),
            inverse: planner.plan_fft_inverse(config.frame_length),
        }
    }

    /// Period search range in samples for `sample_rate`
    ///
    /// `min_period = floor(sr / fmax)`,
    /// `max_period = min(ceil(sr / fmin), frame_length - win_length - 1)`.
    pub fn period_range(&self, sample_rate: u32) -> Result<(usize, usize), ProcessingError> {
        let sr = sample_rate as f32;
        let min_period = (sr / self.config.fmax_hz).floor() as usize;
        let max_period = ((sr / self.config.fmin_hz).ceil() as usize)
            .min(self.config.frame_length - self.config.win_length - 1);

        if min_period < 1 {
            return Err(ProcessingError::InvalidSampleRate {
                sample_rate,
                reason: format!(
                    "cannot resolve periods of {} Hz (need at least 1 sample)",
                    self.config.fmax_hz
                ),
            });
        }
        if max_period <= min_period {
            return Err(ProcessingError::InvalidSampleRate {
                sample_rate,
                reason: format!(
                    "period search range {}..={} samples is empty",
                    min_period, max_period
                ),
            });
        }

        Ok((min_period, max_period))
    }

    /// Track f0 over `signal`, one estimate per centered frame
    ///
    /// # Returns
    /// Per-frame fundamental frequency in Hz
    pub fn track(&self, signal: &[f32], sample_rate: u32) -> Result<Vec<f32>, ProcessingError> {
        let (min_period, max_period) = self.period_range(sample_rate)?;
        let frames = CenteredFrames::new(
            signal,
            self.config.frame_length,
            self.config.hop_length,
            PadMode::Zero,
        );

        log::debug!(
            "[Pitch] YIN over {} frames, periods {}..={} samples at {} Hz",
            frames.len(),
            min_period,
            max_period,
            sample_rate
        );

        Ok(frames
            .iter()
            .map(|frame| {
                let normalized = self.normalized_difference(frame, min_period, max_period);
                let period = min_period as f32 + self.pick_period(&normalized);
                sample_rate as f32 / period
            })
            .collect())
    }

    /// Difference function d(τ) for τ in 0..=max_period
    ///
    /// d(τ) = E(0) + E(τ) - 2·r(τ), with r the autocorrelation of the window
    /// x[1..=W] against x shifted by τ and E(τ) the energy of x[τ+1..=τ+W].
    fn difference(&self, frame: &[f32], max_period: usize) -> Vec<f32> {
        let n = self.config.frame_length;
        let w = self.config.win_length;

        let mut a: Vec<Complex<f32>> = frame.iter().map(|&x| Complex::new(x, 0.0)).collect();
        a.resize(n, Complex::new(0.0, 0.0));

        // Reversed window x[W], x[W-1], ..., x[1]
        let mut b: Vec<Complex<f32>> = (1..=w).rev().map(|j| Complex::new(frame[j], 0.0)).collect();
        b.resize(n, Complex::new(0.0, 0.0));

        self.forward.process(&mut a);
        self.forward.process(&mut b);
        for (x, y) in a.iter_mut().zip(&b) {
            *x *= *y;
        }
        self.inverse.process(&mut a);

        let scale = 1.0 / n as f32;
        let clamp = |v: f32| if v.abs() < YIN_NUMERIC_FLOOR { 0.0 } else { v };

        let mut cumulative = Vec::with_capacity(n + 1);
        cumulative.push(0.0f64);
        for &x in frame {
            let last = cumulative[cumulative.len() - 1];
            cumulative.push(last + (x as f64) * (x as f64));
        }
        // E(k) = Σ x[k+1..=k+W]² = cumsum[k+W] - cumsum[k] in inclusive-prefix terms
        let energy = |k: usize| clamp((cumulative[k + w + 1] - cumulative[k + 1]) as f32);

        let e0 = energy(0);
        (0..=max_period)
            .map(|tau| {
                let acf = clamp(a[w + tau].re * scale);
                e0 + energy(tau) - 2.0 * acf
            })
            .collect()
    }

    /// Cumulative-mean-normalized difference d'(τ) for τ in min..=max period
    fn normalized_difference(&self, frame: &[f32], min_period: usize, max_period: usize) -> Vec<f32> {
        let diff = self.difference(frame, max_period);

        let mut running = 0.0f64;
        let mut cumulative_mean = vec![0.0f32; max_period + 1];
        for tau in 1..=max_period {
            running += diff[tau] as f64;
            cumulative_mean[tau] = (running / tau as f64) as f32;
        }

        (min_period..=max_period)
            .map(|tau| diff[tau] / (cumulative_mean[tau] + f32::MIN_POSITIVE))
            .collect()
    }

    /// Refined lag (relative to min_period) of the selected trough
    fn pick_period(&self, normalized: &[f32]) -> f32 {
        let len = normalized.len();
        let is_trough = |i: usize| -> bool {
            if i == 0 {
                normalized[0] < normalized[1]
            } else if i == len - 1 {
                normalized[i] < normalized[i - 1]
            } else {
                normalized[i] < normalized[i - 1] && normalized[i] <= normalized[i + 1]
            }
        };

        let index = (0..len)
            .find(|&i| is_trough(i) && normalized[i] < self.config.trough_threshold)
            .unwrap_or_else(|| argmin(normalized));

        index as f32 + parabolic_shift(normalized, index)
    }
}

impl Default for YinTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the first minimum
fn argmin(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::INFINITY), |(best_i, best_v), (i, &v)| {
            if v < best_v {
                (i, v)
            } else {
                (best_i, best_v)
            }
        })
        .0
}

/// Sub-sample offset of the parabola through `values[i-1..=i+1]`
///
/// Zero at the edges of the range, and when the vertex would fall outside
/// the neighbouring samples.
fn parabolic_shift(values: &[f32], i: usize) -> f32 {
    if i == 0 || i + 1 >= values.len() {
        return 0.0;
    }

    let (prev, cur, next) = (values[i - 1], values[i], values[i + 1]);
    let a = next + prev - 2.0 * cur;
    let b = (next - prev) / 2.0;
    if b.abs() >= a.abs() {
        0.0
    } else {
        -b / a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: u32, samples: usize) -> Vec<f32> {
        (0..samples)
            .map(|i| {
                (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin()
            })
            .collect()
    }

    /// Mean over frames whose window lies fully inside the signal
    fn interior_mean(track: &[f32]) -> f32 {
        let interior = &track[2..track.len() - 4];
        interior.iter().sum::<f32>() / interior.len() as f32
    }

    #[test]
    fn test_period_range_at_16k() {
        let tracker = YinTracker::new();
        assert_eq!(tracker.period_range(16000).unwrap(), (53, 214));
    }

    #[test]
    fn test_period_range_capped_by_window() {
        let tracker = YinTracker::new();
        let (_, max_period) = tracker.period_range(96000).unwrap();
        assert_eq!(max_period, YIN_FRAME_LENGTH - YIN_WIN_LENGTH - 1);
    }

    #[test]
    fn test_period_range_rejects_tiny_sample_rate() {
        let tracker = YinTracker::new();
        assert!(matches!(
            tracker.period_range(200),
            Err(ProcessingError::InvalidSampleRate { .. })
        ));
        assert!(tracker.period_range(0).is_err());
    }

    #[test]
    fn test_track_one_value_per_frame() {
        let tracker = YinTracker::new();
        let track = tracker.track(&sine(200.0, 16000, 16000), 16000).unwrap();
        assert_eq!(track.len(), 32);
        assert!(track.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn test_tracks_pure_tones() {
        let tracker = YinTracker::new();
        for &(frequency, sample_rate) in &[(110.0, 16000), (180.0, 16000), (220.0, 22050), (290.0, 44100)] {
            let track = tracker
                .track(&sine(frequency, sample_rate, sample_rate as usize), sample_rate)
                .unwrap();
            let estimate = interior_mean(&track);
            assert!(
                (estimate - frequency).abs() < 1.0,
                "Expected ~{} Hz at {} Hz sample rate, got {}",
                frequency,
                sample_rate,
                estimate
            );
        }
    }

    #[test]
    fn test_silence_falls_back_to_shortest_period() {
        let tracker = YinTracker::new();
        let track = tracker.track(&vec![0.0; 4096], 16000).unwrap();
        // Flat normalized difference: global minimum at the first lag
        assert!(track.iter().all(|&f| (f - 16000.0 / 53.0).abs() < 1e-3));
    }

    #[test]
    fn test_parabolic_shift() {
        // Symmetric trough: no shift
        assert_eq!(parabolic_shift(&[1.0, 0.0, 1.0], 1), 0.0);
        // Vertex of y = (x - 1.25)^2 sampled at 0, 1, 2
        let values = [1.5625, 0.0625, 0.5625];
        assert!((parabolic_shift(&values, 1) - 0.25).abs() < 1e-6);
        // Edges never shift
        assert_eq!(parabolic_shift(&values, 0), 0.0);
        assert_eq!(parabolic_shift(&values, 2), 0.0);
    }

    #[test]
    fn test_argmin_prefers_first() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), 1);
        assert_eq!(argmin(&[0.0, 0.0]), 0);
    }
}
