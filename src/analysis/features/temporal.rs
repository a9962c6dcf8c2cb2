// Temporal module - Time-domain feature extraction
//
// This module computes loudness and zero-crossing features directly from
// time-domain frames.

/// Samples with magnitude at or below this are treated as exactly zero
/// when counting sign changes
pub const ZCR_ZERO_THRESHOLD: f32 = 1e-10;

/// Temporal feature computation functions
pub struct TemporalFeatures;

impl TemporalFeatures {
    /// Compute root-mean-square amplitude of a frame
    ///
    /// Formula: RMS = sqrt((1 / N) × Σ x[n]²)
    pub fn compute_rms(frame: &[f32]) -> f32 {
        if frame.is_empty() {
            return 0.0;
        }

        let sum_squares: f64 = frame.iter().map(|&x| (x as f64) * (x as f64)).sum();
        (sum_squares / frame.len() as f64).sqrt() as f32
    }

    /// Compute zero-crossing rate (ZCR)
    ///
    /// Counts sign changes between consecutive samples and normalizes by
    /// the frame length. Zero counts as positive, and samples within
    /// [`ZCR_ZERO_THRESHOLD`] of zero are snapped to zero first.
    ///
    /// # Returns
    /// Zero-crossing rate (0.0 to 1.0)
    pub fn compute_zcr(frame: &[f32]) -> f32 {
        if frame.len() < 2 {
            return 0.0;
        }

        let negative = |x: f32| x.abs() > ZCR_ZERO_THRESHOLD && x < 0.0;

        let crossings = frame
            .windows(2)
            .filter(|pair| negative(pair[0]) != negative(pair[1]))
            .count();

        crossings as f32 / frame.len() as f32
    }
}
