// Spectral module - Frequency-domain feature extraction
//
// This module computes spectral shape features from magnitude spectra.
// All features operate on |X[k]| with bin frequencies f[k] = k * sr / n_fft.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Default spectral rolloff fraction (85% of spectral magnitude)
pub const ROLLOFF_PERCENT: f32 = 0.85;

/// Spectral feature computation functions
pub struct SpectralFeatures {
    sample_rate: u32,
    n_fft: usize,
    rolloff_percent: f32,
}

impl SpectralFeatures {
    /// Create a new spectral features processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `n_fft` - FFT size the spectra were computed with
    /// * `rolloff_percent` - Fraction of magnitude below the rolloff frequency
    pub fn new(sample_rate: u32, n_fft: usize, rolloff_percent: f32) -> Self {
        Self {
            sample_rate,
            n_fft,
            rolloff_percent,
        }
    }

    fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.n_fft as f32
    }

    /// Compute spectral centroid (weighted mean frequency)
    ///
    /// Formula: centroid = Σ(f_i × |X[i]|) / Σ|X[i]|
    ///
    /// # Returns
    /// Spectral centroid in Hz, 0.0 for an all-zero spectrum
    pub fn compute_centroid(&self, spectrum: &[f32]) -> f32 {
        let magnitude_sum: f32 = spectrum.iter().sum();
        if magnitude_sum < f32::MIN_POSITIVE {
            return 0.0;
        }

        let weighted_sum: f32 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| self.bin_frequency(i) * mag)
            .sum();

        weighted_sum / magnitude_sum
    }

    /// Compute spectral bandwidth (second-order spread around the centroid)
    ///
    /// Formula: bandwidth = sqrt(Σ(p_i × (f_i - centroid)²)), p_i = |X[i]| / Σ|X|
    ///
    /// # Arguments
    /// * `spectrum` - Magnitude spectrum
    /// * `centroid` - Centroid of the same spectrum
    ///
    /// # Returns
    /// Bandwidth in Hz, 0.0 for an all-zero spectrum
    pub fn compute_bandwidth(&self, spectrum: &[f32], centroid: f32) -> f32 {
        let magnitude_sum: f32 = spectrum.iter().sum();
        if magnitude_sum < f32::MIN_POSITIVE {
            return 0.0;
        }

        let variance: f32 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| {
                let deviation = self.bin_frequency(i) - centroid;
                (mag / magnitude_sum) * deviation * deviation
            })
            .sum();

        variance.sqrt()
    }

    /// Compute spectral rolloff
    ///
    /// Finds the lowest bin frequency at which the cumulative magnitude
    /// reaches `rolloff_percent` of the total. An all-zero spectrum rolls
    /// off at 0 Hz.
    ///
    /// # Returns
    /// Rolloff frequency in Hz
    pub fn compute_rolloff(&self, spectrum: &[f32]) -> f32 {
        let total: f32 = spectrum.iter().sum();
        let threshold = self.rolloff_percent * total;

        let mut cumulative = 0.0;
        for (i, &mag) in spectrum.iter().enumerate() {
            cumulative += mag;
            if cumulative >= threshold {
                return self.bin_frequency(i);
            }
        }

        // Rounding can leave the running sum a hair short of the threshold
        self.bin_frequency(spectrum.len().saturating_sub(1))
    }
}
