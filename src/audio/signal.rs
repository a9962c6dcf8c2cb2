// Decoded audio buffer handed to the feature pipeline

use crate::error::ProcessingError;

/// Mono PCM samples at a native sample rate
///
/// Loaded once per request, read-only, and dropped when extraction ends.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
    /// Channel count of the source before downmixing
    source_channels: usize,
}

impl AudioSignal {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::with_channels(samples, sample_rate, 1)
    }

    pub fn with_channels(samples: Vec<f32>, sample_rate: u32, source_channels: usize) -> Self {
        Self {
            samples,
            sample_rate,
            source_channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn source_channels(&self) -> usize {
        self.source_channels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds (sample count / sample rate)
    pub fn duration_seconds(&self) -> f32 {
        (self.samples.len() as f64 / self.sample_rate as f64) as f32
    }

    /// Mean squared sample amplitude over the whole signal
    pub fn energy(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&x| (x as f64) * (x as f64)).sum();
        (sum / self.samples.len() as f64) as f32
    }

    /// Reject signals the pipeline cannot analyze
    ///
    /// Empty, zero-rate, non-finite and all-zero signals leave pitch and
    /// spectral means undefined.
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.samples.is_empty() {
            return Err(ProcessingError::EmptySignal);
        }
        if self.sample_rate == 0 {
            return Err(ProcessingError::InvalidSampleRate {
                sample_rate: 0,
                reason: "sample rate must be positive".to_string(),
            });
        }
        if let Some(index) = self.samples.iter().position(|x| !x.is_finite()) {
            return Err(ProcessingError::NonFiniteSample { index });
        }
        if self.samples.iter().all(|&x| x == 0.0) {
            return Err(ProcessingError::SilentSignal {
                sample_count: self.samples.len(),
            });
        }
        Ok(())
    }
}
