// Types module - Frame-wise feature series and their reductions

/// Frame-wise feature series, one value per centered frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameFeatures {
    /// Root-mean-square amplitude per frame
    pub rms: Vec<f32>,

    /// Zero-crossing rate per frame (0.0 to 1.0)
    pub zcr: Vec<f32>,

    /// Spectral centroid per frame in Hz
    pub centroid: Vec<f32>,

    /// Spectral bandwidth per frame in Hz
    pub bandwidth: Vec<f32>,

    /// Spectral rolloff per frame in Hz
    pub rolloff: Vec<f32>,
}

impl FrameFeatures {
    pub fn frame_count(&self) -> usize {
        self.rms.len()
    }

    /// Reduce every series to its arithmetic mean
    pub fn means(&self) -> FeatureMeans {
        FeatureMeans {
            rms: mean(&self.rms),
            zcr: mean(&self.zcr),
            centroid: mean(&self.centroid),
            bandwidth: mean(&self.bandwidth),
            rolloff: mean(&self.rolloff),
        }
    }
}

/// Frame-averaged features
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureMeans {
    pub rms: f32,
    pub zcr: f32,
    pub centroid: f32,
    pub bandwidth: f32,
    pub rolloff: f32,
}

/// Arithmetic mean, accumulated in f64
///
/// NaN for an empty slice so callers cannot mistake "no frames" for zero.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return f32::NAN;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    (sum / values.len() as f64) as f32
}
