// Frames module - centered framing of a time-domain signal
//
// Frames are centered on multiples of the hop length: the signal is padded
// by half a frame on each side before slicing, so frame `t` is centered on
// sample `t * hop`. The frame count is `1 + len / hop`.

/// How the signal is extended past its ends before framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Zero padding (STFT, RMS, YIN)
    Zero,
    /// Replicate the first and last sample (ZCR)
    Edge,
}

/// Number of centered frames for a signal of `len` samples
pub fn frame_count(len: usize, hop_length: usize) -> usize {
    1 + len / hop_length
}

/// Pad `signal` by `frame_length / 2` samples on both sides
pub fn pad_centered(signal: &[f32], frame_length: usize, mode: PadMode) -> Vec<f32> {
    let pad = frame_length / 2;
    let (head, tail) = match mode {
        PadMode::Zero => (0.0, 0.0),
        PadMode::Edge => (
            signal.first().copied().unwrap_or(0.0),
            signal.last().copied().unwrap_or(0.0),
        ),
    };

    let mut padded = Vec::with_capacity(signal.len() + 2 * pad);
    padded.resize(pad, head);
    padded.extend_from_slice(signal);
    padded.resize(signal.len() + 2 * pad, tail);
    padded
}

/// Centered frames over `signal`
///
/// Frames that would run past the padded buffer (only possible when the
/// frame is longer than the padding covers) are zero-extended.
pub struct CenteredFrames {
    padded: Vec<f32>,
    frame_length: usize,
    hop_length: usize,
    count: usize,
}

impl CenteredFrames {
    pub fn new(signal: &[f32], frame_length: usize, hop_length: usize, mode: PadMode) -> Self {
        let mut padded = pad_centered(signal, frame_length, mode);
        let count = frame_count(signal.len(), hop_length);
        let needed = (count - 1) * hop_length + frame_length;
        if padded.len() < needed {
            padded.resize(needed, 0.0);
        }

        Self {
            padded,
            frame_length,
            hop_length,
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn frame(&self, index: usize) -> &[f32] {
        let start = index * self.hop_length;
        &self.padded[start..start + self.frame_length]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.count).map(move |i| self.frame(i))
    }
}
