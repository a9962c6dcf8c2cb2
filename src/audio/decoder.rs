//! Audio decoding
//!
//! Decodes any container symphonia recognizes (WAV, MP3, FLAC, OGG, ...) to
//! mono f32 PCM at the file's native sample rate. Format detection probes
//! the file contents, so a file whose extension does not match its encoding
//! (MP3 bytes saved as `upload.wav`) still decodes.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::signal::AudioSignal;
use crate::error::DecodeError;

/// Decode an audio file to a mono [`AudioSignal`]
///
/// **Algorithm:**
/// 1. Open file and probe format using symphonia
/// 2. Find default audio track
/// 3. Create decoder for track codec
/// 4. Decode all packets, skipping packets the codec reports as corrupt
/// 5. Average interleaved channels to mono
///
/// # Errors
/// [`DecodeError`] when the file cannot be opened, its format is not
/// recognized, it has no audio track, or no packet could be decoded.
pub fn decode_file(path: &Path) -> Result<AudioSignal, DecodeError> {
    let path_str = path.display().to_string();
    tracing::debug!(path = %path_str, "Decoding audio file");

    let file = File::open(path).map_err(|err| DecodeError::FileOpen {
        path: path_str.clone(),
        reason: err.to_string(),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Extension is only a hint; probing reads the stream's markers
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|err| DecodeError::Probe {
            path: path_str.clone(),
            reason: err.to_string(),
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::NoAudioTrack {
            path: path_str.clone(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| DecodeError::UnknownSampleRate {
            path: path_str.clone(),
        })?;
    let declared_channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|err| DecodeError::Decode {
            path: path_str.clone(),
            reason: err.to_string(),
        })?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels = declared_channels.unwrap_or(1);
    let mut skipped_packets = 0usize;
    let mut last_skip_reason = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(err) => {
                return Err(DecodeError::Decode {
                    path: path_str,
                    reason: err.to_string(),
                })
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                tracing::warn!(path = %path_str, reason, "Skipping corrupt packet");
                skipped_packets += 1;
                last_skip_reason = Some(reason.to_string());
                continue;
            }
            Err(err) => {
                return Err(DecodeError::Decode {
                    path: path_str,
                    reason: err.to_string(),
                })
            }
        };

        let spec = *decoded.spec();
        channels = spec.channels.count().max(1);

        // (Re)allocate when the packet outgrows the buffer
        let needs_alloc = sample_buf
            .as_ref()
            .map_or(true, |buf| buf.capacity() < decoded.capacity() * channels);
        if needs_alloc {
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            downmix_into(buf.samples(), channels, &mut samples);
        }
    }

    if samples.is_empty() {
        if let Some(reason) = last_skip_reason {
            return Err(DecodeError::Decode {
                path: path_str,
                reason: format!("all {} packets failed to decode: {}", skipped_packets, reason),
            });
        }
    }

    tracing::debug!(
        path = %path_str,
        sample_rate,
        channels,
        total_samples = samples.len(),
        skipped_packets,
        "Audio decoding complete"
    );

    Ok(AudioSignal::with_channels(samples, sample_rate, channels))
}

/// Average interleaved frames to mono and append to `out`
fn downmix_into(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }

    out.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_file_not_found() {
        let result = decode_file(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(DecodeError::FileOpen { .. })));
    }

    #[test]
    fn test_decode_rejects_text_file() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"definitely not a RIFF header, just some text")
            .unwrap();

        let result = decode_file(file.path());
        assert!(
            matches!(result, Err(DecodeError::Probe { .. })),
            "expected probe failure, got {:?}",
            result
        );
    }

    #[test]
    fn test_decode_wav_samples() {
        let file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(file.path(), spec).unwrap();
        for sample in [0i16, 16384, -16384, 8192] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let signal = decode_file(file.path()).unwrap();

        assert_eq!(signal.sample_rate(), 22050);
        assert_eq!(signal.source_channels(), 1);
        assert_eq!(signal.samples(), &[0.0, 0.5, -0.5, 0.25]);
    }

    #[test]
    fn test_decode_mp3_behind_wav_suffix() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(include_bytes!("../../tests/fixtures/tone.mp3"))
            .unwrap();
        file.flush().unwrap();

        let signal = decode_file(file.path()).unwrap();

        assert_eq!(signal.sample_rate(), 32000);
        assert_eq!(signal.source_channels(), 1);
        assert!(!signal.is_empty());
        assert!(signal.samples().iter().any(|s| *s != 0.0));
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let mut out = Vec::new();
        downmix_into(&[0.1, -0.2, 0.3], 1, &mut out);
        assert_eq!(out, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_downmix_averages_channels() {
        let mut out = vec![9.0];
        downmix_into(&[1.0, 0.0, 0.5, -0.5, -1.0, -1.0], 2, &mut out);
        assert_eq!(out, vec![9.0, 0.5, 0.0, -1.0]);
    }
}
