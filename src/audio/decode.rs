//! Linear-PCM WAV decoding into a normalised mono [`Waveform`].
//!
//! [`decode_wav`] accepts the raw bytes of a RIFF/WAVE container and returns
//! a single-channel waveform in `[-1.0, 1.0]` together with its sample rate.
//!
//! | Container format        | Down-mix domain | Normalisation        |
//! |-------------------------|-----------------|----------------------|
//! | 16-bit signed integer   | integer (`i16`) | `/ 32768.0`          |
//! | 32-bit IEEE float       | float (`f32`)   | clamp to `[-1, 1]`   |
//! | anything else           | —               | [`DecodeError`]      |
//!
//! The `/ 32768.0` divisor gives an asymmetric range of `[-1.0, 1.0)`.
//! [`Waveform::to_wav_bytes`] uses the same convention in reverse, so a
//! decode → encode → decode round trip reproduces the samples exactly.
//!
//! # Example
//!
//! ```rust
//! use voice_level_coach::audio::{decode_wav, Waveform};
//!
//! let original = Waveform::from_mono(vec![0.5; 1_600], 16_000);
//! let bytes = original.to_wav_bytes().unwrap();
//!
//! let decoded = decode_wav(&bytes).unwrap();
//! assert_eq!(decoded.sample_rate(), 16_000);
//! assert_eq!(decoded.samples(), original.samples());
//! ```

use std::io::{self, Cursor, Read};
use std::path::Path;
use std::time::Duration;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

use super::mix::{downmix_f32, downmix_i16};

/// Divisor used to normalise 16-bit integer samples.
pub const I16_FULL_SCALE: f32 = 32_768.0;

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Reason a PCM container could not be decoded.
///
/// Decoding is all-or-nothing: no partial waveform is ever returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The RIFF/WAVE header is missing, inconsistent or cut short.
    #[error("malformed WAV container: {0}")]
    Malformed(String),

    /// The container is valid but uses a sample format other than 16-bit
    /// integer or 32-bit float PCM.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The data chunk ends before the number of samples declared in the
    /// header, or in the middle of a frame.
    #[error("audio data truncated: expected {expected} samples, got {got}")]
    Truncated { expected: u32, got: u32 },

    /// The file could not be read.
    #[error("failed to read audio: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    fn from_header(err: hound::Error) -> Self {
        match err {
            // Input is an in-memory buffer, so a read failure means it ran out.
            hound::Error::IoError(_) => DecodeError::Malformed("header ends unexpectedly".into()),
            hound::Error::FormatError(msg) => DecodeError::Malformed(msg.into()),
            other => DecodeError::UnsupportedFormat(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Waveform
// ---------------------------------------------------------------------------

/// Immutable mono audio in `[-1.0, 1.0]` plus its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
    /// Channel count of the container this waveform was decoded from.
    source_channels: u16,
}

impl Waveform {
    /// Wrap already-mono samples.  Values outside `[-1.0, 1.0]` are clamped.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        let samples = samples.into_iter().map(sanitize).collect();
        Self {
            samples,
            sample_rate,
            source_channels: 1,
        }
    }

    /// Mono samples in `[-1.0, 1.0]`.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count before down-mixing.
    pub fn source_channels(&self) -> u16 {
        self.source_channels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length of the waveform.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Encode as a mono 16-bit PCM WAV container.
    ///
    /// Samples are scaled by 32768 and saturated to the `i16` range, the
    /// inverse of the normalisation applied by [`decode_wav`].
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, hound::Error> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)?;
            for &s in &self.samples {
                let scaled = (s * I16_FULL_SCALE)
                    .round()
                    .clamp(i16::MIN as f32, i16::MAX as f32);
                writer.write_sample(scaled as i16)?;
            }
            writer.finalize()?;
        }
        Ok(cursor.into_inner())
    }
}

/// Clamp into `[-1.0, 1.0]`; NaN becomes silence.
fn sanitize(s: f32) -> f32 {
    if s.is_nan() {
        0.0
    } else {
        s.clamp(-1.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// decode_wav
// ---------------------------------------------------------------------------

/// Decode a RIFF/WAVE byte buffer into a mono [`Waveform`].
///
/// # Errors
///
/// * [`DecodeError::Malformed`] — bad header, zero channels or zero rate.
/// * [`DecodeError::UnsupportedFormat`] — not 16-bit int / 32-bit float.
/// * [`DecodeError::Truncated`] — fewer sample bytes than declared, or a
///   partial trailing frame.
pub fn decode_wav(bytes: &[u8]) -> Result<Waveform, DecodeError> {
    let mut reader = WavReader::new(Cursor::new(bytes)).map_err(DecodeError::from_header)?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(DecodeError::Malformed("channel count is zero".into()));
    }
    if spec.sample_rate == 0 {
        return Err(DecodeError::Malformed("sample rate is zero".into()));
    }

    let expected = reader.len();
    let capacity = (expected as usize).min(bytes.len());

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => {
            let raw = read_samples::<i16, _>(&mut reader, expected, capacity)?;
            check_whole_frames(raw.len(), spec.channels, expected)?;
            downmix_i16(&raw, spec.channels)
                .into_iter()
                .map(|s| s as f32 / I16_FULL_SCALE)
                .collect()
        }
        (SampleFormat::Float, 32) => {
            let raw = read_samples::<f32, _>(&mut reader, expected, capacity)?;
            check_whole_frames(raw.len(), spec.channels, expected)?;
            downmix_f32(&raw, spec.channels)
                .into_iter()
                .map(sanitize)
                .collect()
        }
        (format, bits) => {
            let kind = match format {
                SampleFormat::Int => "integer",
                SampleFormat::Float => "float",
            };
            return Err(DecodeError::UnsupportedFormat(format!("{bits}-bit {kind} PCM")));
        }
    };

    log::debug!(
        "decoded WAV: {} Hz, {} ch, {} bit, {} mono samples",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        samples.len()
    );

    Ok(Waveform {
        samples,
        sample_rate: spec.sample_rate,
        source_channels: spec.channels,
    })
}

/// Read and decode a WAV file from disk.
pub fn decode_wav_file(path: impl AsRef<Path>) -> Result<Waveform, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_wav(&bytes)
}

fn read_samples<S, R>(
    reader: &mut WavReader<R>,
    expected: u32,
    capacity: usize,
) -> Result<Vec<S>, DecodeError>
where
    S: hound::Sample,
    R: Read,
{
    let mut out = Vec::with_capacity(capacity);
    for sample in reader.samples::<S>() {
        match sample {
            Ok(s) => out.push(s),
            Err(hound::Error::IoError(_)) | Err(hound::Error::UnfinishedSample) => {
                return Err(DecodeError::Truncated {
                    expected,
                    got: out.len() as u32,
                });
            }
            Err(other) => return Err(DecodeError::Malformed(other.to_string())),
        }
    }
    Ok(out)
}

fn check_whole_frames(len: usize, channels: u16, expected: u32) -> Result<(), DecodeError> {
    if len % channels as usize != 0 {
        return Err(DecodeError::Truncated {
            expected,
            got: len as u32,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::measure;

    fn wav_i16(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    fn wav_f32(channels: u16, samples: &[f32]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn half_scale_i16_measures_half_rms() {
        let bytes = wav_i16(1, 16_000, &[16_384; 1_600]);
        let wave = decode_wav(&bytes).unwrap();
        assert_eq!(wave.sample_rate(), 16_000);
        assert_eq!(wave.len(), 1_600);
        let level = measure(wave.samples());
        assert!((level.rms - 0.5).abs() < 1e-6, "rms = {}", level.rms);
    }

    #[test]
    fn i16_normalised_by_32768() {
        let bytes = wav_i16(1, 8_000, &[i16::MIN, i16::MAX, 0]);
        let wave = decode_wav(&bytes).unwrap();
        assert_eq!(wave.samples()[0], -1.0);
        assert_eq!(wave.samples()[1], 32_767.0 / 32_768.0);
        assert_eq!(wave.samples()[2], 0.0);
    }

    #[test]
    fn stereo_i16_mixed_in_integer_domain() {
        // (3 + 4) / 2 = 3.5 → truncated to 3 before normalisation
        let bytes = wav_i16(2, 16_000, &[3, 4, -100, 100]);
        let wave = decode_wav(&bytes).unwrap();
        assert_eq!(wave.source_channels(), 2);
        assert_eq!(wave.samples(), &[3.0 / 32_768.0, 0.0]);
    }

    #[test]
    fn stereo_float_mixed_and_clamped() {
        let bytes = wav_f32(2, &[0.2, 0.4, 3.0, 2.0, -5.0, -1.0]);
        let wave = decode_wav(&bytes).unwrap();
        assert_eq!(wave.sample_rate(), 48_000);
        assert_eq!(wave.len(), 3);
        assert!((wave.samples()[0] - 0.3).abs() < 1e-6);
        assert_eq!(wave.samples()[1], 1.0);
        assert_eq!(wave.samples()[2], -1.0);
    }

    #[test]
    fn garbage_is_malformed() {
        let err = decode_wav(b"definitely not a wav file").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)), "{err}");
    }

    #[test]
    fn empty_buffer_is_malformed() {
        let err = decode_wav(&[]).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)), "{err}");
    }

    #[test]
    fn truncated_data_rejected() {
        let mut bytes = wav_i16(1, 16_000, &[1_000; 100]);
        bytes.truncate(bytes.len() - 50);
        let err = decode_wav(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }), "{err}");
    }

    #[test]
    fn unsupported_bit_depth_rejected() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..10 {
            writer.write_sample(1_000_i32).unwrap();
        }
        writer.finalize().unwrap();

        let err = decode_wav(&cursor.into_inner()).unwrap_err();
        match err {
            DecodeError::UnsupportedFormat(msg) => assert!(msg.contains("24-bit"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_length_data_decodes_to_empty_waveform() {
        let bytes = wav_i16(1, 16_000, &[]);
        let wave = decode_wav(&bytes).unwrap();
        assert!(wave.is_empty());
        assert_eq!(wave.duration(), Duration::ZERO);
    }

    #[test]
    fn encode_decode_round_trip_is_exact() {
        let bytes = wav_i16(1, 22_050, &[-32_768, -1, 0, 1, 12_345, 32_767]);
        let first = decode_wav(&bytes).unwrap();
        let second = decode_wav(&first.to_wav_bytes().unwrap()).unwrap();
        assert_eq!(first.samples(), second.samples());
        assert_eq!(second.sample_rate(), 22_050);
    }

    #[test]
    fn duration_from_sample_rate() {
        let wave = Waveform::from_mono(vec![0.0; 24_000], 16_000);
        assert_eq!(wave.duration(), Duration::from_millis(1_500));
    }

    #[test]
    fn from_mono_clamps_and_drops_nan() {
        let wave = Waveform::from_mono(vec![2.0, -2.0, f32::NAN], 8_000);
        assert_eq!(wave.samples(), &[1.0, -1.0, 0.0]);
    }

    #[test]
    fn decode_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_wav_file(dir.path().join("missing.wav")).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)), "{err}");
    }
}
