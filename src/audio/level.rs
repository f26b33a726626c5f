//! RMS and dBFS loudness measurement.
//!
//! [`measure`] reduces a block of normalised mono samples to a
//! [`LevelMeasurement`].  It is a pure function: the same buffer always
//! yields the same measurement.
//!
//! ```rust
//! use voice_level_coach::audio::measure;
//!
//! let full_scale = vec![1.0_f32; 480];
//! let level = measure(&full_scale);
//! assert!((level.rms - 1.0).abs() < 1e-6);
//! assert!(level.dbfs.abs() < 1e-4);
//!
//! let silence = measure(&[]);
//! assert_eq!(silence.rms, 0.0);
//! assert_eq!(silence.dbfs, f32::NEG_INFINITY);
//! ```

use serde::Serialize;

use super::mix::downmix_f32;

/// Floor applied to the RMS before taking the logarithm.
pub const RMS_EPSILON: f64 = 1e-12;

// ---------------------------------------------------------------------------
// LevelMeasurement
// ---------------------------------------------------------------------------

/// Loudness of one block of audio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelMeasurement {
    /// Root-mean-square amplitude in `[0.0, 1.0]`.
    pub rms: f32,
    /// Level relative to full scale, `<= 0.0`.  Exactly
    /// [`f32::NEG_INFINITY`] for a silent block.
    pub dbfs: f32,
}

impl LevelMeasurement {
    /// Measurement reported for empty or all-zero input.
    pub const SILENCE: Self = Self {
        rms: 0.0,
        dbfs: f32::NEG_INFINITY,
    };

    /// Build a measurement from a known RMS value.
    ///
    /// `rms` is clamped to `[0.0, 1.0]`; zero (or NaN) maps to
    /// [`LevelMeasurement::SILENCE`].
    pub fn from_rms(rms: f32) -> Self {
        if rms.is_nan() || rms <= 0.0 {
            return Self::SILENCE;
        }
        let rms = rms.min(1.0);
        Self {
            rms,
            dbfs: rms_to_dbfs(rms as f64) as f32,
        }
    }

    /// `true` when the block carried no signal at all.
    pub fn is_silent(&self) -> bool {
        self.rms == 0.0
    }
}

impl Default for LevelMeasurement {
    fn default() -> Self {
        Self::SILENCE
    }
}

fn rms_to_dbfs(rms: f64) -> f64 {
    (20.0 * rms.max(RMS_EPSILON).log10()).min(0.0)
}

// ---------------------------------------------------------------------------
// measure
// ---------------------------------------------------------------------------

/// Measure mono samples in `[-1.0, 1.0]`.
///
/// An empty slice is a valid transient state (e.g. a zero-length capture)
/// and returns [`LevelMeasurement::SILENCE`] instead of failing.
pub fn measure(samples: &[f32]) -> LevelMeasurement {
    if samples.is_empty() {
        log::debug!("level meter received an empty buffer; reporting silence");
        return LevelMeasurement::SILENCE;
    }

    // Accumulate in f64 so long files do not lose precision.
    let energy: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    let rms = (energy / samples.len() as f64).sqrt().min(1.0);

    if rms == 0.0 {
        return LevelMeasurement::SILENCE;
    }

    LevelMeasurement {
        rms: rms as f32,
        dbfs: rms_to_dbfs(rms) as f32,
    }
}

/// Measure interleaved multi-channel samples.
///
/// Channels are averaged per frame first, the same policy the decoder
/// applies, so a file and a live frame with equal content measure equally.
pub fn measure_interleaved(samples: &[f32], channels: u16) -> LevelMeasurement {
    match channels {
        1 => measure(samples),
        n => measure(&downmix_f32(samples, n)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_silence() {
        assert_eq!(measure(&[]), LevelMeasurement::SILENCE);
    }

    #[test]
    fn zeros_are_negative_infinity() {
        let level = measure(&[0.0; 256]);
        assert_eq!(level.rms, 0.0);
        assert_eq!(level.dbfs, f32::NEG_INFINITY);
        assert!(level.is_silent());
    }

    #[test]
    fn full_scale_is_zero_dbfs() {
        let level = measure(&[1.0; 1_000]);
        assert!((level.rms - 1.0).abs() < 1e-6);
        assert!(level.dbfs.abs() < 1e-4, "dbfs = {}", level.dbfs);
    }

    #[test]
    fn alternating_full_scale_is_zero_dbfs() {
        let square: Vec<f32> = (0..1_000).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let level = measure(&square);
        assert!((level.rms - 1.0).abs() < 1e-6);
    }

    #[test]
    fn half_scale_is_about_minus_six_db() {
        let level = measure(&[0.5; 100]);
        assert!((level.rms - 0.5).abs() < 1e-6);
        assert!((level.dbfs - (-6.0206)).abs() < 1e-3, "dbfs = {}", level.dbfs);
    }

    #[test]
    fn tiny_signal_is_finite() {
        let level = measure(&[1e-30; 10]);
        assert!(level.dbfs.is_finite());
        assert!(level.dbfs <= -239.0, "dbfs = {}", level.dbfs);
    }

    #[test]
    fn results_stay_in_range() {
        let buffers: Vec<Vec<f32>> = vec![
            vec![1.0, -1.0, 1.0],
            vec![0.001, -0.3, 0.7, -0.999],
            (0..4_800).map(|i| (i as f32 * 0.05).sin()).collect(),
        ];
        for buf in &buffers {
            let level = measure(buf);
            assert!((0.0..=1.0).contains(&level.rms), "rms = {}", level.rms);
            assert!(level.dbfs <= 0.0, "dbfs = {}", level.dbfs);
        }
    }

    #[test]
    fn measure_is_idempotent() {
        let buf: Vec<f32> = (0..1_024).map(|i| ((i * 7 % 13) as f32 - 6.0) / 10.0).collect();
        assert_eq!(measure(&buf), measure(&buf));
    }

    #[test]
    fn interleaved_downmixes_before_measuring() {
        // L = 0.5, R = -0.5 → mono 0.0
        let cancelling = vec![0.5_f32, -0.5, 0.5, -0.5];
        assert!(measure_interleaved(&cancelling, 2).is_silent());

        let mono_equivalent = measure(&[0.25; 2]);
        assert_eq!(measure_interleaved(&[0.5, 0.0, 0.0, 0.5], 2), mono_equivalent);
    }

    #[test]
    fn from_rms_matches_measure() {
        let measured = measure(&[0.25; 64]);
        let derived = LevelMeasurement::from_rms(0.25);
        assert!((measured.dbfs - derived.dbfs).abs() < 1e-5);
        assert_eq!(LevelMeasurement::from_rms(0.0), LevelMeasurement::SILENCE);
        assert_eq!(LevelMeasurement::from_rms(f32::NAN), LevelMeasurement::SILENCE);
    }
}
