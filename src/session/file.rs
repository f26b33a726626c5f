//! One-shot analysis of an uploaded or recorded WAV file.
//!
//! The whole file is measured at once; the smoother is bypassed.  For the
//! dwell check the file's single level is treated as having held for the
//! file's own duration: the detector observes the level at `now` and the
//! verdict is read at `now + duration`.  A loud file therefore earns praise
//! only if it is at least `hold_secs` long.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::audio::{decode_wav, measure, DecodeError, LevelMeasurement, Waveform};
use crate::config::DetectorConfig;
use crate::feedback::{map_meter, DwellState, MeterReading, Verdict};

/// Non-fatal observations about an analysed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisWarning {
    /// The file decoded to zero samples; reported as silence.
    EmptyInput,
}

/// Result of analysing one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub measurement: LevelMeasurement,
    pub verdict: Verdict,
    pub meter: MeterReading,
    /// Playback length of the decoded audio.
    pub duration: Duration,
    pub sample_rate: u32,
    pub warning: Option<AnalysisWarning>,
}

/// Decode `bytes` and analyse the result.
///
/// # Errors
///
/// Returns the [`DecodeError`] unchanged; nothing is measured for a buffer
/// that fails to decode.
///
/// ```rust
/// use std::time::Instant;
/// use voice_level_coach::audio::Waveform;
/// use voice_level_coach::config::DetectorConfig;
/// use voice_level_coach::feedback::Verdict;
/// use voice_level_coach::session::analyze_upload;
///
/// // Two seconds at half scale (≈ -6 dBFS)
/// let bytes = Waveform::from_mono(vec![0.5; 32_000], 16_000).to_wav_bytes().unwrap();
/// let report = analyze_upload(&bytes, &DetectorConfig::default(), Instant::now()).unwrap();
/// assert_eq!(report.verdict, Verdict::Praising);
/// ```
pub fn analyze_upload(
    bytes: &[u8],
    config: &DetectorConfig,
    now: Instant,
) -> Result<FileReport, DecodeError> {
    let waveform = decode_wav(bytes).map_err(|e| {
        log::warn!("could not decode uploaded audio: {e}");
        e
    })?;
    Ok(analyze_waveform(&waveform, config, now))
}

/// Analyse an already-decoded waveform.
pub fn analyze_waveform(waveform: &Waveform, config: &DetectorConfig, now: Instant) -> FileReport {
    let warning = if waveform.is_empty() {
        log::debug!("uploaded audio is empty; reporting silence");
        Some(AnalysisWarning::EmptyInput)
    } else {
        None
    };

    let measurement = measure(waveform.samples());
    let duration = waveform.duration();

    let mut dwell = DwellState::new(config.target_dbfs, config.hold());
    dwell.observe(measurement.dbfs, now);
    let verdict = dwell.verdict(now.checked_add(duration).unwrap_or(now));

    FileReport {
        measurement,
        verdict,
        meter: map_meter(measurement.dbfs, config.target_dbfs),
        duration,
        sample_rate: waveform.sample_rate(),
        warning,
    }
}
