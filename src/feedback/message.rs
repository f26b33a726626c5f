//! Text feedback addressed to the reader.

use crate::audio::LevelMeasurement;
use crate::config::FeedbackConfig;

use super::Verdict;

/// Personalised message for `verdict`, e.g. `"Mia, Great job! …"`.
///
/// ```rust
/// use voice_level_coach::config::FeedbackConfig;
/// use voice_level_coach::feedback::{compose, Verdict};
///
/// let cfg = FeedbackConfig {
///     student_name: "Mia".into(),
///     ..FeedbackConfig::default()
/// };
/// assert!(compose(&cfg, Verdict::Praising).starts_with("Mia, "));
/// ```
pub fn compose(config: &FeedbackConfig, verdict: Verdict) -> String {
    let body = match verdict {
        Verdict::Praising => &config.praise_message,
        Verdict::Encouraging => &config.encourage_message,
    };
    format!("{}, {}", config.student_name, body)
}

/// Numeric status line for a measurement against the target.
pub fn readout(level: &LevelMeasurement, target_dbfs: f32) -> String {
    format!(
        "RMS: {:.3}  |  dBFS: {:.1}  |  target: >= {:.0} dBFS",
        level.rms, level.dbfs, target_dbfs
    )
}
