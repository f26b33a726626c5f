//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to each
//! session by value.

use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AppPaths;

/// Target range offered to users (dBFS).  Not enforced.
pub const RECOMMENDED_TARGET_DBFS: RangeInclusive<f32> = -60.0..=-5.0;

/// Hold range offered to users (seconds).  Not enforced.
pub const RECOMMENDED_HOLD_SECS: RangeInclusive<f32> = 0.5..=3.0;

/// Lowest target accepted by [`DetectorConfig::validate`].
const MIN_TARGET_DBFS: f32 = -120.0;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A setting is outside the range the detector can work with.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("target level {0} dBFS must lie within [-120, 0]")]
    Target(f32),

    #[error("hold duration {0} s must be finite and non-negative")]
    Hold(f32),

    #[error("smoothing factor {0} must lie within (0, 1]")]
    Alpha(f32),
}

// ---------------------------------------------------------------------------
// DetectorConfig
// ---------------------------------------------------------------------------

/// Threshold, dwell and smoothing settings for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Loudness the reader must reach, in dBFS (default `-25`).
    pub target_dbfs: f32,
    /// Seconds the level must stay at or above target before praise
    /// (default `1.0`).
    pub hold_secs: f32,
    /// Exponential smoothing factor for live capture (default `0.3`).
    pub smoothing_alpha: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_dbfs: -25.0,
            hold_secs: 1.0,
            smoothing_alpha: 0.3,
        }
    }
}

impl DetectorConfig {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TARGET_DBFS..=0.0).contains(&self.target_dbfs) {
            return Err(ConfigError::Target(self.target_dbfs));
        }
        if !self.hold_secs.is_finite() || self.hold_secs < 0.0 {
            return Err(ConfigError::Hold(self.hold_secs));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::Alpha(self.smoothing_alpha));
        }
        Ok(())
    }

    /// Hold duration as a [`Duration`].  Invalid values collapse to zero.
    pub fn hold(&self) -> Duration {
        Duration::try_from_secs_f32(self.hold_secs).unwrap_or(Duration::ZERO)
    }

    /// `true` when target and hold sit inside the ranges offered in the UI.
    pub fn is_within_recommended(&self) -> bool {
        RECOMMENDED_TARGET_DBFS.contains(&self.target_dbfs)
            && RECOMMENDED_HOLD_SECS.contains(&self.hold_secs)
    }
}

// ---------------------------------------------------------------------------
// FeedbackConfig
// ---------------------------------------------------------------------------

/// Who is reading and what they are told.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Name used to address the reader.
    pub student_name: String,
    /// Shown once the target has been held long enough.
    pub praise_message: String,
    /// Shown otherwise.
    pub encourage_message: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            student_name: "Student".into(),
            praise_message: "Wonderful! You read clearly and loudly enough, keep it up!".into(),
            encourage_message: "Be a little more confident and read a bit louder. You can do it!"
                .into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_level_coach::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Threshold / dwell / smoothing settings.
    pub detector: DetectorConfig,
    /// Reader name and messages.
    pub feedback: FeedbackConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no settings at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.detector.validate()?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
