//! Configuration module for the loudness coach.
//!
//! Provides `AppConfig` (top-level settings), the detector and feedback
//! sub-configs, `AppPaths` for the platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, ConfigError, DetectorConfig, FeedbackConfig, RECOMMENDED_HOLD_SECS,
    RECOMMENDED_TARGET_DBFS,
};
