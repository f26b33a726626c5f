//! First-order exponential smoothing of live RMS readings.
//!
//! Each incoming frame's RMS is blended into a running value:
//!
//! ```text
//! smoothed = α · rms + (1 − α) · smoothed
//! ```
//!
//! Lower α smooths harder, trading responsiveness for stability against
//! plosives and other short spikes.  The state is order-dependent, so
//! [`SmootherState::update`] must be called exactly once per frame, in
//! arrival order.
//!
//! ```rust
//! use voice_level_coach::audio::SmootherState;
//!
//! let mut smoother = SmootherState::new(0.5);
//! assert_eq!(smoother.update(1.0), 0.5);
//! assert_eq!(smoother.update(1.0), 0.75);
//! ```

/// Default smoothing factor for live capture.
pub const DEFAULT_ALPHA: f32 = 0.3;

/// Running exponential moving average, owned by one capture session.
#[derive(Debug, Clone, PartialEq)]
pub struct SmootherState {
    smoothed_rms: f32,
    alpha: f32,
}

impl SmootherState {
    /// Create a smoother starting from silence.
    ///
    /// # Panics
    ///
    /// Panics unless `0.0 < alpha <= 1.0`.
    pub fn new(alpha: f32) -> Self {
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "smoothing alpha must be in (0, 1], got {alpha}"
        );
        Self {
            smoothed_rms: 0.0,
            alpha,
        }
    }

    /// Fold one instantaneous RMS reading in and return the new value.
    pub fn update(&mut self, instantaneous_rms: f32) -> f32 {
        self.smoothed_rms =
            self.alpha * instantaneous_rms + (1.0 - self.alpha) * self.smoothed_rms;
        self.smoothed_rms
    }

    /// Current smoothed RMS.
    pub fn value(&self) -> f32 {
        self.smoothed_rms
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Default for SmootherState {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}
