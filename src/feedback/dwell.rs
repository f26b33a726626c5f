//! Dwell-time threshold detector.
//!
//! [`DwellState`] turns a stream of (smoothed) dBFS readings into a stable
//! [`Verdict`].  Praise is only awarded once the level has stayed at or above
//! the target for an unbroken `hold` duration.
//!
//! The state machine transitions are:
//!
//! ```text
//! Below ──dbfs >= target──▶ Above(since = now)
//! Above(since) ──dbfs >= target──▶ Above(since)      (anchor not refreshed)
//! Above(since) ──dbfs <  target──▶ Below             (no grace period)
//! ```
//!
//! The verdict is derived, never stored: `Praising` iff the machine is
//! `Above(since)` and `now - since >= hold`.
//!
//! Time is always supplied by the caller; the detector never reads a clock.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use voice_level_coach::feedback::{DwellState, Verdict};
//!
//! let mut dwell = DwellState::new(-25.0, Duration::from_secs(1));
//! let t0 = Instant::now();
//!
//! assert_eq!(dwell.evaluate(-20.0, t0), Verdict::Encouraging);
//! assert_eq!(
//!     dwell.evaluate(-18.0, t0 + Duration::from_millis(1_000)),
//!     Verdict::Praising
//! );
//! ```

use std::time::{Duration, Instant};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Feedback decision for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Loud enough for long enough.
    Praising,
    /// Not there yet.
    Encouraging,
}

impl Verdict {
    pub fn is_praising(&self) -> bool {
        matches!(self, Verdict::Praising)
    }

    /// A short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Praising => "Praise",
            Verdict::Encouraging => "Encourage",
        }
    }
}

// ---------------------------------------------------------------------------
// DwellPhase
// ---------------------------------------------------------------------------

/// Snapshot of the detector's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellPhase {
    /// The last reading was under the target.
    Below,
    /// Readings have been at or above the target continuously since `since`.
    Above { since: Instant },
}

// ---------------------------------------------------------------------------
// DwellState
// ---------------------------------------------------------------------------

/// Per-session threshold detector.
#[derive(Debug, Clone)]
pub struct DwellState {
    above_since: Option<Instant>,
    target_dbfs: f32,
    hold: Duration,
}

impl DwellState {
    /// Create a detector in the `Below` state.
    pub fn new(target_dbfs: f32, hold: Duration) -> Self {
        Self {
            above_since: None,
            target_dbfs,
            hold,
        }
    }

    /// Apply one reading taken at `now`.
    pub fn observe(&mut self, current_dbfs: f32, now: Instant) {
        if current_dbfs >= self.target_dbfs {
            if self.above_since.is_none() {
                log::trace!("level reached target ({current_dbfs:.1} dBFS); dwell started");
                self.above_since = Some(now);
            }
        } else if self.above_since.take().is_some() {
            log::trace!("level dropped below target ({current_dbfs:.1} dBFS); dwell reset");
        }
    }

    /// Verdict at `now` given the current state.
    ///
    /// A `now` earlier than the dwell anchor counts as zero elapsed time.
    pub fn verdict(&self, now: Instant) -> Verdict {
        match self.above_since {
            Some(since) if now.saturating_duration_since(since) >= self.hold => Verdict::Praising,
            _ => Verdict::Encouraging,
        }
    }

    /// One evaluation tick: [`observe`](Self::observe) then
    /// [`verdict`](Self::verdict).
    pub fn evaluate(&mut self, current_dbfs: f32, now: Instant) -> Verdict {
        self.observe(current_dbfs, now);
        self.verdict(now)
    }

    pub fn phase(&self) -> DwellPhase {
        match self.above_since {
            Some(since) => DwellPhase::Above { since },
            None => DwellPhase::Below,
        }
    }

    /// How long the current run above target has lasted at `now`.
    pub fn held_for(&self, now: Instant) -> Duration {
        self.above_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or(Duration::ZERO)
    }

    pub fn target_dbfs(&self) -> f32 {
        self.target_dbfs
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: f32 = -25.0;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Feed `level` every 100 ms from `t0` for `total` and return the last verdict.
    fn feed_constant(dwell: &mut DwellState, t0: Instant, level: f32, total: Duration) -> Verdict {
        let mut t = Duration::ZERO;
        let mut verdict = dwell.evaluate(level, t0);
        while t < total {
            t += ms(100);
            verdict = dwell.evaluate(level, t0 + t);
        }
        verdict
    }

    #[test]
    fn starts_below() {
        let dwell = DwellState::new(TARGET, ms(1_000));
        assert_eq!(dwell.phase(), DwellPhase::Below);
        assert_eq!(dwell.verdict(Instant::now()), Verdict::Encouraging);
    }

    #[test]
    fn shorter_than_hold_encourages() {
        let mut dwell = DwellState::new(TARGET, ms(1_000));
        let verdict = feed_constant(&mut dwell, Instant::now(), -20.0, ms(900));
        assert_eq!(verdict, Verdict::Encouraging);
    }

    #[test]
    fn reaching_hold_praises() {
        let mut dwell = DwellState::new(TARGET, ms(1_000));
        let verdict = feed_constant(&mut dwell, Instant::now(), -20.0, ms(1_000));
        assert_eq!(verdict, Verdict::Praising);
    }

    #[test]
    fn exactly_at_target_counts_as_above() {
        let mut dwell = DwellState::new(TARGET, ms(500));
        let t0 = Instant::now();
        dwell.observe(TARGET, t0);
        assert_eq!(dwell.phase(), DwellPhase::Above { since: t0 });
        assert_eq!(dwell.verdict(t0 + ms(500)), Verdict::Praising);
    }

    #[test]
    fn anchor_not_refreshed_while_above() {
        let mut dwell = DwellState::new(TARGET, ms(1_000));
        let t0 = Instant::now();
        dwell.observe(-10.0, t0);
        dwell.observe(-12.0, t0 + ms(400));
        dwell.observe(-11.0, t0 + ms(800));
        assert_eq!(dwell.phase(), DwellPhase::Above { since: t0 });
        assert_eq!(dwell.held_for(t0 + ms(800)), ms(800));
    }

    #[test]
    fn single_dip_resets_the_run() {
        let mut dwell = DwellState::new(TARGET, ms(1_000));
        let t0 = Instant::now();

        dwell.evaluate(-20.0, t0);
        dwell.evaluate(-20.0, t0 + ms(800));
        // One reading below target
        dwell.evaluate(-30.0, t0 + ms(900));
        assert_eq!(dwell.phase(), DwellPhase::Below);

        // Back above: the clock restarts at 1 s
        assert_eq!(dwell.evaluate(-20.0, t0 + ms(1_000)), Verdict::Encouraging);
        assert_eq!(dwell.evaluate(-20.0, t0 + ms(1_500)), Verdict::Encouraging);
        assert_eq!(dwell.evaluate(-20.0, t0 + ms(1_999)), Verdict::Encouraging);
        assert_eq!(dwell.evaluate(-20.0, t0 + ms(2_000)), Verdict::Praising);
    }

    #[test]
    fn praise_lost_immediately_on_dip() {
        let mut dwell = DwellState::new(TARGET, ms(500));
        let t0 = Instant::now();
        assert_eq!(feed_constant(&mut dwell, t0, -10.0, ms(600)), Verdict::Praising);
        assert_eq!(dwell.evaluate(-40.0, t0 + ms(700)), Verdict::Encouraging);
    }

    #[test]
    fn silence_is_below_target() {
        let mut dwell = DwellState::new(-60.0, Duration::ZERO);
        let now = Instant::now();
        assert_eq!(dwell.evaluate(f32::NEG_INFINITY, now), Verdict::Encouraging);
        assert_eq!(dwell.phase(), DwellPhase::Below);
    }

    #[test]
    fn zero_hold_praises_on_first_tick_above() {
        let mut dwell = DwellState::new(TARGET, Duration::ZERO);
        assert_eq!(dwell.evaluate(-5.0, Instant::now()), Verdict::Praising);
    }

    #[test]
    fn time_going_backwards_counts_as_zero() {
        let mut dwell = DwellState::new(TARGET, ms(100));
        let t0 = Instant::now() + ms(1_000);
        dwell.observe(-10.0, t0);
        assert_eq!(dwell.held_for(t0 - ms(500)), Duration::ZERO);
        assert_eq!(dwell.verdict(t0 - ms(500)), Verdict::Encouraging);
    }

    #[test]
    fn verdict_labels() {
        assert_eq!(Verdict::Praising.label(), "Praise");
        assert_eq!(Verdict::Encouraging.label(), "Encourage");
        assert!(Verdict::Praising.is_praising());
        assert!(!Verdict::Encouraging.is_praising());
    }
}
