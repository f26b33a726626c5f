//! Live-capture session: one frame in, one [`TickReport`] out.
//!
//! # Per-frame flow
//!
//! ```text
//! AudioFrame ─▶ measure_interleaved ─▶ raw LevelMeasurement
//!                                        │
//!                                        ▼
//!                          SmootherState::update (rms)
//!                                        │
//!                                        ▼
//!                         smoothed LevelMeasurement (dBFS)
//!                           ├─▶ DwellState::evaluate ─▶ Verdict
//!                           └─▶ map_meter ─▶ MeterReading
//! ```
//!
//! Smoother and dwell state are order-dependent, so frames must be fed in
//! arrival order, exactly once each.  [`run_live`] guarantees that by being
//! the single consumer of the frame channel.

use std::time::Instant;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::audio::{measure_interleaved, AudioFrame, LevelMeasurement, SmootherState};
use crate::config::{ConfigError, DetectorConfig};
use crate::feedback::{map_meter, DwellState, MeterReading, Verdict};

// ---------------------------------------------------------------------------
// TickReport
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    /// Level of this frame alone.
    pub raw: LevelMeasurement,
    /// Level after exponential smoothing; drives verdict and meter.
    pub smoothed: LevelMeasurement,
    pub verdict: Verdict,
    pub meter: MeterReading,
}

// ---------------------------------------------------------------------------
// LiveSession
// ---------------------------------------------------------------------------

/// State owned by one live capture.  Never shared between sessions.
#[derive(Debug, Clone)]
pub struct LiveSession {
    smoother: SmootherState,
    dwell: DwellState,
    target_dbfs: f32,
    frames: u64,
}

impl LiveSession {
    /// Start a session in the `Below` state with a silent smoother.
    pub fn new(config: &DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            smoother: SmootherState::new(config.smoothing_alpha),
            dwell: DwellState::new(config.target_dbfs, config.hold()),
            target_dbfs: config.target_dbfs,
            frames: 0,
        })
    }

    /// Run one frame captured at `now` through the pipeline.
    pub fn process_frame(&mut self, frame: &AudioFrame, now: Instant) -> TickReport {
        let raw = measure_interleaved(&frame.samples, frame.channels);
        let smoothed = LevelMeasurement::from_rms(self.smoother.update(raw.rms));
        let verdict = self.dwell.evaluate(smoothed.dbfs, now);
        self.frames += 1;

        TickReport {
            raw,
            smoothed,
            verdict,
            meter: map_meter(smoothed.dbfs, self.target_dbfs),
        }
    }

    /// Number of frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    pub fn dwell(&self) -> &DwellState {
        &self.dwell
    }

    pub fn smoother(&self) -> &SmootherState {
        &self.smoother
    }
}

// ---------------------------------------------------------------------------
// run_live
// ---------------------------------------------------------------------------

/// Consume `frames` until the capture side closes, forwarding one
/// [`TickReport`] per frame to `reports`.
///
/// Each frame is stamped with [`Instant::now`] on arrival.  The loop also
/// ends early when the report receiver is dropped.  Returns the session so
/// the caller can inspect its final state.
pub async fn run_live(
    mut session: LiveSession,
    mut frames: mpsc::UnboundedReceiver<AudioFrame>,
    reports: mpsc::Sender<TickReport>,
) -> LiveSession {
    while let Some(frame) = frames.recv().await {
        let report = session.process_frame(&frame, Instant::now());
        if reports.send(report).await.is_err() {
            log::debug!("report receiver dropped; ending live session");
            break;
        }
    }
    log::info!(
        "live session finished after {} frames",
        session.frames_processed()
    );
    session
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
