//! Loudness feedback — dwell-time verdicts, meter mapping and text messages.
//!
//! ```text
//! smoothed dBFS ─▶ DwellState::evaluate ─▶ Verdict ─▶ compose (text)
//!              └─▶ map_meter ─▶ MeterReading (percent + band)
//! ```

pub mod dwell;
pub mod message;
pub mod meter;

pub use dwell::{DwellPhase, DwellState, Verdict};
pub use message::{compose, readout};
pub use meter::{map_meter, target_percent, MeterBand, MeterReading};
