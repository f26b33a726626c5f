//! Audio pipeline — PCM decoding, live capture, level metering and smoothing.
//!
//! # Pipeline
//!
//! ```text
//! WAV bytes ─▶ decode_wav ─▶ Waveform ─────────────┐
//!                                                  ├─▶ measure ─▶ LevelMeasurement
//! Microphone ─▶ cpal callback ─▶ AudioFrame ───────┘        │
//!                                                          ▼
//!                                     SmootherState (live frames only)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tokio::sync::mpsc;
//! use voice_level_coach::audio::{measure_interleaved, AudioCapture, AudioFrame};
//!
//! let (tx, mut rx) = mpsc::unbounded_channel::<AudioFrame>();
//! let capture = AudioCapture::new().unwrap();
//! let _handle = capture.start(tx).unwrap(); // drops handle → stops stream
//!
//! while let Some(frame) = rx.blocking_recv() {
//!     let level = measure_interleaved(&frame.samples, frame.channels);
//!     println!("{:.1} dBFS", level.dbfs);
//! }
//! ```

pub mod capture;
pub mod decode;
pub mod level;
pub mod mix;
pub mod smoother;

pub use capture::{AudioCapture, AudioFrame, CaptureError, StreamHandle};
pub use decode::{decode_wav, decode_wav_file, DecodeError, Waveform};
pub use level::{measure, measure_interleaved, LevelMeasurement};
pub use mix::{downmix_f32, downmix_i16};
pub use smoother::SmootherState;
