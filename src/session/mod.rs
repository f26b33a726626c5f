//! Capture sessions — wiring audio sources through meter, smoother and
//! dwell detector.
//!
//! # Architecture
//!
//! ```text
//! AudioSource::FileUpload(bytes)
//!   └─▶ analyze_upload: decode_wav → measure → one-shot dwell → FileReport
//!
//! AudioSource::LiveStream(rx)
//!   └─▶ run_live (single consumer task)
//!         └─▶ LiveSession::process_frame per frame → TickReport (mpsc)
//! ```
//!
//! Every session owns its own smoother and dwell state; running several
//! sessions side by side needs no locking.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tokio::sync::mpsc;
//! use voice_level_coach::audio::AudioCapture;
//! use voice_level_coach::config::AppConfig;
//! use voice_level_coach::session::{run_source, AudioSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let (frame_tx, frame_rx) = mpsc::unbounded_channel();
//!     let (report_tx, mut report_rx) = mpsc::channel(64);
//!
//!     let capture = AudioCapture::new().unwrap();
//!     let _stream = capture.start(frame_tx).unwrap();
//!
//!     tokio::spawn(async move {
//!         run_source(AudioSource::LiveStream(frame_rx), &config.detector, report_tx).await
//!     });
//!
//!     while let Some(tick) = report_rx.recv().await {
//!         println!("{:?} {}%", tick.verdict, tick.meter.percent);
//!     }
//! }
//! ```

pub mod file;
pub mod live;
pub mod source;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use file::{analyze_upload, analyze_waveform, AnalysisWarning, FileReport};
pub use live::{run_live, LiveSession, TickReport};
pub use source::{run_source, AudioSource, SessionError, SessionOutcome};
