//! Explicit audio-source selection.
//!
//! The host application decides up front whether a session analyses an
//! uploaded file or a live stream; nothing is probed at load time.

use std::time::Instant;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::audio::{AudioFrame, DecodeError};
use crate::config::{ConfigError, DetectorConfig};

use super::file::{analyze_upload, FileReport};
use super::live::{run_live, LiveSession, TickReport};

/// Where a session's audio comes from.
#[derive(Debug)]
pub enum AudioSource {
    /// A complete WAV container, analysed in one shot.
    FileUpload(Vec<u8>),
    /// Frames pushed by a capture backend, processed one by one.
    LiveStream(mpsc::UnboundedReceiver<AudioFrame>),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    File(FileReport),
    Live { frames: u64 },
}

/// Failure to run a session.  Fatal to that input only; the caller may
/// start another session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("invalid detector settings: {0}")]
    Config(#[from] ConfigError),
}

/// Run a session over `source`.
///
/// Live sessions send one [`TickReport`] per frame to `reports` and return
/// when the capture side closes.  File sessions return their report
/// directly and send nothing.
pub async fn run_source(
    source: AudioSource,
    config: &DetectorConfig,
    reports: mpsc::Sender<TickReport>,
) -> Result<SessionOutcome, SessionError> {
    config.validate()?;
    match source {
        AudioSource::FileUpload(bytes) => {
            let report = analyze_upload(&bytes, config, Instant::now())?;
            Ok(SessionOutcome::File(report))
        }
        AudioSource::LiveStream(frames) => {
            let session = LiveSession::new(config)?;
            let session = run_live(session, frames, reports).await;
            Ok(SessionOutcome::Live {
                frames: session.frames_processed(),
            })
        }
    }
}
