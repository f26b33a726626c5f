//! Microphone capture via `cpal`.
//!
//! [`AudioCapture`] wraps the cpal host/device/stream lifecycle.  Call
//! [`AudioCapture::start`] to begin streaming [`AudioFrame`]s over a tokio
//! channel.  The returned [`StreamHandle`] is a RAII guard: dropping it
//! stops the underlying cpal stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use super::decode::I16_FULL_SCALE;

// ---------------------------------------------------------------------------
// AudioFrame
// ---------------------------------------------------------------------------

/// A single buffer of raw audio as delivered by a capture backend.
///
/// Samples are interleaved `f32` in the range `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    /// Interleaved PCM samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Sample rate of this frame in Hz (e.g. 44100, 48000).
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono, 2 = stereo, …).
    pub channels: u16,
}

impl AudioFrame {
    /// Wrap interleaved float samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Build a frame from 16-bit integer capture data, normalised by 32768.
    ///
    /// ```rust
    /// use voice_level_coach::audio::AudioFrame;
    ///
    /// let frame = AudioFrame::from_i16(&[16_384, -32_768], 48_000, 1);
    /// assert_eq!(frame.samples, vec![0.5, -1.0]);
    /// ```
    pub fn from_i16(samples: &[i16], sample_rate: u32, channels: u16) -> Self {
        Self {
            samples: samples.iter().map(|&s| s as f32 / I16_FULL_SCALE).collect(),
            sample_rate,
            channels,
        }
    }

    /// Number of sample frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        match self.channels {
            0 => 0,
            n => self.samples.len() / n as usize,
        }
    }
}

// ---------------------------------------------------------------------------
// StreamHandle
// ---------------------------------------------------------------------------

/// RAII guard that keeps the cpal stream alive.
pub struct StreamHandle {
    _stream: cpal::Stream,
}

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors that can occur while setting up or running the audio capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no input device found on the default audio host")]
    NoDevice,

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("input device uses unsupported sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// AudioCapture
// ---------------------------------------------------------------------------

/// Default-microphone capture built on top of `cpal`.
///
/// ```rust,no_run
/// use tokio::sync::mpsc;
/// use voice_level_coach::audio::{AudioCapture, AudioFrame};
///
/// let (tx, mut rx) = mpsc::unbounded_channel::<AudioFrame>();
/// let capture = AudioCapture::new().unwrap();
/// let _handle = capture.start(tx).unwrap();
/// // `_handle` keeps the stream alive; drop it to stop capturing.
/// ```
pub struct AudioCapture {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    sample_rate: u32,
    channels: u16,
}

impl AudioCapture {
    /// Open the system default input device with its preferred config.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NoDevice`] when no input device is available,
    /// or [`CaptureError::DefaultConfig`] when the device cannot report a
    /// default stream configuration.
    pub fn new() -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(CaptureError::NoDevice)?;

        let supported = device.default_input_config()?;

        let sample_format = supported.sample_format();
        let channels = supported.channels();
        let sample_rate = supported.sample_rate().0;
        let config: cpal::StreamConfig = supported.into();

        Ok(Self {
            device,
            config,
            sample_format,
            sample_rate,
            channels,
        })
    }

    /// Start capturing and send one [`AudioFrame`] per hardware buffer.
    ///
    /// The channel is unbounded so the audio thread never blocks and no
    /// frame is dropped; frames reach the receiver in capture order.  Send
    /// errors (receiver dropped) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::UnsupportedSampleFormat`] for devices that are
    /// neither `f32` nor `i16`, or a build/play error from cpal.
    pub fn start(&self, tx: UnboundedSender<AudioFrame>) -> Result<StreamHandle, CaptureError> {
        let sample_rate = self.sample_rate;
        let channels = self.channels;
        let on_error = |err: cpal::StreamError| {
            log::error!("cpal stream error: {err}");
        };

        let stream = match self.sample_format {
            cpal::SampleFormat::F32 => self.device.build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(AudioFrame::new(data.to_vec(), sample_rate, channels));
                },
                on_error,
                None,
            )?,
            cpal::SampleFormat::I16 => self.device.build_input_stream(
                &self.config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(AudioFrame::from_i16(data, sample_rate, channels));
                },
                on_error,
                None,
            )?,
            other => return Err(CaptureError::UnsupportedSampleFormat(other)),
        };

        stream.play()?;
        Ok(StreamHandle { _stream: stream })
    }

    /// Native sample rate of the capture stream in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels in each [`AudioFrame`].
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
