//! Reading-aloud loudness coach.
//!
//! Measures how loudly someone reads into a microphone (or a WAV file) and
//! decides whether the level has stayed above a target long enough to earn
//! praise rather than encouragement.
//!
//! | Module       | Responsibility                                              |
//! |--------------|-------------------------------------------------------------|
//! | [`audio`]    | WAV decoding, microphone capture, RMS/dBFS, smoothing       |
//! | [`feedback`] | dwell-time verdicts, meter mapping, feedback text           |
//! | [`session`]  | file and live sessions, explicit [`session::AudioSource`]   |
//! | [`config`]   | settings, validation and TOML persistence                   |

pub mod audio;
pub mod config;
pub mod feedback;
pub mod session;
