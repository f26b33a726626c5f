//! Channel down-mixing shared by the decoder and the live frame path.
//!
//! Both entry points collapse interleaved frames to mono by taking the
//! arithmetic mean across channels, so a stereo file and a stereo capture
//! buffer with the same content produce the same level.
//!
//! * [`downmix_f32`] — float domain, used for float PCM and live frames.
//! * [`downmix_i16`] — integer domain, used for 16-bit PCM.  The mean is
//!   truncated toward zero back into an `i16` before normalisation.

// ---------------------------------------------------------------------------
// downmix_f32
// ---------------------------------------------------------------------------

/// Mix interleaved multi-channel audio down to mono by averaging all channels.
///
/// The output length is `samples.len() / channels`; a trailing partial frame
/// is ignored.
///
/// * If `channels == 1` the input slice is returned as an owned `Vec`.
/// * If `channels == 0` an empty vector is returned.
///
/// # Example
///
/// ```rust
/// use voice_level_coach::audio::downmix_f32;
///
/// let stereo = vec![0.5_f32, -0.5, 0.4, 0.2]; // L R L R
/// let mono = downmix_f32(&stereo, 2);
/// assert_eq!(mono.len(), 2);
/// assert!((mono[0] - 0.0).abs() < 1e-6);
/// assert!((mono[1] - 0.3).abs() < 1e-6);
/// ```
pub fn downmix_f32(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// downmix_i16
// ---------------------------------------------------------------------------

/// Integer-domain counterpart of [`downmix_f32`].
///
/// Each output sample is the per-frame mean truncated toward zero, so
/// `[3, 4]` mixes to `3` and `[-3, -4]` mixes to `-3`.
pub fn downmix_i16(samples: &[i16], channels: u16) -> Vec<i16> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| {
                    let sum: i64 = frame.iter().map(|&s| s as i64).sum();
                    (sum / n as i64) as i16
                })
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
