//! Audio-related small types and handles.
//!
//! This module defines the command enum, the published playback snapshot
//! and the shared handle the rest of the app reads it through.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Activate the track at the given catalog index. Selecting the already
    /// active track again stops it instead (toggle-to-stop).
    Select(usize),
    /// Toggle pause/resume. No-op when no track is active.
    Toggle,
    /// Seek by the given number of seconds (positive or negative), clamped
    /// to the track bounds.
    SeekBy(i64),
    /// Seek to a fraction of the total duration in [0, 1]. Ignored until
    /// the duration is known.
    SeekTo(f64),
    /// Deactivate the current track and reset playback state.
    Close,
    /// Quit the audio thread, optionally fading out over `fade_out_ms`
    /// milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Catalog index of the active track (if any).
    pub index: Option<usize>,
    /// Elapsed playback time, clamped to `duration` when known.
    pub elapsed: Duration,
    /// Total track duration; `None` until file metadata has been read.
    pub duration: Option<Duration>,
    /// Whether playback is currently advancing.
    pub playing: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
        }
    }
}

impl PlaybackInfo {
    /// Fraction of the track played, in [0, 1]. `None` while the duration
    /// is unknown.
    pub fn progress(&self) -> Option<f64> {
        let total = self.duration.filter(|d| !d.is_zero())?;
        Some((self.elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
