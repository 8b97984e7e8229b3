//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` struct is a pure projection of the audio thread's published
//! snapshot plus the local list selection; rendering reads it, it never
//! talks to the audio device itself.

use crate::audio::{PlaybackHandle, PlaybackInfo};
use crate::catalog::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    /// Catalog index of the track the audio thread currently owns.
    pub active_track: Option<usize>,
    /// Lyric cursor: index into the active track's sheet, derived from the
    /// latest snapshot. Never advanced incrementally.
    pub active_line: Option<usize>,
}

impl App {
    /// Create a new `App` with the provided catalog of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            active_track: None,
            active_line: None,
        }
    }

    /// Attach the `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Return true if the catalog contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Move selection to the next track, wrapping around.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move selection to the previous track, wrapping around.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = if self.selected == 0 {
                self.tracks.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Project the latest audio-thread snapshot into the model.
    ///
    /// The lyric cursor is recomputed from scratch on every sync: positions
    /// can have jumped in either direction since the previous snapshot, so
    /// carrying the old index forward would desynchronize after a seek.
    pub fn sync_from(&mut self, info: &PlaybackInfo) {
        self.active_track = info.index;
        match info.index {
            Some(idx) => {
                self.playback = if info.playing {
                    PlaybackState::Playing
                } else {
                    PlaybackState::Paused
                };
                self.active_line = self
                    .tracks
                    .get(idx)
                    .and_then(|t| t.lyrics.active_index(info.elapsed));
            }
            None => {
                self.playback = PlaybackState::Stopped;
                self.active_line = None;
            }
        }
    }

    /// Text of the lyric line current at the last synced position, if any.
    pub fn active_lyric(&self) -> Option<&str> {
        let track = self.tracks.get(self.active_track?)?;
        track
            .lyrics
            .lines()
            .get(self.active_line?)
            .map(|l| l.text.as_str())
    }
}
