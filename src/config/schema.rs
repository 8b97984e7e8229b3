use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reprise/config.toml` or
/// `~/.config/reprise/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REPRISE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    /// The preview catalog, in display order.
    pub tracks: Vec<TrackSettings>,
    /// Lyric tables keyed by the name `TrackSettings::lyrics` refers to.
    pub lyrics: HashMap<String, Vec<LyricEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Start playback immediately when a track is selected.
    pub autoplay: bool,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to skip when pressing `H` / `L`.
    pub seek_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_seconds: 10 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Whether the current lyric line is shown while a track is active.
    pub show_lyrics: bool,

    /// Which time fields to show next to the progress bar, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ featured singles ~ ".to_string(),
            show_lyrics: true,
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

/// One catalog entry. The audio path is used as-is; lyric timing comes from
/// the `[lyrics]` table named by `lyrics`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TrackSettings {
    /// Stable identifier; defaults to `title` when left empty.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Path to the playable audio file.
    pub audio: PathBuf,
    /// Key into the `[lyrics]` lookup.
    pub lyrics: String,
}

impl TrackSettings {
    pub fn resolved_id(&self) -> &str {
        if self.id.trim().is_empty() {
            &self.title
        } else {
            &self.id
        }
    }
}

/// One timed lyric line as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct LyricEntry {
    /// Seconds from the start of the track at which the line becomes current.
    pub time: f64,
    pub text: String,
}

impl Settings {
    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.seek_seconds == 0 {
            return Err("controls.seek_seconds must be >= 1".to_string());
        }

        let mut ids: HashSet<&str> = HashSet::new();
        for track in &self.tracks {
            let id = track.resolved_id();
            if id.trim().is_empty() {
                return Err("each track needs an id or a title".to_string());
            }
            if !ids.insert(id) {
                return Err(format!("duplicate track id: {id}"));
            }
        }

        for (key, entries) in &self.lyrics {
            for entry in entries {
                if !entry.time.is_finite() || entry.time < 0.0 {
                    return Err(format!(
                        "lyrics.{key}: timestamps must be non-negative seconds"
                    ));
                }
            }
        }

        Ok(())
    }
}
