use std::time::Duration;

use crate::config::{LyricEntry, Settings};
use crate::lyrics::{LyricLine, LyricSheet};

use super::model::Track;

fn sheet_from_entries(entries: &[LyricEntry]) -> LyricSheet {
    LyricSheet::new(
        entries
            .iter()
            .map(|e| LyricLine {
                // from_secs_f64 panics on negative input; validate()
                // rejects those, the clamp covers hand-built Settings.
                time: Duration::from_secs_f64(e.time.max(0.0)),
                text: e.text.clone(),
            })
            .collect(),
    )
}

/// Resolve configured track entries into playable `Track`s.
///
/// An unknown lyric key resolves to an empty sheet: the track still plays,
/// it just has no lyric display.
pub fn build(settings: &Settings) -> Vec<Track> {
    settings
        .tracks
        .iter()
        .map(|t| Track {
            id: t.resolved_id().to_string(),
            title: t.title.clone(),
            description: t.description.clone(),
            path: t.audio.clone(),
            lyrics: settings
                .lyrics
                .get(&t.lyrics)
                .map(|entries| sheet_from_entries(entries))
                .unwrap_or_default(),
        })
        .collect()
}
