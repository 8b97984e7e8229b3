use std::path::PathBuf;

use crate::lyrics::LyricSheet;

/// A playable preview with its lyric timing table resolved. Immutable once
/// the catalog is built.
#[derive(Clone)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub description: String,
    pub path: PathBuf,
    pub lyrics: LyricSheet,
}
