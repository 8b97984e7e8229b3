//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, selection
//! and the mirrored playback/lyric state.

mod model;

pub use model::*;
