//! Audio playback subsystem.
//!
//! A dedicated thread owns the single output stream and at most one sink,
//! executes transport commands and publishes `PlaybackInfo` snapshots
//! through a shared handle.

mod player;
mod seek;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, PlaybackHandle, PlaybackInfo};
