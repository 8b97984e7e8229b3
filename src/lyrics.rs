//! Lyric timing tables and the position-to-line derivation.
//!
//! A `LyricSheet` maps a continuous playback position to the discrete lyric
//! line that should be on screen. The derivation is a pure function of
//! (position, sheet) so it stays correct across seeks in either direction.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
