//! The preview catalog: configured track entries resolved into playable
//! `Track` values with their lyric tables attached.

mod build;
mod model;

pub use build::build;
pub use model::Track;
