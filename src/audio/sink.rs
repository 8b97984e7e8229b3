//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! The helpers here encapsulate opening/decoding an audio file, preparing a
//! paused `Sink` at the requested start position and probing the track
//! duration from file metadata.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::catalog::Track;

/// Why a sink could not be built for a track. Recoverable: the player
/// reverts to the paused state and waits for the next command.
#[derive(Debug)]
pub(super) enum SinkError {
    Open(io::Error),
    Decode(DecoderError),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Open(e) => write!(f, "failed to open audio source: {e}"),
            SinkError::Decode(e) => write!(f, "failed to decode audio source: {e}"),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        SinkError::Open(e)
    }
}

impl From<DecoderError> for SinkError {
    fn from(e: DecoderError) -> Self {
        SinkError::Decode(e)
    }
}

/// Create a paused `Sink` for `track` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    track: &Track,
    start_at: Duration,
) -> Result<Sink, SinkError> {
    let file = File::open(&track.path)?;

    let source = Decoder::new(BufReader::new(file))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Read the track's total duration from its file metadata. `None` until a
/// readable tag is found; fraction-based seeks stay disabled meanwhile.
pub(super) fn probe_duration(track: &Track) -> Option<Duration> {
    lofty::read_from_path(&track.path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
