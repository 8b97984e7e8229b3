use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::catalog::Track;
use crate::config::AudioSettings;

use super::seek::{seek_by_target, seek_fraction_target};
use super::sink::{create_sink_at, probe_duration};
use super::types::{AudioCmd, PlaybackHandle};

/// Transport state owned by the audio thread. At most one sink exists at a
/// time; it is stopped and dropped before a replacement is created, so a
/// tick can never describe a sink that has already been replaced.
struct Transport {
    active: Option<usize>,
    sink: Option<Sink>,
    paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<Duration>,
}

impl Transport {
    fn empty() -> Self {
        Self {
            active: None,
            sink: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            duration: None,
        }
    }

    /// Elapsed playback time, clamped to the known duration.
    fn elapsed(&self) -> Duration {
        let raw = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(total) => raw.min(total),
            None => raw,
        }
    }

    /// Stop and release the current sink and reset to the empty state.
    fn teardown(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        *self = Transport::empty();
    }

    /// Publish the current snapshot to the shared handle.
    fn publish(&self, playback_info: &PlaybackHandle) {
        if let Ok(mut info) = playback_info.lock() {
            info.index = self.active;
            info.elapsed = if self.active.is_some() {
                self.elapsed()
            } else {
                Duration::ZERO
            };
            info.duration = self.duration;
            info.playing = self.active.is_some() && !self.paused;
        }
    }
}

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut t = Transport::empty();

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Select(i) => {
                        let same_track = t
                            .active
                            .and_then(|a| tracks.get(a))
                            .zip(tracks.get(i))
                            .is_some_and(|(cur, next)| cur.id == next.id);
                        if same_track {
                            // Selecting the active track again acts as stop.
                            t.teardown();
                        } else if let Some(track) = tracks.get(i) {
                            // Fully release the previous sink before the new
                            // track exists; no stale state can leak across.
                            t.teardown();
                            t.active = Some(i);
                            t.duration = probe_duration(track);
                            match create_sink_at(&stream, track, Duration::ZERO) {
                                Ok(sink) => {
                                    if audio_settings.autoplay {
                                        sink.play();
                                        t.paused = false;
                                        t.started_at = Some(Instant::now());
                                    }
                                    t.sink = Some(sink);
                                }
                                Err(_) => {
                                    // Playback rejected (unreadable or
                                    // undecodable source): stay selected but
                                    // paused at the start, no error surfaced.
                                    t.paused = true;
                                }
                            }
                        }
                        t.publish(&playback_info);
                    }

                    AudioCmd::Toggle => {
                        if t.active.is_none() {
                            continue;
                        }

                        if !t.paused {
                            // Pausing: bank the elapsed time.
                            if let Some(ref s) = t.sink {
                                s.pause();
                            }
                            t.accumulated = t.elapsed();
                            t.started_at = None;
                            t.paused = true;
                        } else if let Some(ref s) = t.sink {
                            s.play();
                            t.paused = false;
                            t.started_at = Some(Instant::now());
                        } else if let Some(track) = t.active.and_then(|i| tracks.get(i)) {
                            // The sink is gone (finished preview or a
                            // rejected start). Rebuild at the current
                            // position, from the start when the preview
                            // already ran to the end.
                            let mut start_at = t.elapsed();
                            if t.duration.is_some_and(|total| start_at >= total) {
                                start_at = Duration::ZERO;
                            }
                            match create_sink_at(&stream, track, start_at) {
                                Ok(sink) => {
                                    sink.play();
                                    t.sink = Some(sink);
                                    t.accumulated = start_at;
                                    t.started_at = Some(Instant::now());
                                    t.paused = false;
                                }
                                Err(_) => {
                                    // Resume rejected; stay paused.
                                    t.paused = true;
                                }
                            }
                        }
                        t.publish(&playback_info);
                    }

                    AudioCmd::SeekBy(secs) => {
                        let target = seek_by_target(t.elapsed(), secs, t.duration);
                        seek_to(&mut t, &stream, &tracks, target);
                        t.publish(&playback_info);
                    }

                    AudioCmd::SeekTo(fraction) => {
                        // Fraction seeks need a known duration; ignore them
                        // until metadata has been read.
                        let Some(total) = t.duration else {
                            continue;
                        };
                        let target = seek_fraction_target(fraction, total);
                        seek_to(&mut t, &stream, &tracks, target);
                        t.publish(&playback_info);
                    }

                    AudioCmd::Close => {
                        t.teardown();
                        t.publish(&playback_info);
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = t.sink {
                            if !t.paused {
                                fade_out_sink(s, fade_out_ms);
                            }
                            s.stop();
                        }
                        // Update shared state so the UI doesn't keep showing
                        // Playing while the process winds down.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: refresh the elapsed clock and detect
                    // end of track.
                    if t.active.is_some() {
                        if let Some(ref s) = t.sink {
                            if !t.paused && s.empty() {
                                // The preview finished: it stays active so
                                // the UI keeps showing it, but transport
                                // stops advancing.
                                t.accumulated = t.elapsed();
                                t.sink = None;
                                t.started_at = None;
                                t.paused = true;
                            }
                        }
                        t.publish(&playback_info);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Scrubbing: rebuild the current sink and skip into the file. This uses
/// `Source::skip_duration` (works for common formats) and preserves the
/// paused/playing state.
fn seek_to(t: &mut Transport, stream: &OutputStream, tracks: &[Track], target: Duration) {
    let Some(track) = t.active.and_then(|i| tracks.get(i)) else {
        return;
    };

    if let Some(s) = t.sink.take() {
        s.stop();
    }

    t.accumulated = target;
    match create_sink_at(stream, track, target) {
        Ok(sink) => {
            if t.paused {
                t.started_at = None;
            } else {
                sink.play();
                t.started_at = Some(Instant::now());
            }
            t.sink = Some(sink);
        }
        Err(_) => {
            // Rebuild failed; hold the position and fall back to paused.
            t.started_at = None;
            t.paused = true;
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
