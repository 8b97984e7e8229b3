//! Pure helpers for computing seek targets.
//!
//! Out-of-range requests are clamped silently; callers never see an error
//! for a seek that lands outside the track.

use std::time::Duration;

/// Target position for a relative seek of `delta` seconds from `current`,
/// clamped to `[0, duration]`. With an unknown duration only the lower
/// bound applies.
pub(super) fn seek_by_target(
    current: Duration,
    delta: i64,
    duration: Option<Duration>,
) -> Duration {
    let target = current.as_secs_f64() + delta as f64;
    let mut target = Duration::from_secs_f64(target.max(0.0));
    if let Some(total) = duration {
        target = target.min(total);
    }
    target
}

/// Target position for a fraction-based seek. The fraction is clamped into
/// [0, 1] before use.
pub(super) fn seek_fraction_target(fraction: f64, duration: Duration) -> Duration {
    let f = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    duration.mul_f64(f)
}
