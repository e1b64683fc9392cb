//! Clock and timing utilities for frame-driven animation.
//!
//! All animation state is advanced with an explicit `now` reading in
//! fractional milliseconds. This module provides the sources of that
//! reading:
//! - A monotonic clock anchored to an epoch (live runs)
//! - A manual clock stepped by the caller (tests, fixed-step simulation)

use std::cell::Cell;
use std::time::Instant;

/// Monotonic timestamp in fractional milliseconds since a clock epoch.
pub type TimestampMs = f64;

/// A source of monotonic millisecond readings.
pub trait Clock {
    /// Milliseconds elapsed since the clock's epoch. Never decreases.
    fn now_ms(&self) -> TimestampMs;
}

/// A clock that reads real monotonic time relative to a fixed epoch.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl MonotonicClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at clock start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Convert milliseconds to seconds.
    pub fn ms_to_secs(ms: TimestampMs) -> f64 {
        ms / 1_000.0
    }

    /// Convert seconds to milliseconds.
    pub fn secs_to_ms(secs: f64) -> TimestampMs {
        secs * 1_000.0
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> TimestampMs {
        self.epoch.elapsed().as_secs_f64() * 1_000.0
    }
}

/// A clock whose reading only changes when the caller moves it.
///
/// Readings are clamped so the clock stays monotonic: `set` to an
/// earlier time is ignored.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<TimestampMs>,
}

impl ManualClock {
    /// Create a manual clock starting at `start_ms`.
    pub fn new(start_ms: TimestampMs) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move the clock forward by `delta_ms`. Negative deltas are ignored.
    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now.set(self.now.get() + delta_ms);
        }
    }

    /// Jump to an absolute reading, if it is not in the past.
    pub fn set(&self, now_ms: TimestampMs) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> TimestampMs {
        self.now.get()
    }
}

/// Fixed frame interval in milliseconds for a target frame rate.
pub fn frame_interval_ms(fps: u32) -> f64 {
    1_000.0 / fps.max(1) as f64
}
