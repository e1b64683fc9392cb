//! Timed blink state machine.
//!
//! The cycle sits `Idle` until the scheduled start, then spends exactly
//! `blink_duration_ms` in `Closing`, during which the closure factor traces
//! one half-period of a sine: open, closed at the midpoint, open again.
//!
//! The next blink is scheduled when a blink *starts*, so blink duration
//! never stretches the interval between blinks.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use gazerig_common::clock::TimestampMs;
use gazerig_common::config::BlinkConfig;
use gazerig_common::error::GazerigResult;

/// Where the cycle is in its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlinkPhase {
    /// Eyes open, waiting for `next_blink_at`.
    Idle,
    /// Inside a blink; covers both the closing and the reopening half.
    Closing,
}

/// Self-scheduling blink generator producing an eyelid closure factor.
#[derive(Debug, Clone)]
pub struct BlinkCycle<R = StdRng> {
    config: BlinkConfig,
    rng: R,
    phase: BlinkPhase,
    next_blink_at: TimestampMs,
    blink_started_at: Option<TimestampMs>,
    closure: f64,
    blinks_started: u64,
}

impl BlinkCycle<StdRng> {
    /// Create a cycle seeded from the operating system.
    pub fn new(config: BlinkConfig, now: TimestampMs) -> GazerigResult<Self> {
        Self::with_rng(config, now, StdRng::from_os_rng())
    }

    /// Create a cycle with a reproducible jitter sequence.
    pub fn seeded(config: BlinkConfig, now: TimestampMs, seed: u64) -> GazerigResult<Self> {
        Self::with_rng(config, now, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BlinkCycle<R> {
    /// Create a cycle drawing jitter from `rng`. The first blink is
    /// scheduled `first_blink_delay_ms` after `now`.
    pub fn with_rng(config: BlinkConfig, now: TimestampMs, rng: R) -> GazerigResult<Self> {
        config.validate()?;
        Ok(Self {
            next_blink_at: now + config.first_blink_delay_ms,
            config,
            rng,
            phase: BlinkPhase::Idle,
            blink_started_at: None,
            closure: 0.0,
            blinks_started: 0,
        })
    }

    /// Advance to `now` and return the closure factor in `[0, close_percentage]`.
    pub fn tick(&mut self, now: TimestampMs) -> f64 {
        if self.phase == BlinkPhase::Idle && now >= self.next_blink_at {
            self.start_blink(now);
        }

        if self.phase == BlinkPhase::Closing {
            let started = self.blink_started_at.unwrap_or(now);
            let progress = ((now - started) / self.config.blink_duration_ms).max(0.0);
            if progress >= 1.0 {
                self.phase = BlinkPhase::Idle;
                self.closure = 0.0;
            } else {
                self.closure = (progress * PI).sin() * self.config.close_percentage;
            }
        }

        self.closure
    }

    fn start_blink(&mut self, now: TimestampMs) {
        let interval = self.next_interval();
        self.phase = BlinkPhase::Closing;
        self.blink_started_at = Some(now);
        self.next_blink_at = now + interval;
        self.blinks_started += 1;
        tracing::debug!(
            at_ms = now,
            next_ms = self.next_blink_at,
            count = self.blinks_started,
            "Blink started"
        );
    }

    /// Nominal interval plus uniform jitter of total width `interval * randomization`.
    fn next_interval(&mut self) -> f64 {
        let base = self.config.time_between_blinks_ms;
        let jitter = (self.rng.random::<f64>() - 0.5) * base * self.config.randomization;
        base + jitter
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn next_blink_at(&self) -> TimestampMs {
        self.next_blink_at
    }

    /// Start of the most recent blink, if any has happened.
    pub fn blink_started_at(&self) -> Option<TimestampMs> {
        self.blink_started_at
    }

    pub fn closure_factor(&self) -> f64 {
        self.closure
    }

    /// Number of blinks started since construction.
    pub fn blinks_started(&self) -> u64 {
        self.blinks_started
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }
}
