//! Pointer-driven gaze smoothing.
//!
//! The filter keeps two offsets: a target, replaced only when the pointer is
//! present and has rested for `delay_before_response_ms`, and the emitted
//! offset, which moves toward the target by a fixed fraction every frame.
//!
//! The step is per frame, not per millisecond, so settle time scales with
//! frame rate.

use gazerig_common::clock::TimestampMs;
use gazerig_common::config::GazeConfig;
use gazerig_common::error::GazerigResult;
use gazerig_rig_model::math::Vec2;

/// Smoothed two-axis eye offset driven by pointer position.
#[derive(Debug, Clone)]
pub struct GazeFilter {
    config: GazeConfig,
    current: Vec2,
    target: Vec2,
    pointer_present: bool,
    /// `None` until the first move; treated as "rested long enough".
    last_move_at: Option<TimestampMs>,
    last_pointer: Vec2,
}

impl GazeFilter {
    /// Create a filter at rest, with the pointer outside the surface.
    pub fn new(config: GazeConfig) -> GazerigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Create a filter with default tuning.
    pub fn with_defaults() -> Self {
        Self::from_valid(GazeConfig::default())
    }

    fn from_valid(config: GazeConfig) -> Self {
        Self {
            config,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            pointer_present: false,
            last_move_at: None,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.pointer_present = true;
    }

    /// The target snaps to zero here; the emitted offset still eases back.
    pub fn on_pointer_leave(&mut self) {
        self.pointer_present = false;
        self.target = Vec2::ZERO;
    }

    /// Record a pointer sample in normalized device coordinates.
    ///
    /// Only the latest sample before a tick matters. Non-finite samples are
    /// dropped without touching the dwell timer.
    pub fn on_pointer_move(&mut self, now: TimestampMs, pointer: Vec2) {
        if !pointer.is_finite() {
            tracing::warn!(
                x = pointer.x,
                y = pointer.y,
                "Dropping non-finite pointer sample"
            );
            return;
        }
        self.last_move_at = Some(now);
        self.last_pointer = pointer;
    }

    /// Advance one frame and return the emitted offset.
    pub fn tick(&mut self, now: TimestampMs, pointer: Vec2) -> Vec2 {
        if !self.pointer_present {
            self.target = Vec2::ZERO;
        } else if self.has_rested(now) {
            let range = self.config.eye_range;
            self.target = (pointer.finite_or_zero() * range).clamp_abs(range);
        }

        self.current = self.current + (self.target - self.current) * self.config.follow_speed;
        self.current
    }

    /// Snap both offsets to zero. The only discontinuity the filter allows.
    pub fn reset(&mut self) {
        self.current = Vec2::ZERO;
        self.target = Vec2::ZERO;
    }

    fn has_rested(&self, now: TimestampMs) -> bool {
        match self.last_move_at {
            Some(at) => now - at > self.config.delay_before_response_ms,
            None => true,
        }
    }

    pub fn current_offset(&self) -> Vec2 {
        self.current
    }

    pub fn target_offset(&self) -> Vec2 {
        self.target
    }

    pub fn is_pointer_present(&self) -> bool {
        self.pointer_present
    }

    pub fn last_move_at(&self) -> Option<TimestampMs> {
        self.last_move_at
    }

    /// Latest accepted pointer sample, in normalized device coordinates.
    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    pub fn config(&self) -> &GazeConfig {
        &self.config
    }
}
