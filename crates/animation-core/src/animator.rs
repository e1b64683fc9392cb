//! Frame driver tying gaze, blink, and compositor together.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use gazerig_common::clock::TimestampMs;
use gazerig_common::config::{AppConfig, BlinkConfig, GazeConfig, RigBindingConfig};
use gazerig_common::error::GazerigResult;
use gazerig_rig_model::math::Vec2;
use gazerig_rig_model::transform::TransformHost;

use crate::blink::{BlinkCycle, BlinkPhase};
use crate::compositor::Compositor;
use crate::gaze::GazeFilter;

/// Everything needed to build an [`EyeAnimator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    pub gaze: GazeConfig,
    pub blink: BlinkConfig,
    pub rig: RigBindingConfig,
    /// Fixed jitter seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnimationSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            gaze: config.gaze,
            blink: config.blink,
            rig: config.rig.clone(),
            seed: config.simulation.seed,
        }
    }
}

/// What one frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub gaze: Vec2,
    pub closure: f64,
    pub phase: BlinkPhase,
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self {
            gaze: Vec2::ZERO,
            closure: 0.0,
            phase: BlinkPhase::Idle,
        }
    }
}

/// Procedural eye animation for one loaded character.
#[derive(Debug)]
pub struct EyeAnimator<R = StdRng> {
    gaze: GazeFilter,
    blink: BlinkCycle<R>,
    compositor: Compositor,
    last_output: FrameOutput,
    frames: u64,
}

impl EyeAnimator<StdRng> {
    /// Bind to `host` and start the blink schedule at `now`.
    ///
    /// All configuration and binding errors surface here, before any frame.
    pub fn new<H: TransformHost + ?Sized>(
        settings: &AnimationSettings,
        host: &H,
        now: TimestampMs,
    ) -> GazerigResult<Self> {
        let blink = match settings.seed {
            Some(seed) => BlinkCycle::seeded(settings.blink, now, seed)?,
            None => BlinkCycle::new(settings.blink, now)?,
        };
        Self::assemble(settings, host, blink)
    }
}

impl<R: Rng> EyeAnimator<R> {
    /// Like [`EyeAnimator::new`] but with an injected jitter source.
    pub fn with_rng<H: TransformHost + ?Sized>(
        settings: &AnimationSettings,
        host: &H,
        now: TimestampMs,
        rng: R,
    ) -> GazerigResult<Self> {
        let blink = BlinkCycle::with_rng(settings.blink, now, rng)?;
        Self::assemble(settings, host, blink)
    }

    fn assemble<H: TransformHost + ?Sized>(
        settings: &AnimationSettings,
        host: &H,
        blink: BlinkCycle<R>,
    ) -> GazerigResult<Self> {
        settings.rig.validate()?;
        let gaze = GazeFilter::new(settings.gaze)?;
        let compositor = Compositor::bind(
            host,
            &settings.rig.left_eye_node,
            &settings.rig.right_eye_node,
        )?;
        Ok(Self {
            gaze,
            blink,
            compositor,
            last_output: FrameOutput::default(),
            frames: 0,
        })
    }

    pub fn pointer_enter(&mut self) {
        self.gaze.on_pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.gaze.on_pointer_leave();
    }

    /// Record a pointer sample in normalized device coordinates.
    pub fn pointer_move(&mut self, now: TimestampMs, ndc: Vec2) {
        self.gaze.on_pointer_move(now, ndc);
    }

    /// Run one frame: gaze, then blink, then write both into the rig.
    pub fn frame<H: TransformHost + ?Sized>(
        &mut self,
        host: &mut H,
        now: TimestampMs,
    ) -> FrameOutput {
        let pointer = self.gaze.last_pointer();
        let gaze = self.gaze.tick(now, pointer);
        let closure = self.blink.tick(now);
        self.compositor.apply(host, gaze, closure);

        self.frames += 1;
        self.last_output = FrameOutput {
            gaze,
            closure,
            phase: self.blink.phase(),
        };
        tracing::trace!(
            frame = self.frames,
            gaze_x = gaze.x,
            gaze_y = gaze.y,
            closure,
            "Eye frame"
        );
        self.last_output
    }

    /// Output of the most recent frame.
    pub fn last_output(&self) -> FrameOutput {
        self.last_output
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn gaze(&self) -> &GazeFilter {
        &self.gaze
    }

    pub fn blink(&self) -> &BlinkCycle<R> {
        &self.blink
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazerig_common::error::GazerigError;
    use gazerig_rig_model::math::Vec3;
    use gazerig_rig_model::transform::{NodeId, Transform};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapHost {
        names: HashMap<String, NodeId>,
        transforms: Vec<Transform>,
        dirty: Vec<NodeId>,
    }

    impl MapHost {
        fn eyes() -> Self {
            let mut host = Self::default();
            for (name, x) in [("LeftEye", -0.03), ("RightEye", 0.03)] {
                host.names
                    .insert(name.to_string(), NodeId(host.transforms.len()));
                host.transforms.push(Transform::new(
                    Vec3::new(x, 1.6, 0.1),
                    Vec3::new(1.0, 1.0, 1.0),
                ));
            }
            host
        }
    }

    impl TransformHost for MapHost {
        fn find_node(&self, name: &str) -> Option<NodeId> {
            self.names.get(name).copied()
        }

        fn transform(&self, id: NodeId) -> Option<&Transform> {
            self.transforms.get(id.0)
        }

        fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
            self.transforms.get_mut(id.0)
        }

        fn mark_dirty(&mut self, id: NodeId) {
            self.dirty.push(id);
        }
    }

    fn settings() -> AnimationSettings {
        AnimationSettings {
            seed: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_writes_both_eyes() {
        let mut host = MapHost::eyes();
        let mut animator = EyeAnimator::new(&settings(), &host, 0.0).unwrap();
        animator.pointer_enter();
        animator.pointer_move(0.0, Vec2::new(1.0, 0.0));

        // Inside the dwell window the target stays at rest.
        let out = animator.frame(&mut host, 50.0);
        assert_eq!(out.gaze, Vec2::ZERO);

        let out = animator.frame(&mut host, 150.0);
        assert!((out.gaze.x - 0.03).abs() < 1e-12);
        assert!((host.transforms[0].position.x - 0.0).abs() < 1e-12);
        assert!((host.transforms[1].position.x - 0.06).abs() < 1e-12);
        assert_eq!(animator.frames(), 2);
        assert_eq!(host.dirty.len(), 4);
    }

    #[test]
    fn test_blink_reaches_rig() {
        let mut host = MapHost::eyes();
        let mut animator = EyeAnimator::new(&settings(), &host, 0.0).unwrap();
        animator.frame(&mut host, 2_000.0);
        let out = animator.frame(&mut host, 2_075.0);
        assert_eq!(out.phase, BlinkPhase::Closing);
        assert!((out.closure - 0.8).abs() < 1e-12);
        assert!((host.transforms[0].scale.z - 0.2).abs() < 1e-12);
        assert_eq!(animator.last_output(), out);
    }

    #[test]
    fn test_missing_eye_fails_before_any_frame() {
        let host = MapHost::eyes();
        let mut settings = settings();
        settings.rig.right_eye_node = "Eye_R".to_string();
        let err = EyeAnimator::new(&settings, &host, 0.0).unwrap_err();
        assert!(matches!(err, GazerigError::MissingNode { .. }));
    }

    #[test]
    fn test_bad_blink_config_fails_at_construction() {
        let host = MapHost::eyes();
        let mut settings = settings();
        settings.blink.blink_duration_ms = -10.0;
        assert!(EyeAnimator::new(&settings, &host, 0.0).is_err());
    }
}
