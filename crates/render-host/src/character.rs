//! Loading a character into a scene and wiring its eye animation.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use gazerig_animation_core::animator::{AnimationSettings, EyeAnimator, FrameOutput};
use gazerig_common::clock::TimestampMs;
use gazerig_common::error::GazerigResult;

use crate::frame_loop::{FrameInfo, FrameLoop, ObserverId};
use crate::pointer::PointerInput;
use crate::scene::Scene;

/// Handle to a character whose eyes animate every rendered frame.
///
/// The animator is shared with the after-render observer. Dropping the
/// handle without [`LoadedCharacter::dispose`] leaves the observer running.
#[derive(Debug)]
pub struct LoadedCharacter {
    animator: Rc<RefCell<EyeAnimator>>,
    observer: Option<ObserverId>,
}

impl LoadedCharacter {
    /// Bind the eye nodes in `scene` and register the per-frame update.
    ///
    /// A missing eye node fails here, before any frame runs.
    pub fn load(
        scene: &Scene,
        frame_loop: &mut FrameLoop,
        settings: &AnimationSettings,
        now: TimestampMs,
    ) -> GazerigResult<Self> {
        let animator = Rc::new(RefCell::new(EyeAnimator::new(settings, scene, now)?));

        let shared = Rc::clone(&animator);
        let update = move |info: &FrameInfo, scene: &mut Scene| {
            shared.borrow_mut().frame(scene, info.now_ms);
        };
        let observer = frame_loop.add_after_render(Box::new(update));

        tracing::info!(
            left = %settings.rig.left_eye_node,
            right = %settings.rig.right_eye_node,
            "Character loaded"
        );
        Ok(Self {
            animator,
            observer: Some(observer),
        })
    }

    /// Route one pointer input to the gaze filter.
    pub fn pointer(&self, input: PointerInput, now: TimestampMs) {
        let mut animator = self.animator.borrow_mut();
        match input {
            PointerInput::Enter => animator.pointer_enter(),
            PointerInput::Leave => animator.pointer_leave(),
            PointerInput::Move(ndc) => animator.pointer_move(now, ndc),
        }
    }

    /// Deregister the per-frame update. Idempotent.
    pub fn dispose(&mut self, frame_loop: &mut FrameLoop) {
        if let Some(id) = self.observer.take() {
            frame_loop.remove(id);
            tracing::info!("Character disposed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    pub fn animator(&self) -> Ref<'_, EyeAnimator> {
        self.animator.borrow()
    }

    pub fn last_output(&self) -> FrameOutput {
        self.animator.borrow().last_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazerig_common::error::GazerigError;
    use gazerig_rig_model::math::Vec2;
    use gazerig_rig_model::rig::RigManifest;
    use gazerig_rig_model::transform::TransformHost;

    fn settings() -> AnimationSettings {
        AnimationSettings {
            seed: Some(11),
            ..Default::default()
        }
    }

    fn scene() -> Scene {
        Scene::from_manifest(&RigManifest::default_character()).unwrap()
    }

    #[test]
    fn test_frames_drive_eye_nodes() {
        let mut scene = scene();
        let mut frame_loop = FrameLoop::new();
        let character = LoadedCharacter::load(&scene, &mut frame_loop, &settings(), 0.0).unwrap();
        let left = scene.find_node("LeftEye").unwrap();
        let rest_x = scene.transform(left).unwrap().position.x;

        character.pointer(PointerInput::Enter, 0.0);
        character.pointer(PointerInput::Move(Vec2::new(1.0, 0.0)), 0.0);
        frame_loop.render_frame(&mut scene, 200.0);

        let out = character.last_output();
        assert!((out.gaze.x - 0.03).abs() < 1e-12);
        assert!((scene.transform(left).unwrap().position.x - (rest_x + 0.03)).abs() < 1e-12);
        assert!(scene.is_dirty(left));
        assert_eq!(scene.invalidation_count(), 2);
        assert_eq!(character.animator().frames(), 1);
    }

    #[test]
    fn test_missing_eye_fails_before_registration() {
        let scene = scene();
        let mut frame_loop = FrameLoop::new();
        let mut settings = settings();
        settings.rig.left_eye_node = "Eye.L".to_string();

        let err = LoadedCharacter::load(&scene, &mut frame_loop, &settings, 0.0).unwrap_err();
        assert!(matches!(err, GazerigError::MissingNode { .. }));
        assert_eq!(frame_loop.observer_count(), 0);
    }

    #[test]
    fn test_dispose_stops_ticking() {
        let mut scene = scene();
        let mut frame_loop = FrameLoop::new();
        let mut character =
            LoadedCharacter::load(&scene, &mut frame_loop, &settings(), 0.0).unwrap();

        frame_loop.render_frame(&mut scene, 16.0);
        character.dispose(&mut frame_loop);
        character.dispose(&mut frame_loop);
        frame_loop.render_frame(&mut scene, 32.0);
        frame_loop.render_frame(&mut scene, 48.0);

        assert!(!character.is_active());
        assert_eq!(frame_loop.observer_count(), 0);
        assert_eq!(character.animator().frames(), 1);
        assert_eq!(scene.invalidation_count(), 2);
    }
}
