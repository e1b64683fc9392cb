use std::path::PathBuf;

use gazerig_animation_core::animator::AnimationSettings;
use gazerig_pointer_source::{PointerBackend, ScriptedBackend};
use gazerig_render_host::{FrameLoop, LoadedCharacter, PointerSurface, Scene};
use gazerig_rig_model::rig::RigManifest;
use gazerig_rig_model::transform::TransformHost;

fn fixture(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures");
    for part in parts {
        path.push(part);
    }
    path
}

#[test]
fn scripted_pointer_drives_fixture_rig() {
    let manifest = RigManifest::load(&fixture(&["rigs", "character.json"])).unwrap();
    let mut scene = Scene::from_manifest(&manifest).unwrap();
    let mut frame_loop = FrameLoop::new();
    let settings = AnimationSettings {
        seed: Some(1),
        ..Default::default()
    };
    let mut character = LoadedCharacter::load(&scene, &mut frame_loop, &settings, 0.0).unwrap();

    let mut backend =
        ScriptedBackend::from_file(&fixture(&["pointer", "corner_dwell.jsonl"])).unwrap();
    let surface = PointerSurface::from_header(backend.header().unwrap()).unwrap();
    let left = scene.find_node("LeftEye").unwrap();

    let mut gaze_at = Vec::new();
    for i in 0..94u32 {
        let now = i as f64 * 16.0;
        for event in backend.poll(now).unwrap() {
            character.pointer(surface.to_input(&event), event.t);
        }
        frame_loop.render_frame(&mut scene, now);
        gaze_at.push((now, character.last_output().gaze));
    }
    assert!(backend.is_exhausted());

    // Held inside the response delay after the first move.
    assert_eq!(gaze_at[0].1.x, 0.0);
    // Tracking the top-right corner.
    let (_, at_480) = gaze_at[30];
    assert!(at_480.x > 0.25 && at_480.y > 0.25, "{at_480:?}");
    // Crossed over to the bottom-left corner before the pointer left.
    let (_, at_992) = gaze_at[62];
    assert!(at_992.x < -0.2 && at_992.y < -0.2, "{at_992:?}");
    // Decaying back to rest after leave.
    let (_, last) = gaze_at[93];
    assert!(last.length() < 0.05, "{last:?}");

    // No blink yet, so depth scale sits at the rest Y scale.
    let eye = scene.transform(left).unwrap();
    assert!((eye.scale.z - 1.2).abs() < 1e-12);
    assert!((eye.position.x - (-0.04 + last.x)).abs() < 1e-12);

    character.dispose(&mut frame_loop);
    assert_eq!(frame_loop.observer_count(), 0);
}
