//! Render loop with after-render observers.

use gazerig_common::clock::TimestampMs;
use serde::{Deserialize, Serialize};

use crate::scene::Scene;

/// Identifies one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// What an observer learns about the frame that just rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Zero-based frame index.
    pub index: u64,
    pub now_ms: TimestampMs,
}

pub type AfterRender = Box<dyn FnMut(&FrameInfo, &mut Scene)>;

/// Drives frames and fans out to observers in registration order.
#[derive(Default)]
pub struct FrameLoop {
    observers: Vec<(ObserverId, AfterRender)>,
    next_id: u64,
    frames_rendered: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_after_render(&mut self, observer: AfterRender) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Deregister an observer. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Render one frame at `now`: world pass, then observers.
    pub fn render_frame(&mut self, scene: &mut Scene, now: TimestampMs) -> FrameInfo {
        let info = FrameInfo {
            index: self.frames_rendered,
            now_ms: now,
        };
        self.frames_rendered += 1;

        let evaluated = scene.evaluate_world_transforms();
        tracing::trace!(frame = info.index, evaluated, "Render pass");

        for (_, observer) in &mut self.observers {
            observer(&info, scene);
        }
        info
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("observers", &self.observers.len())
            .field("frames_rendered", &self.frames_rendered)
            .finish()
    }
}
