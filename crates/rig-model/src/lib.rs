//! Gazerig Rig Model
//!
//! Defines the core data contracts shared by the animation core and its host:
//! - **Math:** `Vec2` offsets and `Vec3` positions/scales
//! - **Transforms:** Node handles and the `TransformHost` seam the core writes through
//! - **Events:** Timestamped pointer enter/leave/move streams (JSONL)
//! - **Rig:** Manifests describing named nodes and their rest pose
//!
//! Pointer events are stored in surface pixels; conversion to normalized
//! device coordinates (`[-1.0, 1.0]` per axis, Y up) happens in the host.

pub mod event;
pub mod math;
pub mod rig;
pub mod transform;

pub use event::*;
pub use math::*;
pub use rig::*;
pub use transform::*;
