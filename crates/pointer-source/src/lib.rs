//! Gazerig Pointer Source
//!
//! Supplies timestamped pointer enter/leave/move events to a frame loop.
//! Uses a pluggable backend architecture:
//!
//! - **Scripted:** Replays a recorded or hand-written JSONL script
//! - **Sweep:** Generates a deterministic synthetic path over the surface
//!
//! Scripts are written in append-only JSONL format (see [`writer`]).

pub mod backends;
pub mod writer;

use gazerig_common::clock::TimestampMs;
use gazerig_common::error::GazerigResult;
use gazerig_rig_model::event::PointerEvent;

pub use backends::{ScriptedBackend, SweepBackend, SweepConfig};
pub use writer::PointerScriptWriter;

/// Trait for pointer event backends.
pub trait PointerBackend {
    /// Return every not-yet-delivered event with `t <= until`, in time order.
    fn poll(&mut self, until: TimestampMs) -> GazerigResult<Vec<PointerEvent>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether every event has been delivered.
    fn is_exhausted(&self) -> bool;
}
