//! Gazerig Render Host
//!
//! A headless stand-in for a real-time renderer. It owns the scene
//! nodes, runs the per-frame render pass, and calls registered
//! after-render observers, which is where loaded characters animate.
//!
//! # Frame Flow
//!
//! ```text
//! pointer script ── PointerSurface ── LoadedCharacter::pointer
//!                                            │
//! FrameLoop::render_frame ── world pass ── after-render observers
//!                                            │
//!                                   EyeAnimator::frame ── Scene nodes
//!                                            │
//!                                      FrameRecorder
//! ```

pub mod character;
pub mod frame_loop;
pub mod pointer;
pub mod recorder;
pub mod scene;

pub use character::LoadedCharacter;
pub use frame_loop::{FrameInfo, FrameLoop, ObserverId};
pub use pointer::{PointerInput, PointerSurface};
pub use recorder::{FrameRecorder, FrameSample};
pub use scene::Scene;
