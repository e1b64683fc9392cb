//! Gazerig Animation Core
//!
//! Per-frame procedural eye animation for a loaded character:
//! - **Gaze:** Exponential smoothing of the eye offset toward a pointer-driven target
//! - **Blink:** A jittered, self-rescheduling blink state machine
//! - **Compositor:** Writes both outputs into the two bound eye nodes
//! - **Animator:** Runs the three in fixed order once per frame
//!
//! This crate is pure computation: every step takes the current time as an
//! argument, and scene nodes are reached only through `TransformHost`.

pub mod animator;
pub mod blink;
pub mod compositor;
pub mod gaze;

pub use animator::{AnimationSettings, EyeAnimator, FrameOutput};
pub use blink::{BlinkCycle, BlinkPhase};
pub use compositor::Compositor;
pub use gaze::GazeFilter;
