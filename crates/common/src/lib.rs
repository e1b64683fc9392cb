//! Gazerig Common Utilities
//!
//! Shared infrastructure for all Gazerig crates:
//! - Error types and result aliases
//! - Monotonic and manual clocks for frame timing
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
