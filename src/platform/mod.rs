//! Platform abstraction layer
//!
//! This module provides the hardware-facing interfaces the tasks drive:
//! motors, input devices and telemetry output. All hardware access goes
//! through these traits and is injected into each task at construction.

pub mod error;
pub mod mock;
pub mod traits;

// Re-export commonly used types
pub use error::MotorError;
pub use traits::{Axis, InputDevice, Motor, TelemetrySink};
