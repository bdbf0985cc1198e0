//! Platform abstraction traits
//!
//! This module defines the traits that hardware implementations must provide.

pub mod input;
pub mod motor;
pub mod telemetry;

// Re-export trait interfaces
pub use input::{Axis, InputDevice};
pub use motor::{validate_power, Motor};
pub use telemetry::TelemetrySink;
