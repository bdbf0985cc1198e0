//! Platform error types
//!
//! This module defines error types for actuator operations.

/// Motor control error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MotorError {
    /// Power value outside [-1.0, +1.0] range or not finite
    #[error("motor power outside [-1.0, 1.0]")]
    InvalidPower,
    /// Hardware output unavailable or failed
    #[error("motor hardware fault")]
    HardwareFault,
}
