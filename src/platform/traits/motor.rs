//! Motor output abstraction
//!
//! Power values are normalized to [-1.0, +1.0]:
//! - `+1.0` = full forward
//! - `0.0` = stopped
//! - `-1.0` = full reverse

use crate::platform::error::MotorError;

/// Motor control trait (platform-independent)
pub trait Motor {
    /// Set motor power and direction
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidPower` if power is outside [-1.0, +1.0]
    /// or not finite. Returns `MotorError::HardwareFault` if the output fails.
    fn set_power(&mut self, power: f32) -> Result<(), MotorError>;

    /// Last power value accepted by the motor
    fn power(&self) -> f32;
}

/// Check that a power value is accepted by [`Motor::set_power`]
#[inline]
pub fn validate_power(power: f32) -> Result<f32, MotorError> {
    if power.is_finite() && (-1.0..=1.0).contains(&power) {
        Ok(power)
    } else {
        Err(MotorError::InvalidPower)
    }
}

impl<M: Motor + ?Sized> Motor for Box<M> {
    fn set_power(&mut self, power: f32) -> Result<(), MotorError> {
        (**self).set_power(power)
    }

    fn power(&self) -> f32 {
        (**self).power()
    }
}
