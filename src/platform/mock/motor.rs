//! Mock motor implementation for testing

use std::sync::{Arc, Mutex, MutexGuard};

use crate::platform::{
    error::MotorError,
    traits::{validate_power, Motor},
};

#[derive(Debug, Default)]
struct MotorState {
    power: f32,
    history: Vec<f32>,
    fault: bool,
}

/// Mock motor implementation
///
/// Records every accepted power write. Clones share state, so a test can
/// keep a handle while the task under test owns another.
#[derive(Debug, Clone, Default)]
pub struct MockMotor {
    state: Arc<Mutex<MotorState>>,
}

impl MockMotor {
    /// Create a new mock motor at zero power
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MotorState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// All accepted power writes, oldest first
    pub fn history(&self) -> Vec<f32> {
        self.state().history.clone()
    }

    /// Make subsequent writes fail with `MotorError::HardwareFault`
    pub fn set_fault(&self, fault: bool) {
        self.state().fault = fault;
    }
}

impl Motor for MockMotor {
    fn set_power(&mut self, power: f32) -> Result<(), MotorError> {
        let mut state = self.state();
        if state.fault {
            return Err(MotorError::HardwareFault);
        }
        let power = validate_power(power)?;
        state.power = power;
        state.history.push(power);
        Ok(())
    }

    fn power(&self) -> f32 {
        self.state().power
    }
}
