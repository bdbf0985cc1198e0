//! Mock gamepad implementation for testing

use std::sync::{Arc, Mutex};

use crate::platform::traits::{Axis, InputDevice};

/// Mock gamepad
///
/// Axis values are set by the test and read back by the task under test.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGamepad {
    axes: Arc<Mutex<[f32; Axis::COUNT]>>,
}

impl MockGamepad {
    /// Create a gamepad with all sticks centered
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an axis value (not clamped, so tests can feed out-of-range input)
    pub fn set_axis(&self, axis: Axis, value: f32) {
        match self.axes.lock() {
            Ok(mut axes) => axes[axis.index()] = value,
            Err(poisoned) => poisoned.into_inner()[axis.index()] = value,
        }
    }

    /// Set both stick Y axes at once
    pub fn set_sticks_y(&self, left: f32, right: f32) {
        self.set_axis(Axis::LeftStickY, left);
        self.set_axis(Axis::RightStickY, right);
    }
}

impl InputDevice for MockGamepad {
    fn read_axis(&self, axis: Axis) -> f32 {
        match self.axes.lock() {
            Ok(axes) => axes[axis.index()],
            Err(poisoned) => poisoned.into_inner()[axis.index()],
        }
    }
}
