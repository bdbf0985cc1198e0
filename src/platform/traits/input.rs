//! Input device abstraction (gamepad sticks)
//!
//! Axis reads are non-blocking snapshots of the most recent device state,
//! normalized to [-1.0, +1.0]. Stick Y axes follow the gamepad convention:
//! pushing the stick forward reads negative.

/// Gamepad axis identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

impl Axis {
    /// Number of axes
    pub const COUNT: usize = 4;

    /// Dense index for array-backed storage
    pub const fn index(self) -> usize {
        match self {
            Axis::LeftStickX => 0,
            Axis::LeftStickY => 1,
            Axis::RightStickX => 2,
            Axis::RightStickY => 3,
        }
    }
}

/// Input device trait
pub trait InputDevice {
    /// Read the latest value of an axis, in [-1.0, +1.0]
    ///
    /// Must not block.
    fn read_axis(&self, axis: Axis) -> f32;
}

impl<I: InputDevice + ?Sized> InputDevice for Box<I> {
    fn read_axis(&self, axis: Axis) -> f32 {
        (**self).read_axis(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_indices_are_dense() {
        let axes = [
            Axis::LeftStickX,
            Axis::LeftStickY,
            Axis::RightStickX,
            Axis::RightStickY,
        ];
        for (i, axis) in axes.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
        assert_eq!(axes.len(), Axis::COUNT);
    }
}
