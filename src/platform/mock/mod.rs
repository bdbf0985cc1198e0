//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for testing without actual hardware. Mocks are always compiled so
//! integration tests and downstream crates can use them.
//!
//! # Example
//!
//! ```
//! use robot_tasks::platform::mock::{MockGamepad, MockMotor};
//! use robot_tasks::platform::traits::{Axis, InputDevice, Motor};
//!
//! let pad = MockGamepad::new();
//! pad.set_axis(Axis::LeftStickY, -1.0);
//! assert_eq!(pad.read_axis(Axis::LeftStickY), -1.0);
//!
//! let mut motor = MockMotor::new();
//! motor.set_power(0.5).unwrap();
//! assert_eq!(motor.power(), 0.5);
//! ```

mod gamepad;
mod motor;

pub use gamepad::MockGamepad;
pub use motor::MockMotor;
