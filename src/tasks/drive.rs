//! Two-Wheel Drive Task
//!
//! Tank-style teleoperation: each gamepad stick Y axis drives one side.
//!
//! ## Behavior
//!
//! - Read left/right stick Y every timeslice
//! - Invert sign (stick forward reads negative, motor forward is positive)
//! - Scale by the speed multiplier, clamp to [-1.0, +1.0]
//! - Write both motors, then report slow flag and powers to telemetry
//! - Never finishes on its own; runs until removed
//!
//! ## Safety
//!
//! - Non-finite axis readings are treated as centered sticks
//! - `stop()` sets both motors to neutral

use crate::core::scheduler::{RobotTask, TaskContext, TaskError};
use crate::parameters::DriveParams;
use crate::platform::traits::{Axis, InputDevice, Motor, TelemetrySink};

/// Default multiplier selected by `set_slow_mode(true)`
pub const SLOW_MULTIPLIER: f32 = 0.5;

/// Multiplier selected by `set_slow_mode(false)`
pub const FULL_MULTIPLIER: f32 = 1.0;

/// Last powers commanded to the motors
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveOutput {
    pub left: f32,
    pub right: f32,
}

/// Gamepad-driven two-motor drive
pub struct TwoWheelDriveTask<I: InputDevice, M: Motor, S: TelemetrySink> {
    input: I,
    left_motor: M,
    right_motor: M,
    telemetry: S,
    multiplier: f32,
    slow_multiplier: f32,
    slow: bool,
    output: DriveOutput,
}

impl<I: InputDevice, M: Motor, S: TelemetrySink> TwoWheelDriveTask<I, M, S> {
    /// Create a drive task at full speed
    pub fn new(input: I, left_motor: M, right_motor: M, telemetry: S) -> Self {
        Self {
            input,
            left_motor,
            right_motor,
            telemetry,
            multiplier: FULL_MULTIPLIER,
            slow_multiplier: SLOW_MULTIPLIER,
            slow: false,
            output: DriveOutput::default(),
        }
    }

    /// Create a drive task configured from loaded parameters
    ///
    /// `DRV_SLOW_MULT` becomes the multiplier for every later switch into
    /// slow mode, not only the starting one.
    pub fn from_params(
        input: I,
        left_motor: M,
        right_motor: M,
        telemetry: S,
        params: &DriveParams,
    ) -> Self {
        let mut task = Self::new(input, left_motor, right_motor, telemetry);
        if params.slow_multiplier.is_finite() {
            task.slow_multiplier = params.slow_multiplier;
        }
        task.set_slow_mode(params.slow);
        task
    }

    /// Switch between the slow multiplier and full (1.0) speed
    ///
    /// Takes effect on the next timeslice.
    pub fn set_slow_mode(&mut self, slow: bool) {
        self.slow = slow;
        self.multiplier = if slow {
            self.slow_multiplier
        } else {
            FULL_MULTIPLIER
        };
    }

    /// Set an arbitrary speed multiplier
    ///
    /// Multipliers below 1.0 count as slow mode. Non-finite values are
    /// ignored.
    pub fn set_multiplier(&mut self, multiplier: f32) {
        if !multiplier.is_finite() {
            crate::log_warn!("Ignoring non-finite drive multiplier");
            return;
        }
        self.multiplier = multiplier;
        self.slow = multiplier < FULL_MULTIPLIER;
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Multiplier applied whenever slow mode is switched on
    pub fn slow_multiplier(&self) -> f32 {
        self.slow_multiplier
    }

    pub fn is_slow(&self) -> bool {
        self.slow
    }

    /// Powers written by the last timeslice
    pub fn output(&self) -> DriveOutput {
        self.output
    }

    fn scale(&self, axis: f32) -> f32 {
        if !axis.is_finite() {
            return 0.0;
        }
        (-axis * self.multiplier).clamp(-1.0, 1.0)
    }
}

impl<I: InputDevice, M: Motor, S: TelemetrySink> RobotTask for TwoWheelDriveTask<I, M, S> {
    fn name(&self) -> &'static str {
        "TwoWheelDrive"
    }

    fn stop(&mut self, _ctx: &mut TaskContext<'_>) {
        if let Err(e) = self.left_motor.set_power(0.0) {
            crate::log_error!("Failed to stop left motor: {}", e);
        }
        if let Err(e) = self.right_motor.set_power(0.0) {
            crate::log_error!("Failed to stop right motor: {}", e);
        }
        self.output = DriveOutput::default();
    }

    fn timeslice(&mut self, _ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
        let left = self.scale(self.input.read_axis(Axis::LeftStickY));
        let right = self.scale(self.input.read_axis(Axis::RightStickY));

        self.left_motor.set_power(left)?;
        self.right_motor.set_power(right)?;
        self.output = DriveOutput { left, right };

        self.telemetry
            .add_line("Slow: ", if self.slow { "true" } else { "false" });
        self.telemetry.add_line("L: ", &format!("{:.2}", left));
        self.telemetry.add_line("R: ", &format!("{:.2}", right));

        Ok(false)
    }
}
