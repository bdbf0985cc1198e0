//! Concrete robot tasks
//!
//! - [`RingDetectionTask`] - polls the vision engine, posts ring detections
//! - [`TwoWheelDriveTask`] - gamepad tank drive

pub mod drive;
pub mod ring_detection;

pub use drive::{DriveOutput, TwoWheelDriveTask};
pub use ring_detection::{DetectionKind, DetectionState, RingDetectionTask, RingKind, RingLabels};
