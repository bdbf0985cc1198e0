//! robot_tasks - Cooperative task scheduling for competition robots
//!
//! This library provides a non-preemptive task queue with a shared event
//! FIFO, platform abstractions for motors, gamepads, telemetry and vision,
//! and two concrete tasks built on them: ring detection and two-wheel drive.
//!
//! # Example
//!
//! ```
//! use robot_tasks::core::scheduler::TaskQueue;
//! use robot_tasks::core::traits::MockTime;
//! use robot_tasks::devices::vision::{Detection, MockVision};
//! use robot_tasks::tasks::{DetectionKind, RingDetectionTask};
//!
//! let time = MockTime::new();
//! let vision = MockVision::new();
//! let mut detector = RingDetectionTask::new(vision.clone(), time.clone());
//! detector.set_detection_kind(DetectionKind::QuadRing);
//!
//! let mut queue = TaskQueue::new(time);
//! queue.add_task(detector);
//!
//! vision.push_batch(vec![Detection::new("Quad", 40.0, 20.0, 0.9)]);
//! queue.run_round();
//!
//! let events = queue.drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].to_string(), "OBJECTS_DETECTED");
//! ```

// Platform abstraction layer (motors, input, telemetry) with host mocks
pub mod platform;

// External devices (object detection engine)
pub mod devices;

// Core systems: scheduler, time, logging, telemetry buffer
pub mod core;

// Task configuration parameters
pub mod parameters;

// Concrete tasks
pub mod tasks;

#[doc(hidden)]
pub use log as __log;
