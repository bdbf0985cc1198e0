//! Device interfaces
//!
//! This module contains interfaces to sensing devices whose processing runs
//! outside the scheduler thread.
//!
//! ## Modules
//!
//! - `vision`: Object detection engine (recognitions with bounding boxes)

pub mod vision;

pub use vision::{Detection, VisionEngine, VisionError};
