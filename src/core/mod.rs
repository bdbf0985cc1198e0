//! Core runtime
//!
//! The task scheduler and the infrastructure shared by every task: time
//! sources, logging macros and the telemetry line buffer.

pub mod logging;
pub mod scheduler;
pub mod telemetry;
pub mod traits;
