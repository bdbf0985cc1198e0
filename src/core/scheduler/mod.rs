//! Cooperative task scheduler
//!
//! Tasks implement [`RobotTask`] and are registered with a [`TaskQueue`].
//! Each scheduling round calls every registered task's `timeslice()` once,
//! in registration order. Tasks communicate with the rest of the system by
//! posting [`RobotEvent`]s to the queue's shared FIFO.

pub mod error;
pub mod event;
pub mod queue;
pub mod stats;
pub mod task;
pub mod types;

pub use error::{SchedulerError, TaskError};
pub use event::{EventKind, EventPayload, RobotEvent};
pub use queue::TaskQueue;
pub use stats::{SchedulerStats, TaskStats};
pub use task::{Phase, RobotTask, TaskContext};
pub use types::TaskId;
