//! Scheduler and task error types

use super::types::TaskId;
use crate::devices::vision::VisionError;
use crate::platform::error::MotorError;

/// Errors reported by a task's lifecycle hooks
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    /// A required capability is missing; the task stays inert
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("vision error: {0}")]
    Vision(#[from] VisionError),

    #[error("motor error: {0}")]
    Motor(#[from] MotorError),

    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Unexpected fault inside a timeslice
    #[error("task failed: {0}")]
    Failed(String),
}

/// Task queue misuse
///
/// These indicate a caller bug rather than a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("{0} is not registered")]
    UnknownTask(TaskId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_error_from_sources() {
        let err: TaskError = VisionError::Unavailable.into();
        assert_eq!(err, TaskError::Vision(VisionError::Unavailable));

        let err: TaskError = MotorError::HardwareFault.into();
        assert_eq!(err.to_string(), "motor error: motor hardware fault");
    }

    #[test]
    fn test_scheduler_error_display() {
        let err = SchedulerError::UnknownTask(TaskId(4));
        assert_eq!(err.to_string(), "Task(4) is not registered");
    }
}
