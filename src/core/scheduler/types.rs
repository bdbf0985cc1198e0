//! Core types for the task scheduler

use std::fmt;

/// Identity of a registered task
///
/// Assigned by the task queue at registration and never reused within one
/// queue, so a stale id can never address a newer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) u32);

impl TaskId {
    /// Raw numeric id
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}
