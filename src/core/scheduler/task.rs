//! Task trait and the context handle passed to its lifecycle hooks
//!
//! # Lifecycle
//!
//! 1. `start()` - Called once when the task is registered
//! 2. `timeslice()` - Called once per scheduling round while registered
//! 3. `stop()` - Called exactly once when the task is removed, whether the
//!    removal was requested by the caller, by another task, by the task
//!    itself, or forced by a failure
//!
//! A task never sees the task queue directly. Each hook receives a
//! [`TaskContext`] scoped to the operations a task needs: posting events
//! and staging registrations/removals that the queue applies at the end of
//! the current round.

use std::collections::VecDeque;

use super::error::{SchedulerError, TaskError};
use super::event::{EventPayload, RobotEvent};
use super::types::TaskId;

/// Cooperatively scheduled unit of work
///
/// # Example
///
/// ```
/// use robot_tasks::core::scheduler::{RobotTask, TaskContext, TaskError};
///
/// struct Countdown(u32);
///
/// impl RobotTask for Countdown {
///     fn name(&self) -> &'static str {
///         "countdown"
///     }
///
///     fn timeslice(&mut self, _ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
///         self.0 = self.0.saturating_sub(1);
///         Ok(self.0 == 0)
///     }
/// }
/// ```
pub trait RobotTask {
    /// Task name for logging and telemetry
    fn name(&self) -> &'static str;

    /// Called once on registration; must not block
    ///
    /// Returning `Err` leaves the task registered but inert.
    fn start(&mut self, _ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        Ok(())
    }

    /// Called exactly once on removal; releases owned capabilities
    fn stop(&mut self, _ctx: &mut TaskContext<'_>) {}

    /// Perform at most one bounded unit of work
    ///
    /// Must never block. Returns `Ok(true)` when the task wants to be removed
    /// after this call. An `Err` is treated as a task failure: the task is
    /// stopped and removed, other tasks keep running.
    fn timeslice(&mut self, ctx: &mut TaskContext<'_>) -> Result<bool, TaskError>;
}

/// Lifecycle hook currently executing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Timeslice,
    Stop,
}

/// Changes requested during a round, applied by the queue at a safe point
#[derive(Default)]
pub(crate) struct Staging {
    pub(crate) next_id: u32,
    pub(crate) added: Vec<(TaskId, Box<dyn RobotTask>)>,
    pub(crate) removed: Vec<TaskId>,
}

impl Staging {
    pub(crate) fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Whether `id` was ever handed out by this queue
    pub(crate) fn issued(&self, id: TaskId) -> bool {
        id.0 < self.next_id
    }

    pub(crate) fn stage_removal(&mut self, id: TaskId) {
        if !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Handle passed to a task's lifecycle hooks
pub struct TaskContext<'a> {
    task_id: TaskId,
    round: u64,
    phase: Phase,
    events: &'a mut VecDeque<RobotEvent>,
    staging: &'a mut Staging,
    events_queued: u64,
}

impl<'a> TaskContext<'a> {
    pub(crate) fn new(
        task_id: TaskId,
        round: u64,
        phase: Phase,
        events: &'a mut VecDeque<RobotEvent>,
        staging: &'a mut Staging,
    ) -> Self {
        Self {
            task_id,
            round,
            phase,
            events,
            staging,
            events_queued: 0,
        }
    }

    /// Id of the task this context belongs to
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Current scheduling round (0 before the first round)
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Hook currently executing
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Append an event to the shared FIFO, tagged with this task and round
    pub fn queue_event(&mut self, payload: EventPayload) {
        crate::log_debug!("{} queued {}", self.task_id, payload.kind());
        self.events
            .push_back(RobotEvent::new(self.task_id, self.round, payload));
        self.events_queued += 1;
    }

    /// Ask to be removed at the end of the current round
    ///
    /// No-op while the task is already being stopped.
    pub fn request_removal(&mut self) {
        if self.phase != Phase::Stop {
            self.staging.stage_removal(self.task_id);
        }
    }

    /// Stage removal of another task at the end of the current round
    ///
    /// # Errors
    ///
    /// `SchedulerError::UnknownTask` if `id` was never issued by this queue.
    /// An id that was issued but has already been removed is accepted and
    /// ignored when the staged change is applied.
    pub fn remove_task(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        if !self.staging.issued(id) {
            crate::log_error!("{} asked to remove unknown {}", self.task_id, id);
            return Err(SchedulerError::UnknownTask(id));
        }
        if id == self.task_id {
            self.request_removal();
        } else {
            self.staging.stage_removal(id);
        }
        Ok(())
    }

    /// Stage registration of a new task
    ///
    /// The task is started at the end of the current round and runs from
    /// the next round on.
    pub fn add_task<R: RobotTask + 'static>(&mut self, task: R) -> TaskId {
        let id = self.staging.allocate_id();
        self.staging.added.push((id, Box::new(task)));
        id
    }

    pub(crate) fn events_queued(&self) -> u64 {
        self.events_queued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::vision::Detection;

    struct Idle;

    impl RobotTask for Idle {
        fn name(&self) -> &'static str {
            "idle"
        }

        fn timeslice(&mut self, _ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
            Ok(false)
        }
    }

    #[test]
    fn test_context_queue_event_tags_source_and_round() {
        let mut events = VecDeque::new();
        let mut staging = Staging::default();
        let mut ctx = TaskContext::new(TaskId(2), 5, Phase::Timeslice, &mut events, &mut staging);

        ctx.queue_event(EventPayload::ObjectsDetected(vec![Detection::new(
            "Quad", 1.0, 1.0, 0.9,
        )]));
        assert_eq!(ctx.events_queued(), 1);

        let event = events.pop_front().unwrap();
        assert_eq!(event.source(), TaskId(2));
        assert_eq!(event.round(), 5);
    }

    #[test]
    fn test_context_request_removal_deduplicates() {
        let mut events = VecDeque::new();
        let mut staging = Staging {
            next_id: 2,
            ..Staging::default()
        };
        let mut ctx = TaskContext::new(TaskId(1), 1, Phase::Timeslice, &mut events, &mut staging);

        ctx.request_removal();
        ctx.request_removal();
        ctx.remove_task(TaskId(1)).unwrap();

        assert_eq!(staging.removed, vec![TaskId(1)]);
    }

    #[test]
    fn test_context_request_removal_ignored_during_stop() {
        let mut events = VecDeque::new();
        let mut staging = Staging::default();
        let mut ctx = TaskContext::new(TaskId(1), 1, Phase::Stop, &mut events, &mut staging);

        ctx.request_removal();
        assert!(staging.is_empty());
    }

    #[test]
    fn test_context_remove_never_issued_id_fails() {
        let mut events = VecDeque::new();
        let mut staging = Staging {
            next_id: 3,
            ..Staging::default()
        };
        let mut ctx = TaskContext::new(TaskId(0), 1, Phase::Timeslice, &mut events, &mut staging);

        assert_eq!(
            ctx.remove_task(TaskId(3)),
            Err(SchedulerError::UnknownTask(TaskId(3)))
        );
        assert_eq!(ctx.remove_task(TaskId(2)), Ok(()));
        assert_eq!(staging.removed, vec![TaskId(2)]);
    }

    #[test]
    fn test_context_add_task_allocates_fresh_ids() {
        let mut events = VecDeque::new();
        let mut staging = Staging {
            next_id: 10,
            ..Staging::default()
        };
        let mut ctx = TaskContext::new(TaskId(1), 1, Phase::Timeslice, &mut events, &mut staging);

        let a = ctx.add_task(Idle);
        let b = ctx.add_task(Idle);

        assert_eq!(a, TaskId(10));
        assert_eq!(b, TaskId(11));
        assert_eq!(staging.added.len(), 2);
        assert_eq!(staging.next_id, 12);
    }
}
