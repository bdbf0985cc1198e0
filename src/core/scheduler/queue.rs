//! Cooperative task queue
//!
//! Owns the registered tasks and the shared event FIFO. Each call to
//! [`TaskQueue::run_round`] gives every registered task one timeslice, in
//! registration order. Registrations and removals requested while a round
//! is running are staged and applied once the round has finished, so the
//! task list is never mutated while it is being iterated.
//!
//! ## Failure isolation
//!
//! A timeslice that returns `Err` or panics is logged, counted, and the task
//! is stopped and removed at the end of the round. Tasks later in the same
//! round still run.
//!
//! ## Threading
//!
//! Rounds run strictly sequentially on one thread and event draining happens
//! between rounds, so the event FIFO is a plain `VecDeque`. If events are
//! ever produced from another thread (e.g. an asynchronous vision callback),
//! the FIFO must become a mutex-guarded or lock-free queue.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

use super::error::SchedulerError;
use super::event::RobotEvent;
use super::stats::{SchedulerStats, TaskStats};
use super::task::{Phase, RobotTask, Staging, TaskContext};
use super::types::TaskId;
use crate::core::traits::TimeSource;
use crate::parameters::SchedulerParams;

struct TaskEntry {
    id: TaskId,
    task: Box<dyn RobotTask>,
    stats: TaskStats,
}

/// Cooperative scheduler with a shared event queue
///
/// # Example
///
/// ```
/// use robot_tasks::core::scheduler::{RobotTask, TaskContext, TaskError, TaskQueue};
/// use robot_tasks::core::traits::MockTime;
///
/// struct Once;
///
/// impl RobotTask for Once {
///     fn name(&self) -> &'static str {
///         "once"
///     }
///
///     fn timeslice(&mut self, _ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
///         Ok(true)
///     }
/// }
///
/// let mut queue = TaskQueue::new(MockTime::new());
/// let id = queue.add_task(Once);
/// assert!(queue.contains(id));
///
/// queue.run_round();
/// assert!(!queue.contains(id));
/// ```
pub struct TaskQueue<T: TimeSource> {
    tasks: Vec<TaskEntry>,
    events: VecDeque<RobotEvent>,
    staging: Staging,
    time: T,
    params: SchedulerParams,
    stats: SchedulerStats,
    round: u64,
}

impl<T: TimeSource> TaskQueue<T> {
    /// Create an empty queue with default scheduler parameters
    pub fn new(time: T) -> Self {
        Self::with_params(time, SchedulerParams::default())
    }

    /// Create an empty queue
    pub fn with_params(time: T, params: SchedulerParams) -> Self {
        Self {
            tasks: Vec::new(),
            events: VecDeque::new(),
            staging: Staging::default(),
            time,
            params,
            stats: SchedulerStats::default(),
            round: 0,
        }
    }

    /// Register a task and call its `start()`
    ///
    /// The task runs from the next round on.
    pub fn add_task<R: RobotTask + 'static>(&mut self, task: R) -> TaskId {
        self.add_boxed(Box::new(task))
    }

    /// Register an already boxed task and call its `start()`
    pub fn add_boxed(&mut self, task: Box<dyn RobotTask>) -> TaskId {
        let id = self.staging.allocate_id();
        self.admit(id, task);
        self.apply_staged();
        id
    }

    /// Stop and remove a registered task
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::UnknownTask` if `id` is not registered.
    pub fn remove_task(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        if !self.contains(id) {
            return Err(SchedulerError::UnknownTask(id));
        }
        self.staging.stage_removal(id);
        self.apply_staged();
        Ok(())
    }

    /// Run one scheduling round
    ///
    /// Calls `timeslice()` once on every registered task in registration
    /// order, then applies the registrations and removals staged during the
    /// round.
    ///
    /// # Returns
    ///
    /// Number of timeslices executed
    pub fn run_round(&mut self) -> usize {
        self.round += 1;
        let budget_us = self.params.slice_budget_us;
        let mut executed = 0;

        for entry in self.tasks.iter_mut() {
            // Removed earlier in this round by another task
            if self.staging.removed.contains(&entry.id) {
                continue;
            }

            let mut ctx = TaskContext::new(
                entry.id,
                self.round,
                Phase::Timeslice,
                &mut self.events,
                &mut self.staging,
            );
            let task = &mut entry.task;
            let started_us = self.time.now_us();
            let result = panic::catch_unwind(AssertUnwindSafe(|| task.timeslice(&mut ctx)));
            let elapsed_us = self.time.elapsed_since(started_us);
            self.stats.events_queued += ctx.events_queued();

            let execution_us = u32::try_from(elapsed_us).unwrap_or(u32::MAX);
            if entry.stats.update(execution_us, budget_us) {
                self.stats.total_budget_overruns =
                    self.stats.total_budget_overruns.saturating_add(1);
                crate::log_warn!(
                    "{} ({}) exceeded slice budget: {}us > {}us",
                    entry.task.name(),
                    entry.id,
                    execution_us,
                    budget_us
                );
            }
            self.stats.timeslices += 1;
            executed += 1;

            match result {
                Ok(Ok(false)) => {}
                Ok(Ok(true)) => {
                    crate::log_debug!("{} ({}) finished", entry.task.name(), entry.id);
                    self.staging.stage_removal(entry.id);
                }
                Ok(Err(e)) => {
                    crate::log_error!("{} ({}) failed: {}", entry.task.name(), entry.id, e);
                    self.stats.task_failures = self.stats.task_failures.saturating_add(1);
                    self.staging.stage_removal(entry.id);
                }
                Err(payload) => {
                    crate::log_error!(
                        "{} ({}) panicked: {}",
                        entry.task.name(),
                        entry.id,
                        panic_message(payload.as_ref())
                    );
                    self.stats.task_failures = self.stats.task_failures.saturating_add(1);
                    self.staging.stage_removal(entry.id);
                }
            }
        }

        self.stats.rounds += 1;
        self.apply_staged();
        executed
    }

    /// Append an event produced outside any task
    pub fn queue_event(&mut self, event: RobotEvent) {
        self.events.push_back(event);
        self.stats.events_queued += 1;
    }

    /// Take every queued event, oldest first, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<RobotEvent> {
        self.events.drain(..).collect()
    }

    /// Queued events, oldest first, without removing them
    pub fn events(&self) -> impl Iterator<Item = &RobotEvent> {
        self.events.iter()
    }

    /// Number of queued events
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Stop and remove every task, in registration order
    ///
    /// Tasks registered by a `stop()` hook are started and then stopped as
    /// well, so the queue is empty on return.
    pub fn stop_all(&mut self) {
        while !self.tasks.is_empty() {
            for entry in &self.tasks {
                self.staging.stage_removal(entry.id);
            }
            self.apply_staged();
        }
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|entry| entry.id == id)
    }

    /// Registered task ids in registration order
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|entry| entry.id).collect()
    }

    /// Name of a registered task
    pub fn task_name(&self, id: TaskId) -> Option<&'static str> {
        self.entry(id).map(|entry| entry.task.name())
    }

    /// Timeslice statistics of a registered task
    pub fn task_stats(&self, id: TaskId) -> Option<TaskStats> {
        self.entry(id).map(|entry| entry.stats)
    }

    /// Scheduler-wide statistics
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            task_count: self.tasks.len(),
            ..self.stats
        }
    }

    /// Completed scheduling rounds
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is registered
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Scheduler parameters in effect
    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    fn entry(&self, id: TaskId) -> Option<&TaskEntry> {
        self.tasks.iter().find(|entry| entry.id == id)
    }

    fn admit(&mut self, id: TaskId, mut task: Box<dyn RobotTask>) {
        let name = task.name();
        crate::log_info!("Starting {} ({})", name, id);

        let mut ctx = TaskContext::new(
            id,
            self.round,
            Phase::Start,
            &mut self.events,
            &mut self.staging,
        );
        let result = panic::catch_unwind(AssertUnwindSafe(|| task.start(&mut ctx)));
        self.stats.events_queued += ctx.events_queued();

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                crate::log_warn!("{} ({}) failed to start, staying inert: {}", name, id, e);
                self.stats.start_failures = self.stats.start_failures.saturating_add(1);
            }
            Err(payload) => {
                crate::log_error!(
                    "{} ({}) panicked in start: {}",
                    name,
                    id,
                    panic_message(payload.as_ref())
                );
                self.stats.start_failures = self.stats.start_failures.saturating_add(1);
            }
        }

        self.tasks.push(TaskEntry {
            id,
            task,
            stats: TaskStats::default(),
        });
    }

    fn retire(&mut self, id: TaskId) {
        let Some(index) = self.tasks.iter().position(|entry| entry.id == id) else {
            crate::log_debug!("{} already removed", id);
            return;
        };

        // Leaving the list first guarantees stop() runs exactly once
        let mut entry = self.tasks.remove(index);
        let name = entry.task.name();

        let mut ctx = TaskContext::new(
            id,
            self.round,
            Phase::Stop,
            &mut self.events,
            &mut self.staging,
        );
        let task = &mut entry.task;
        let result = panic::catch_unwind(AssertUnwindSafe(|| task.stop(&mut ctx)));
        self.stats.events_queued += ctx.events_queued();

        if let Err(payload) = result {
            crate::log_error!(
                "{} ({}) panicked in stop: {}",
                name,
                id,
                panic_message(payload.as_ref())
            );
        }
        crate::log_info!("Stopped {} ({})", name, id);
    }

    fn apply_staged(&mut self) {
        // Hooks run here may stage further changes
        while !self.staging.is_empty() {
            let added = std::mem::take(&mut self.staging.added);
            for (id, task) in added {
                self.admit(id, task);
            }

            let removed = std::mem::take(&mut self.staging.removed);
            for id in removed {
                self.retire(id);
            }
        }
    }
}

impl<T: TimeSource> Drop for TaskQueue<T> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
