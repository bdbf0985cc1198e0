//! Task statistics tracking
//!
//! Runtime statistics for individual tasks and global scheduler metrics.
//! Statistics are updated by the task queue after each timeslice and can be
//! queried for monitoring and debugging.

/// Runtime statistics for a single task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Last timeslice duration in microseconds
    pub last_execution_us: u32,

    /// Average timeslice duration in microseconds (exponential moving average)
    ///
    /// Uses EMA with alpha = 0.1 to smooth out variations while remaining
    /// responsive to changes (e.g. a vision fetch vs. a rate-limited skip).
    pub avg_execution_us: u32,

    /// Maximum timeslice duration observed in microseconds
    pub max_execution_us: u32,

    /// Number of timeslices that exceeded the slice budget
    pub budget_overruns: u32,

    /// Total number of timeslices executed
    pub execution_count: u64,
}

impl TaskStats {
    /// Update statistics with a new timeslice measurement
    ///
    /// # Arguments
    ///
    /// * `execution_us` - Duration of the timeslice in microseconds
    /// * `budget_us` - Slice budget in microseconds (0 disables overrun accounting)
    ///
    /// # Returns
    ///
    /// `true` if this timeslice overran the budget
    pub fn update(&mut self, execution_us: u32, budget_us: u32) -> bool {
        self.last_execution_us = execution_us;
        self.execution_count = self.execution_count.saturating_add(1);

        // EMA: avg_new = (value + 9 * avg_old) / 10
        if self.execution_count == 1 {
            self.avg_execution_us = execution_us;
        } else {
            let avg = (u64::from(execution_us) + 9 * u64::from(self.avg_execution_us)) / 10;
            self.avg_execution_us = avg as u32;
        }

        if execution_us > self.max_execution_us {
            self.max_execution_us = execution_us;
        }

        let overrun = budget_us > 0 && execution_us > budget_us;
        if overrun {
            self.budget_overruns = self.budget_overruns.saturating_add(1);
        }
        overrun
    }

    /// Reset all statistics to initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Global scheduler statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Completed scheduling rounds
    pub rounds: u64,

    /// Total timeslices executed across all tasks
    pub timeslices: u64,

    /// Total budget overruns across all tasks
    pub total_budget_overruns: u32,

    /// Tasks removed after an error or panic in `timeslice`
    pub task_failures: u32,

    /// Tasks whose `start` reported an error
    pub start_failures: u32,

    /// Events queued since creation
    pub events_queued: u64,

    /// Currently registered tasks
    pub task_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_stats_update() {
        let mut stats = TaskStats::default();

        // First execution
        assert!(!stats.update(1500, 2000));
        assert_eq!(stats.last_execution_us, 1500);
        assert_eq!(stats.avg_execution_us, 1500);
        assert_eq!(stats.max_execution_us, 1500);
        assert_eq!(stats.budget_overruns, 0);
        assert_eq!(stats.execution_count, 1);

        // Second execution - normal
        assert!(!stats.update(1600, 2000));
        assert_eq!(stats.avg_execution_us, (1600 + 9 * 1500) / 10);
        assert_eq!(stats.max_execution_us, 1600);
        assert_eq!(stats.execution_count, 2);

        // Third execution - overrun
        assert!(stats.update(2100, 2000));
        assert_eq!(stats.max_execution_us, 2100);
        assert_eq!(stats.budget_overruns, 1);
        assert_eq!(stats.execution_count, 3);
    }

    #[test]
    fn test_task_stats_zero_first_sample() {
        let mut stats = TaskStats::default();
        stats.update(0, 2000);
        stats.update(1000, 2000);

        // A zero first sample is still a sample
        assert_eq!(stats.avg_execution_us, 100);
    }

    #[test]
    fn test_task_stats_budget_disabled() {
        let mut stats = TaskStats::default();
        assert!(!stats.update(u32::MAX, 0));
        assert_eq!(stats.budget_overruns, 0);
    }

    #[test]
    fn test_task_stats_reset() {
        let mut stats = TaskStats::default();
        stats.update(2500, 2000);
        stats.reset();
        assert_eq!(stats, TaskStats::default());
    }
}
