//! Scheduler Parameter Definitions
//!
//! # Parameters
//!
//! - `SCHED_BUDGET_US` - Per-timeslice budget in microseconds (0 = no overrun accounting)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default timeslice budget (20 ms)
const DEFAULT_BUDGET_US: u32 = 20_000;

/// Scheduler parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerParams {
    /// Timeslice budget in microseconds
    pub slice_budget_us: u32,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            slice_budget_us: DEFAULT_BUDGET_US,
        }
    }
}

impl SchedulerParams {
    /// Register scheduler parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "SCHED_BUDGET_US",
            ParamValue::Int(DEFAULT_BUDGET_US as i32),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load scheduler parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let slice_budget_us = match store.get("SCHED_BUDGET_US") {
            Some(ParamValue::Int(v)) => (*v).max(0) as u32,
            Some(ParamValue::Float(v)) => v.max(0.0) as u32,
            _ => DEFAULT_BUDGET_US,
        };

        Self { slice_budget_us }
    }

    /// Whether overrun accounting is enabled
    pub fn is_budget_enabled(&self) -> bool {
        self.slice_budget_us > 0
    }
}
