//! Drive Parameter Definitions
//!
//! # Parameters
//!
//! - `DRV_SLOW_MULT` - Power multiplier applied in slow mode (0.0 to 1.0)
//! - `DRV_SLOW` - Start in slow mode

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default slow-mode multiplier
const DEFAULT_SLOW_MULT: f32 = 0.5;

/// Drive parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveParams {
    /// Power multiplier applied in slow mode
    pub slow_multiplier: f32,
    /// Whether the drive starts in slow mode
    pub slow: bool,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            slow_multiplier: DEFAULT_SLOW_MULT,
            slow: false,
        }
    }
}

impl DriveParams {
    /// Register drive parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "DRV_SLOW_MULT",
            ParamValue::Float(DEFAULT_SLOW_MULT),
            ParamFlags::empty(),
        )?;
        store.register("DRV_SLOW", ParamValue::Bool(false), ParamFlags::empty())?;
        Ok(())
    }

    /// Load drive parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let slow_multiplier = match store.get("DRV_SLOW_MULT") {
            Some(ParamValue::Float(v)) if v.is_finite() => v.clamp(0.0, 1.0),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(0.0, 1.0),
            _ => DEFAULT_SLOW_MULT,
        };

        let slow = match store.get("DRV_SLOW") {
            Some(ParamValue::Bool(v)) => *v,
            _ => false,
        };

        Self {
            slow_multiplier,
            slow,
        }
    }

    /// Multiplier the drive starts with
    pub fn initial_multiplier(&self) -> f32 {
        if self.slow {
            self.slow_multiplier
        } else {
            1.0
        }
    }

    /// Validate drive parameters
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.slow_multiplier)
    }
}
