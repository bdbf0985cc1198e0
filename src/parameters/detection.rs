//! Ring Detection Parameter Definitions
//!
//! # Parameters
//!
//! - `RDET_RATE_MS` - Minimum interval between vision fetches in ms (0 = every round)
//! - `RDET_KIND` - Selection policy (0=all, 1=quad, 2=single, 3=largest single, 4=unknown)
//! - `RDET_QUAD_LBL` - Model label classified as a quad stack
//! - `RDET_SNGL_LBL` - Model label classified as a single ring

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::tasks::ring_detection::{DetectionKind, RingLabels};

/// Default fetch interval (0 = no rate limit)
const DEFAULT_RATE_MS: u32 = 0;

/// Maximum fetch interval in ms
const MAX_RATE_MS: u32 = 60_000;

/// Ring detection parameters loaded from parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionParams {
    /// Minimum interval between vision fetches in ms
    pub rate_limit_ms: u32,
    /// Selection policy applied to each batch
    pub kind: DetectionKind,
    /// Labels used to classify detections
    pub labels: RingLabels,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            rate_limit_ms: DEFAULT_RATE_MS,
            kind: DetectionKind::All,
            labels: RingLabels::default(),
        }
    }
}

impl DetectionParams {
    /// Register ring detection parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = Self::default();

        store.register(
            "RDET_RATE_MS",
            ParamValue::Int(DEFAULT_RATE_MS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "RDET_KIND",
            ParamValue::Int(defaults.kind.index()),
            ParamFlags::empty(),
        )?;
        store.register(
            "RDET_QUAD_LBL",
            ParamValue::string(&defaults.labels.quad),
            ParamFlags::empty(),
        )?;
        store.register(
            "RDET_SNGL_LBL",
            ParamValue::string(&defaults.labels.single),
            ParamFlags::empty(),
        )?;

        Ok(())
    }

    /// Load ring detection parameters from parameter store
    ///
    /// Missing or mistyped entries and unknown policy indices fall back to
    /// defaults; the rate limit is clamped to its valid range.
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();

        let rate_limit_ms = match store.get("RDET_RATE_MS") {
            Some(ParamValue::Int(v)) => (*v).clamp(0, MAX_RATE_MS as i32) as u32,
            Some(ParamValue::Float(v)) => v.clamp(0.0, MAX_RATE_MS as f32) as u32,
            _ => DEFAULT_RATE_MS,
        };

        let kind = match store.get("RDET_KIND") {
            Some(ParamValue::Int(v)) => DetectionKind::from_index(*v),
            Some(ParamValue::Float(v)) => DetectionKind::from_index(*v as i32),
            _ => None,
        }
        .unwrap_or(defaults.kind);

        let quad = match store.get("RDET_QUAD_LBL") {
            Some(ParamValue::String(s)) => s.as_str().to_string(),
            _ => defaults.labels.quad,
        };

        let single = match store.get("RDET_SNGL_LBL") {
            Some(ParamValue::String(s)) => s.as_str().to_string(),
            _ => defaults.labels.single,
        };

        Self {
            rate_limit_ms,
            kind,
            labels: RingLabels { quad, single },
        }
    }

    /// Validate ring detection parameters
    ///
    /// Labels must be non-empty and distinct, otherwise classification is
    /// ambiguous.
    pub fn is_valid(&self) -> bool {
        self.rate_limit_ms <= MAX_RATE_MS
            && !self.labels.quad.is_empty()
            && !self.labels.single.is_empty()
            && self.labels.quad != self.labels.single
    }
}
