//! Task configuration parameters
//!
//! Each task family owns a parameter block that registers its defaults in a
//! shared [`ParameterStore`] and loads a typed configuration back from it.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │        ParameterStore                  │
//! │  - name -> value map (bounded)         │
//! │  - HIDDEN / READ_ONLY flags            │
//! └──────────────┬─────────────────────────┘
//!                │ register_defaults / from_store
//!                ▼
//! ┌────────────────────────────────────────┐
//! │  DetectionParams  DriveParams          │
//! │  SchedulerParams                       │
//! └────────────────────────────────────────┘
//! ```
//!
//! # Parameter Types
//!
//! - `String` - Fixed-capacity string (e.g. model labels)
//! - `Bool` - Boolean value
//! - `Int` - 32-bit signed integer
//! - `Float` - 32-bit floating point

pub mod detection;
pub mod drive;
pub mod error;
pub mod scheduler;
pub mod storage;

pub use detection::DetectionParams;
pub use drive::DriveParams;
pub use error::ParameterError;
pub use scheduler::SchedulerParams;
pub use storage::{ParamFlags, ParamMetadata, ParamName, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, MAX_STRING_LEN, PARAM_NAME_LEN};
