//! Parameter store
//!
//! Bounded name → value map that task configuration blocks register their
//! defaults in and load from. Entries keep registration order, so listing
//! the store shows parameters grouped by the block that registered them.
//!
//! # Example
//!
//! ```
//! use robot_tasks::parameters::{ParamFlags, ParamValue, ParameterStore};
//!
//! let mut store = ParameterStore::new();
//! store
//!     .register("RDET_RATE_MS", ParamValue::Int(0), ParamFlags::empty())
//!     .unwrap();
//!
//! store.set("RDET_RATE_MS", ParamValue::Int(250)).unwrap();
//! assert_eq!(store.get("RDET_RATE_MS"), Some(&ParamValue::Int(250)));
//! ```

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 64;

/// Maximum string parameter length
pub const MAX_STRING_LEN: usize = 63;

/// Parameter name as stored
pub type ParamName = String<PARAM_NAME_LEN>;

bitflags! {
    /// Per-parameter access flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Left out of `iter_names` and `count`
        const HIDDEN = 0b00000001;
        /// Rejects `set`; only the registered default is ever visible
        const READ_ONLY = 0b00000010;
    }
}

/// A typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Bounded string (model labels and the like)
    String(String<MAX_STRING_LEN>),
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl ParamValue {
    /// String value from `value`, cut at `MAX_STRING_LEN` bytes on a char
    /// boundary
    pub fn string(value: &str) -> Self {
        let mut s = String::new();
        for c in value.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        ParamValue::String(s)
    }

    /// Numeric tag of the value's type
    pub fn type_id(&self) -> u8 {
        match self {
            ParamValue::String(_) => 0,
            ParamValue::Bool(_) => 1,
            ParamValue::Int(_) => 2,
            ParamValue::Float(_) => 3,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, ParamValue::Int(_) | ParamValue::Float(_))
    }

    /// Whether `next` may replace this value
    ///
    /// Int and Float replace each other freely; other types must match.
    fn accepts(&self, next: &ParamValue) -> bool {
        self.type_id() == next.type_id() || (self.is_numeric() && next.is_numeric())
    }
}

/// Parameter metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamMetadata {
    pub flags: ParamFlags,
}

#[derive(Debug, Clone)]
struct ParamEntry {
    value: ParamValue,
    meta: ParamMetadata,
}

/// Bounded parameter map
pub struct ParameterStore {
    entries: FnvIndexMap<ParamName, ParamEntry, MAX_PARAMS>,
    /// Set by every successful change, cleared by `clear_dirty`
    dirty: bool,
}

fn param_name(name: &str) -> Result<ParamName, ParameterError> {
    let mut key = ParamName::new();
    key.push_str(name)
        .map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
            dirty: false,
        }
    }

    fn entry(&self, name: &str) -> Option<&ParamEntry> {
        let key = param_name(name).ok()?;
        self.entries.get(&key)
    }

    /// Value of `name`, if registered
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entry(name).map(|entry| &entry.value)
    }

    /// Replace the value of a registered parameter
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `name` is not registered
    /// - `TypeMismatch` if `value` cannot replace the current value's type
    /// - `ReadOnly` if the parameter was registered `READ_ONLY`
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = param_name(name)?;
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or(ParameterError::InvalidConfig)?;

        if !entry.value.accepts(&value) {
            return Err(ParameterError::TypeMismatch);
        }
        if entry.meta.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }

        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Register `name` with its default value
    ///
    /// Registering an existing name keeps the current value and flags, so
    /// every block can register its defaults unconditionally at startup.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = param_name(name)?;
        if self.entries.contains_key(&key) {
            return Ok(());
        }

        let entry = ParamEntry {
            value: default_value,
            meta: ParamMetadata { flags },
        };
        self.entries
            .insert(key, entry)
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    pub fn get_metadata(&self, name: &str) -> Option<&ParamMetadata> {
        self.entry(name).map(|entry| &entry.meta)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.get_metadata(name)
            .is_some_and(|meta| meta.flags.contains(ParamFlags::HIDDEN))
    }

    /// Visible parameter names in registration order
    pub fn iter_names(&self) -> impl Iterator<Item = &ParamName> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.meta.flags.contains(ParamFlags::HIDDEN))
            .map(|(name, _)| name)
    }

    /// Number of visible parameters
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    /// Number of parameters, hidden ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
