//! Mock vision engine for testing

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Detection, VisionEngine, VisionError};

#[derive(Debug, Default)]
struct VisionState {
    available: bool,
    active: bool,
    batches: VecDeque<Vec<Detection>>,
    fetch_count: u32,
    activations: u32,
    deactivations: u32,
}

/// Mock vision engine
///
/// Tests queue detection batches; each `updated_detections` call returns the
/// next queued batch, or an empty batch when none is queued. Clones share
/// state.
#[derive(Debug, Clone)]
pub struct MockVision {
    state: Arc<Mutex<VisionState>>,
}

impl MockVision {
    /// Create an available, inactive engine
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(VisionState {
                available: true,
                ..VisionState::default()
            })),
        }
    }

    /// Create an engine whose activation always fails
    pub fn unavailable() -> Self {
        Self {
            state: Arc::new(Mutex::new(VisionState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, VisionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue a batch to be returned by a later fetch
    pub fn push_batch(&self, batch: Vec<Detection>) {
        self.state().batches.push_back(batch);
    }

    /// Number of `updated_detections` calls so far
    pub fn fetch_count(&self) -> u32 {
        self.state().fetch_count
    }

    /// Whether the engine is currently active
    pub fn is_active(&self) -> bool {
        self.state().active
    }

    /// Number of successful activations
    pub fn activations(&self) -> u32 {
        self.state().activations
    }

    /// Number of deactivations
    pub fn deactivations(&self) -> u32 {
        self.state().deactivations
    }
}

impl Default for MockVision {
    fn default() -> Self {
        Self::new()
    }
}

impl VisionEngine for MockVision {
    fn activate(&mut self) -> Result<(), VisionError> {
        let mut state = self.state();
        if !state.available {
            return Err(VisionError::Unavailable);
        }
        state.active = true;
        state.activations += 1;
        Ok(())
    }

    fn deactivate(&mut self) {
        let mut state = self.state();
        state.active = false;
        state.deactivations += 1;
    }

    fn updated_detections(&mut self) -> Vec<Detection> {
        let mut state = self.state();
        state.fetch_count += 1;
        state.batches.pop_front().unwrap_or_default()
    }
}
