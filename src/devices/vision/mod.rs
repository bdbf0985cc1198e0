//! Object detection engine interface
//!
//! The detection engine itself (camera capture, model inference) runs outside
//! the scheduler. Tasks only see this interface: activate/deactivate the
//! engine and take a non-blocking snapshot of the latest recognitions.
//!
//! # Example
//!
//! ```
//! use robot_tasks::devices::vision::{Detection, MockVision, VisionEngine};
//!
//! let mut vision = MockVision::new();
//! vision.activate().unwrap();
//! vision.push_batch(vec![Detection::new("Quad", 40.0, 20.0, 0.9)]);
//!
//! let batch = vision.updated_detections();
//! assert_eq!(batch.len(), 1);
//! assert!(vision.updated_detections().is_empty());
//! ```

mod mock;

pub use mock::MockVision;

/// Vision engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VisionError {
    /// Engine cannot be created or activated on this hardware
    #[error("object detection is not supported on this device")]
    Unavailable,
}

/// A single labeled recognition with its bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Model label (e.g. "Quad", "Single")
    pub label: String,
    /// Bounding box left edge in pixels
    pub left: f32,
    /// Bounding box top edge in pixels
    pub top: f32,
    /// Bounding box width in pixels
    pub width: f32,
    /// Bounding box height in pixels
    pub height: f32,
    /// Model confidence (0.0 to 1.0)
    pub confidence: f32,
}

impl Detection {
    /// Create a detection anchored at the image origin
    pub fn new(label: &str, width: f32, height: f32, confidence: f32) -> Self {
        Self {
            label: label.to_string(),
            left: 0.0,
            top: 0.0,
            width,
            height,
            confidence,
        }
    }

    /// Move the bounding box to `(left, top)`
    pub fn at(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Bounding box area (width × height)
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Object detection engine
pub trait VisionEngine {
    /// Start processing camera frames
    fn activate(&mut self) -> Result<(), VisionError>;

    /// Stop processing camera frames
    fn deactivate(&mut self);

    /// Recognitions produced since the last call
    ///
    /// Must not block. Returns an empty batch when nothing new is available.
    fn updated_detections(&mut self) -> Vec<Detection>;
}

impl<V: VisionEngine + ?Sized> VisionEngine for Box<V> {
    fn activate(&mut self) -> Result<(), VisionError> {
        (**self).activate()
    }

    fn deactivate(&mut self) {
        (**self).deactivate();
    }

    fn updated_detections(&mut self) -> Vec<Detection> {
        (**self).updated_detections()
    }
}
