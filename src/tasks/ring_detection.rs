//! Ring Detection Task
//!
//! Polls an object detection engine for recognized rings and posts
//! `OBJECTS_DETECTED` events carrying the detections selected by the
//! configured [`DetectionKind`].
//!
//! ## Behavior
//!
//! - `start()` activates the vision engine and starts the rate-limit timer
//! - `timeslice()` fetches the latest recognitions at most once per
//!   `rate_limit_ms` (every round when 0), selects detections, posts an event
//! - `stop()` deactivates the vision engine
//! - Never finishes on its own; runs until removed
//!
//! ## States
//!
//! ```text
//! Unstarted ──start()──▶ Active ──stop()──▶ Stopped
//!     │
//!     └── vision unavailable: stays Unstarted (inert)
//! ```

use crate::core::scheduler::{EventPayload, RobotTask, TaskContext, TaskError};
use crate::core::traits::{ElapsedTimer, TimeSource};
use crate::devices::vision::{Detection, VisionEngine};
use crate::parameters::DetectionParams;
use crate::platform::traits::TelemetrySink;

/// Detection selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionKind {
    /// Every detection, unfiltered
    #[default]
    All,
    /// Only quad stacks
    QuadRing,
    /// Only single rings
    SingleRing,
    /// The single ring with the largest bounding box
    LargestSingleRing,
    /// Nothing is selected
    Unknown,
}

impl DetectionKind {
    /// Parameter encoding of this policy
    pub fn index(self) -> i32 {
        match self {
            DetectionKind::All => 0,
            DetectionKind::QuadRing => 1,
            DetectionKind::SingleRing => 2,
            DetectionKind::LargestSingleRing => 3,
            DetectionKind::Unknown => 4,
        }
    }

    /// Decode a policy from its parameter encoding
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(DetectionKind::All),
            1 => Some(DetectionKind::QuadRing),
            2 => Some(DetectionKind::SingleRing),
            3 => Some(DetectionKind::LargestSingleRing),
            4 => Some(DetectionKind::Unknown),
            _ => None,
        }
    }

    /// Select the detections this policy reports from one batch
    ///
    /// Returns `None` when nothing should be reported. Selected detections
    /// keep their batch order. For `LargestSingleRing`, equal areas keep the
    /// first detection seen.
    pub fn select(self, labels: &RingLabels, batch: Vec<Detection>) -> Option<Vec<Detection>> {
        if batch.is_empty() {
            return None;
        }

        let selected = match self {
            DetectionKind::All => batch,
            DetectionKind::QuadRing => filter_kind(labels, batch, RingKind::Quad),
            DetectionKind::SingleRing => filter_kind(labels, batch, RingKind::Single),
            DetectionKind::LargestSingleRing => {
                let mut largest: Option<Detection> = None;
                for detection in batch {
                    if labels.classify(&detection) != RingKind::Single {
                        continue;
                    }
                    let larger = match &largest {
                        Some(best) => best.area() < detection.area(),
                        None => true,
                    };
                    if larger {
                        largest = Some(detection);
                    }
                }
                largest.into_iter().collect()
            }
            DetectionKind::Unknown => Vec::new(),
        };

        if selected.is_empty() {
            None
        } else {
            Some(selected)
        }
    }
}

fn filter_kind(labels: &RingLabels, batch: Vec<Detection>, kind: RingKind) -> Vec<Detection> {
    batch
        .into_iter()
        .filter(|detection| labels.classify(detection) == kind)
        .collect()
}

/// Classification of a single detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Single,
    Quad,
    Unknown,
}

/// Model labels mapped to ring kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingLabels {
    /// Label of a quad stack
    pub quad: String,
    /// Label of a single ring
    pub single: String,
}

impl Default for RingLabels {
    fn default() -> Self {
        Self {
            quad: "Quad".to_string(),
            single: "Single".to_string(),
        }
    }
}

impl RingLabels {
    /// Classify a detection by exact label match
    pub fn classify(&self, detection: &Detection) -> RingKind {
        if detection.label == self.quad {
            RingKind::Quad
        } else if detection.label == self.single {
            RingKind::Single
        } else {
            RingKind::Unknown
        }
    }
}

/// Lifecycle state of a [`RingDetectionTask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionState {
    Unstarted,
    Active,
    Stopped,
}

/// Vision-based ring detection task
pub struct RingDetectionTask<V: VisionEngine, T: TimeSource> {
    vision: V,
    time: T,
    telemetry: Option<Box<dyn TelemetrySink>>,
    kind: DetectionKind,
    labels: RingLabels,
    rate_limit_ms: u32,
    timer: Option<ElapsedTimer<T>>,
    state: DetectionState,
}

impl<V: VisionEngine, T: TimeSource> RingDetectionTask<V, T> {
    /// Create a task reporting every detection, without rate limit
    pub fn new(vision: V, time: T) -> Self {
        Self {
            vision,
            time,
            telemetry: None,
            kind: DetectionKind::All,
            labels: RingLabels::default(),
            rate_limit_ms: 0,
            timer: None,
            state: DetectionState::Unstarted,
        }
    }

    /// Create a task configured from loaded parameters
    pub fn from_params(vision: V, time: T, params: &DetectionParams) -> Self {
        let mut task = Self::new(vision, time);
        task.rate_limit_ms = params.rate_limit_ms;
        task.kind = params.kind;
        task.labels = params.labels.clone();
        task
    }

    /// Attach a telemetry sink for status messages
    pub fn with_telemetry<S: TelemetrySink + 'static>(mut self, sink: S) -> Self {
        self.telemetry = Some(Box::new(sink));
        self
    }

    /// Minimum interval between vision fetches (0 = every round)
    pub fn set_rate_limit_ms(&mut self, ms: u32) {
        self.rate_limit_ms = ms;
    }

    /// Change the selection policy; applies from the next fetch
    pub fn set_detection_kind(&mut self, kind: DetectionKind) {
        self.kind = kind;
    }

    /// Override the classification labels
    pub fn set_labels(&mut self, labels: RingLabels) {
        self.labels = labels;
    }

    /// Classify a detection with this task's labels
    pub fn classify(&self, detection: &Detection) -> RingKind {
        self.labels.classify(detection)
    }

    pub fn rate_limit_ms(&self) -> u32 {
        self.rate_limit_ms
    }

    pub fn detection_kind(&self) -> DetectionKind {
        self.kind
    }

    pub fn labels(&self) -> &RingLabels {
        &self.labels
    }

    pub fn state(&self) -> DetectionState {
        self.state
    }

    fn rate_limited(&self) -> bool {
        match &self.timer {
            Some(timer) if self.rate_limit_ms > 0 => {
                timer.elapsed_ms() < u64::from(self.rate_limit_ms)
            }
            _ => false,
        }
    }
}

impl<V: VisionEngine, T: TimeSource> RobotTask for RingDetectionTask<V, T> {
    fn name(&self) -> &'static str {
        "RingDetection"
    }

    fn start(&mut self, _ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        if let Err(e) = self.vision.activate() {
            if let Some(telemetry) = self.telemetry.as_mut() {
                telemetry.add_line("Sorry!", "This device is not compatible with TFOD");
            }
            return Err(TaskError::Configuration(e.to_string()));
        }

        self.timer = Some(ElapsedTimer::new(self.time.clone()));
        self.state = DetectionState::Active;
        crate::log_info!(
            "Ring detection active: kind={:?}, rate_limit={}ms",
            self.kind,
            self.rate_limit_ms
        );
        Ok(())
    }

    fn stop(&mut self, ctx: &mut TaskContext<'_>) {
        if self.state == DetectionState::Active {
            self.vision.deactivate();
        }
        self.state = DetectionState::Stopped;
        ctx.request_removal();
    }

    fn timeslice(&mut self, ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
        if self.state != DetectionState::Active {
            return Ok(false);
        }

        if self.rate_limited() {
            crate::log_trace!("Ring detection rate limited");
            return Ok(false);
        }

        let batch = self.vision.updated_detections();
        if let Some(selected) = self.kind.select(&self.labels, batch) {
            crate::log_debug!(
                "Ring detection selected {} detection(s) ({:?})",
                selected.len(),
                self.kind
            );
            ctx.queue_event(EventPayload::ObjectsDetected(selected));
        }

        // Interval runs from the last fetch, not the last round
        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
        }

        Ok(false)
    }
}
