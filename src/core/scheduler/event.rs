//! Events posted by tasks
//!
//! Each event kind is a variant of [`EventPayload`] carrying its own typed
//! payload. Events are immutable once constructed: fields are private and
//! only exposed through accessors.

use std::fmt;

use super::types::TaskId;
use crate::devices::vision::Detection;

/// Event kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ObjectsDetected,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ObjectsDetected => write!(f, "OBJECTS_DETECTED"),
        }
    }
}

/// Typed event payload
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Detections selected by a ring detection task, in detection order
    ObjectsDetected(Vec<Detection>),
}

impl EventPayload {
    /// Kind of this payload
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::ObjectsDetected(_) => EventKind::ObjectsDetected,
        }
    }
}

/// An event queued by a task
#[derive(Debug, Clone, PartialEq)]
pub struct RobotEvent {
    source: TaskId,
    round: u64,
    payload: EventPayload,
}

impl RobotEvent {
    /// Create an event
    ///
    /// `round` is the scheduling round in which the event was produced.
    pub fn new(source: TaskId, round: u64, payload: EventPayload) -> Self {
        Self {
            source,
            round,
            payload,
        }
    }

    /// Task that produced the event
    ///
    /// Informational only: the task may already be gone.
    pub fn source(&self) -> TaskId {
        self.source
    }

    /// Scheduling round in which the event was queued
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Event kind
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Event payload
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Consume the event, returning its payload
    pub fn into_payload(self) -> EventPayload {
        self.payload
    }

    /// Detections carried by an `ObjectsDetected` event
    pub fn detections(&self) -> Option<&[Detection]> {
        match &self.payload {
            EventPayload::ObjectsDetected(detections) => Some(detections),
        }
    }
}

impl fmt::Display for RobotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let detections = vec![Detection::new("Quad", 2.0, 3.0, 0.7)];
        let event = RobotEvent::new(
            TaskId(3),
            12,
            EventPayload::ObjectsDetected(detections.clone()),
        );

        assert_eq!(event.source(), TaskId(3));
        assert_eq!(event.round(), 12);
        assert_eq!(event.kind(), EventKind::ObjectsDetected);
        assert_eq!(event.detections(), Some(detections.as_slice()));
        assert_eq!(
            event.into_payload(),
            EventPayload::ObjectsDetected(detections)
        );
    }

    #[test]
    fn test_event_display_is_kind() {
        let event = RobotEvent::new(TaskId(1), 0, EventPayload::ObjectsDetected(Vec::new()));
        assert_eq!(event.to_string(), "OBJECTS_DETECTED");
    }
}
