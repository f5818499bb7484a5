//! Event sink adapters.

use crate::events::UlnEvent;
use crate::ports::EventSink;
use parking_lot::Mutex;

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: UlnEvent) {}
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<UlnEvent>>,
}

impl RecordingEventSink {
    /// Sink with no events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events published so far.
    pub fn events(&self) -> Vec<UlnEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<UlnEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: UlnEvent) {
        self.events.lock().push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn publish(&self, event: UlnEvent) {
        (**self).publish(event)
    }
}
