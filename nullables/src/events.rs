//! Nullable event sink: record events instead of publishing them.

use idreg_types::{EventSink, RegistryEvent};
use std::sync::Mutex;

/// A test sink that keeps every emitted event in order.
pub struct NullEventSink {
    events: Mutex<Vec<RegistryEvent>>,
}

impl NullEventSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// All events received so far (for assertions).
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<RegistryEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    /// Event kinds in emission order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.kind()).collect()
    }

    pub fn reset(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullEventSink {
    fn emit(&self, event: &RegistryEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
