use crate::output::traits::{ProgressEvent, ProgressSink};
use std::sync::Mutex;

/// Sink that keeps every event in arrival order
///
/// Useful for library callers that want to post-process a run, and for tests
/// asserting on what a run reported.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// URLs of every `Enumerating` event, in arrival order
    pub fn enumerated_urls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Enumerating { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Candidates of every `Confirmed` event, in arrival order
    pub fn confirmed_candidates(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Confirmed { candidate, .. } => Some(candidate),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for MemorySink {
    fn emit(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
