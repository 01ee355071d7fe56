//! Test subscribers — deterministic `EventSubscriber` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use klaxon_core::bus::EventSubscriber;
use klaxon_core::error::DomainError;

/// A subscriber that records every event it receives and always succeeds.
#[derive(Debug)]
pub struct RecordingEventSubscriber<E> {
    received: Mutex<Vec<E>>,
}

impl<E: Clone> RecordingEventSubscriber<E> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all received events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn received(&self) -> Vec<E> {
        self.received.lock().unwrap().clone()
    }
}

impl<E: Clone> Default for RecordingEventSubscriber<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Clone + Send + Sync> EventSubscriber<E> for RecordingEventSubscriber<E> {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn handle(&self, event: &E) -> Result<(), DomainError> {
        self.received.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A subscriber that always fails, for exercising per-subscriber failure
/// isolation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEventSubscriber;

#[async_trait]
impl<E: Send + Sync> EventSubscriber<E> for FailingEventSubscriber {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn handle(&self, _event: &E) -> Result<(), DomainError> {
        Err(DomainError::Projection {
            store: "failing".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}
