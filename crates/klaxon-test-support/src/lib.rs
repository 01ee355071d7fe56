//! Shared test mocks and utilities for the Klaxon alarm service.

mod clock;
mod subscriber;

pub use clock::FixedClock;
pub use subscriber::{FailingEventSubscriber, RecordingEventSubscriber};
