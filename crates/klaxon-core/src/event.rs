//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the command that caused it.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
///
/// An event is an immutable fact published after a successful write; it is
/// never mutated after emission.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for routing and logging).
    fn event_type(&self) -> &'static str;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
