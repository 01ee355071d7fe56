//! Domain events for the Alarms context.

use klaxon_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::alarm::AlarmSnapshot;

/// Event type name for [`AlarmCreated`].
pub const ALARM_CREATED_EVENT_TYPE: &str = "alarms.alarm_created";

/// Emitted after an alarm has been persisted to the authoritative store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmCreated {
    /// Full aggregate state at the moment of creation.
    pub alarm: AlarmSnapshot,
}

/// Event payload variants for the Alarms context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlarmEventKind {
    /// An alarm has been created.
    AlarmCreated(AlarmCreated),
}

/// Domain event envelope for the Alarms context.
#[derive(Debug, Clone)]
pub struct AlarmEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: AlarmEventKind,
}

impl DomainEvent for AlarmEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            AlarmEventKind::AlarmCreated(_) => ALARM_CREATED_EVENT_TYPE,
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
