//! Command handlers for the Alarms context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: construct the aggregate, persist it, publish
//! the resulting event.

use std::sync::Arc;

use klaxon_core::bus::EventBus;
use klaxon_core::clock::Clock;
use klaxon_core::command::Command;
use klaxon_core::error::DomainError;
use klaxon_core::event::EventMetadata;
use uuid::Uuid;

use crate::application::ports::CreateAlarmRepository;
use crate::domain::alarm::AlarmSnapshot;
use crate::domain::commands::CreateAlarm;
use crate::domain::events::{AlarmCreated, AlarmEvent, AlarmEventKind};
use crate::domain::factory::AlarmFactory;

/// Handles `CreateAlarm`: builds the aggregate through the factory, persists
/// it via the write repository, then publishes `AlarmCreated`.
///
/// The event is published only after the write has committed, and publishing
/// does not await the projectors; the read stores converge eventually.
///
/// # Errors
///
/// Returns `DomainError::Validation` for bad input (no repository is
/// touched) and `DomainError::WriteStore` when the authoritative store
/// fails (no event is published).
pub async fn handle_create_alarm(
    command: &CreateAlarm,
    factory: &AlarmFactory,
    clock: &dyn Clock,
    repository: &dyn CreateAlarmRepository,
    event_bus: &Arc<EventBus<AlarmEvent>>,
) -> Result<AlarmSnapshot, DomainError> {
    let alarm = factory.create(
        &command.name,
        &command.severity,
        command.triggered_at,
        command.items.clone(),
        clock,
    )?;

    repository.save(&alarm).await?;

    let snapshot = AlarmSnapshot::from(&alarm);
    let event = AlarmEvent {
        metadata: EventMetadata {
            event_id: Uuid::new_v4(),
            aggregate_id: alarm.id,
            correlation_id: command.correlation_id(),
            causation_id: command.correlation_id(),
            occurred_at: clock.now(),
        },
        kind: AlarmEventKind::AlarmCreated(AlarmCreated {
            alarm: snapshot.clone(),
        }),
    };
    event_bus.publish(event);

    Ok(snapshot)
}
