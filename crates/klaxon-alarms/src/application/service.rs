//! Application service — the single interface every adapter calls.

use std::sync::Arc;

use klaxon_core::bus::EventBus;
use klaxon_core::clock::Clock;
use klaxon_core::command::Command;
use klaxon_core::error::DomainError;

use crate::application::ports::{CreateAlarmRepository, FindAlarmsRepository};
use crate::application::{command_handlers, query_handlers};
use crate::domain::alarm::AlarmSnapshot;
use crate::domain::commands::CreateAlarm;
use crate::domain::events::AlarmEvent;
use crate::domain::factory::AlarmFactory;
use crate::domain::read_model::AlarmReadModel;

/// Facade over the command and query handlers.
///
/// Adapters (HTTP routes, scheduled jobs) translate their inputs into calls
/// on this service and hold no domain logic of their own. The two list
/// operations are deliberately distinct: the stores behind them may diverge
/// transiently.
pub struct AlarmService {
    factory: AlarmFactory,
    clock: Arc<dyn Clock>,
    write_repository: Arc<dyn CreateAlarmRepository>,
    document_finder: Arc<dyn FindAlarmsRepository>,
    relational_finder: Arc<dyn FindAlarmsRepository>,
    event_bus: Arc<EventBus<AlarmEvent>>,
}

impl AlarmService {
    /// Wires the service from the adapters chosen by the composition root.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        write_repository: Arc<dyn CreateAlarmRepository>,
        document_finder: Arc<dyn FindAlarmsRepository>,
        relational_finder: Arc<dyn FindAlarmsRepository>,
        event_bus: Arc<EventBus<AlarmEvent>>,
    ) -> Self {
        Self {
            factory: AlarmFactory,
            clock,
            write_repository,
            document_finder,
            relational_finder,
            event_bus,
        }
    }

    /// Creates an alarm and returns the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for bad input and
    /// `DomainError::WriteStore` when the authoritative store fails.
    pub async fn create(&self, command: CreateAlarm) -> Result<AlarmSnapshot, DomainError> {
        tracing::info!(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id(),
            "handling command"
        );
        command_handlers::handle_create_alarm(
            &command,
            &self.factory,
            self.clock.as_ref(),
            self.write_repository.as_ref(),
            &self.event_bus,
        )
        .await
    }

    /// Lists alarms from the document read store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReadStore` when the store cannot be read.
    pub async fn list(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        query_handlers::get_alarms(self.document_finder.as_ref()).await
    }

    /// Lists alarms from the relational read store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReadStore` when the store cannot be read.
    pub async fn list_relational(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        query_handlers::get_alarms(self.relational_finder.as_ref()).await
    }
}
