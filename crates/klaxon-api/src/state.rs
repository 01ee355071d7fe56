//! Shared application state and the composition root.
//!
//! Concrete store adapters are constructed here exactly once, behind the
//! alarm ports, from the driver chosen at startup. Nothing selects an
//! implementation at call time.

use std::sync::Arc;

use klaxon_alarms::application::projector::MaterializedViewProjector;
use klaxon_alarms::application::service::AlarmService;
use klaxon_alarms::domain::events::AlarmEvent;
use klaxon_core::bus::EventBus;
use klaxon_core::clock::Clock;
use klaxon_persistence::{
    InMemoryCreateAlarmRepository, InMemoryMaterializedAlarmRepository, PgCreateAlarmRepository,
    PgDocumentAlarmRepository, PgMaterializedAlarmRepository,
};
use sqlx::PgPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single service every adapter calls.
    pub service: Arc<AlarmService>,
}

impl AppState {
    /// Wraps an already-composed service.
    #[must_use]
    pub fn new(service: Arc<AlarmService>) -> Self {
        Self { service }
    }

    /// Builds the `relational` driver: PostgreSQL write store plus the two
    /// PostgreSQL read stores, with one projector registered per store.
    ///
    /// The pools may point at distinct databases; no transaction ever spans
    /// them.
    #[must_use]
    pub fn relational(write_pool: PgPool, read_pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        let document = Arc::new(PgDocumentAlarmRepository::new(read_pool.clone()));
        let relational = Arc::new(PgMaterializedAlarmRepository::new(read_pool));

        let mut bus: EventBus<AlarmEvent> = EventBus::new();
        bus.subscribe(Arc::new(MaterializedViewProjector::new(
            "document",
            document.clone(),
        )));
        bus.subscribe(Arc::new(MaterializedViewProjector::new(
            "relational",
            relational.clone(),
        )));

        let service = AlarmService::new(
            clock,
            Arc::new(PgCreateAlarmRepository::new(write_pool)),
            document,
            relational,
            Arc::new(bus),
        );
        Self::new(Arc::new(service))
    }

    /// Builds the `in-memory` driver: two distinct in-memory read stores,
    /// preserving the two-projection topology.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let document = Arc::new(InMemoryMaterializedAlarmRepository::new());
        let relational = Arc::new(InMemoryMaterializedAlarmRepository::new());

        let mut bus: EventBus<AlarmEvent> = EventBus::new();
        bus.subscribe(Arc::new(MaterializedViewProjector::new(
            "document",
            document.clone(),
        )));
        bus.subscribe(Arc::new(MaterializedViewProjector::new(
            "relational",
            relational.clone(),
        )));

        let service = AlarmService::new(
            clock,
            Arc::new(InMemoryCreateAlarmRepository::new()),
            document,
            relational,
            Arc::new(bus),
        );
        Self::new(Arc::new(service))
    }
}
