//! Event-triggered projection into the read stores.

use std::sync::Arc;

use async_trait::async_trait;
use klaxon_core::bus::EventSubscriber;
use klaxon_core::error::DomainError;

use crate::application::ports::UpsertMaterializedAlarmRepository;
use crate::domain::events::{AlarmEvent, AlarmEventKind};
use crate::domain::read_model::AlarmReadModel;

/// Projects alarm events into a single read store.
///
/// One instance is registered on the event bus per configured store, so the
/// stores are invoked independently: a failure here affects only this store
/// and is reported under this store's name. Redelivery converges because the
/// upsert contract replaces the whole read model, items included.
pub struct MaterializedViewProjector {
    store: &'static str,
    repository: Arc<dyn UpsertMaterializedAlarmRepository>,
}

impl MaterializedViewProjector {
    /// Creates a projector for the named read store.
    #[must_use]
    pub fn new(
        store: &'static str,
        repository: Arc<dyn UpsertMaterializedAlarmRepository>,
    ) -> Self {
        Self { store, repository }
    }
}

#[async_trait]
impl EventSubscriber<AlarmEvent> for MaterializedViewProjector {
    fn name(&self) -> &'static str {
        self.store
    }

    async fn handle(&self, event: &AlarmEvent) -> Result<(), DomainError> {
        match &event.kind {
            AlarmEventKind::AlarmCreated(created) => {
                let model = AlarmReadModel::from(&created.alarm);
                self.repository
                    .upsert(&model)
                    .await
                    .map_err(|error| DomainError::Projection {
                        store: self.store.to_owned(),
                        message: error.to_string(),
                    })
            }
        }
    }
}
