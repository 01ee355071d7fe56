//! In-memory store adapters for the `in-memory` driver.
//!
//! Each instance is one logical store; the composition root creates two
//! separate read-store instances to preserve the two-projection topology.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use klaxon_alarms::application::ports::{
    CreateAlarmRepository, FindAlarmsRepository, UpsertMaterializedAlarmRepository,
};
use klaxon_alarms::domain::alarm::Alarm;
use klaxon_alarms::domain::read_model::AlarmReadModel;
use klaxon_core::error::DomainError;
use uuid::Uuid;

/// In-memory authoritative write store.
#[derive(Debug, Default)]
pub struct InMemoryCreateAlarmRepository {
    alarms: Mutex<HashMap<Uuid, Alarm>>,
}

impl InMemoryCreateAlarmRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CreateAlarmRepository for InMemoryCreateAlarmRepository {
    async fn save(&self, alarm: &Alarm) -> Result<(), DomainError> {
        let mut alarms = self
            .alarms
            .lock()
            .map_err(|_| DomainError::WriteStore("alarm store lock poisoned".to_owned()))?;
        // The id is immutable once assigned; a second save for the same id
        // is a caller bug, not an upsert.
        if alarms.contains_key(&alarm.id) {
            return Err(DomainError::WriteStore(format!(
                "duplicate alarm id {}",
                alarm.id
            )));
        }
        alarms.insert(alarm.id, alarm.clone());
        Ok(())
    }
}

/// One in-memory read store: materialized alarms keyed by id.
///
/// Map insertion replaces the previous value wholesale, which gives the
/// upsert contract (full replacement, idempotent under redelivery) directly.
#[derive(Debug, Default)]
pub struct InMemoryMaterializedAlarmRepository {
    models: Mutex<HashMap<Uuid, AlarmReadModel>>,
}

impl InMemoryMaterializedAlarmRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UpsertMaterializedAlarmRepository for InMemoryMaterializedAlarmRepository {
    async fn upsert(&self, alarm: &AlarmReadModel) -> Result<(), DomainError> {
        let mut models = self
            .models
            .lock()
            .map_err(|_| DomainError::ReadStore("read store lock poisoned".to_owned()))?;
        models.insert(alarm.id, alarm.clone());
        Ok(())
    }
}

#[async_trait]
impl FindAlarmsRepository for InMemoryMaterializedAlarmRepository {
    async fn find_all(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        let models = self
            .models
            .lock()
            .map_err(|_| DomainError::ReadStore("read store lock poisoned".to_owned()))?;
        Ok(models.values().cloned().collect())
    }
}
