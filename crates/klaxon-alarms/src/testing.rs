//! Crate-internal fakes for the alarm ports.

use std::sync::Mutex;

use async_trait::async_trait;
use klaxon_core::error::DomainError;

use crate::application::ports::{
    CreateAlarmRepository, FindAlarmsRepository, UpsertMaterializedAlarmRepository,
};
use crate::domain::alarm::Alarm;
use crate::domain::read_model::AlarmReadModel;

/// A write repository that records every saved aggregate and always
/// succeeds.
pub struct RecordingCreateAlarmRepository {
    saved: Mutex<Vec<Alarm>>,
}

impl RecordingCreateAlarmRepository {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<Alarm> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl CreateAlarmRepository for RecordingCreateAlarmRepository {
    async fn save(&self, alarm: &Alarm) -> Result<(), DomainError> {
        self.saved.lock().unwrap().push(alarm.clone());
        Ok(())
    }
}

/// A write repository that always fails with a `WriteStore` error.
pub struct FailingCreateAlarmRepository;

#[async_trait]
impl CreateAlarmRepository for FailingCreateAlarmRepository {
    async fn save(&self, _alarm: &Alarm) -> Result<(), DomainError> {
        Err(DomainError::WriteStore("connection refused".to_owned()))
    }
}

/// An upsert repository that records every upserted read model and always
/// succeeds.
pub struct RecordingUpsertRepository {
    upserts: Mutex<Vec<AlarmReadModel>>,
}

impl RecordingUpsertRepository {
    pub fn new() -> Self {
        Self {
            upserts: Mutex::new(Vec::new()),
        }
    }

    pub fn upserts(&self) -> Vec<AlarmReadModel> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpsertMaterializedAlarmRepository for RecordingUpsertRepository {
    async fn upsert(&self, alarm: &AlarmReadModel) -> Result<(), DomainError> {
        self.upserts.lock().unwrap().push(alarm.clone());
        Ok(())
    }
}

/// An upsert repository that always fails with a store-level error.
pub struct FailingUpsertRepository;

#[async_trait]
impl UpsertMaterializedAlarmRepository for FailingUpsertRepository {
    async fn upsert(&self, _alarm: &AlarmReadModel) -> Result<(), DomainError> {
        Err(DomainError::ReadStore("connection refused".to_owned()))
    }
}

/// A finder that returns a configured list on every call.
pub struct StaticFindAlarmsRepository {
    models: Vec<AlarmReadModel>,
}

impl StaticFindAlarmsRepository {
    pub fn new(models: Vec<AlarmReadModel>) -> Self {
        Self { models }
    }
}

#[async_trait]
impl FindAlarmsRepository for StaticFindAlarmsRepository {
    async fn find_all(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        Ok(self.models.clone())
    }
}

/// A finder that always fails with a `ReadStore` error.
pub struct FailingFindAlarmsRepository;

#[async_trait]
impl FindAlarmsRepository for FailingFindAlarmsRepository {
    async fn find_all(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        Err(DomainError::ReadStore("connection refused".to_owned()))
    }
}
