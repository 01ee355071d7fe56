//! Ports implemented by the store adapters.
//!
//! Concrete adapters are constructed once at process startup by the
//! composition root and injected into the handlers; nothing selects an
//! implementation at call time.

use async_trait::async_trait;
use klaxon_core::error::DomainError;

use crate::domain::alarm::Alarm;
use crate::domain::read_model::AlarmReadModel;

/// Authoritative write store for alarms.
///
/// The implementation exclusively owns the authoritative record; no read
/// store is ever consulted to satisfy a write.
#[async_trait]
pub trait CreateAlarmRepository: Send + Sync {
    /// Persists a newly created aggregate atomically.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WriteStore` when persistence fails; the caller
    /// must then abort the command without publishing.
    async fn save(&self, alarm: &Alarm) -> Result<(), DomainError>;
}

/// Idempotent writer for one read store's materialized alarms.
#[async_trait]
pub trait UpsertMaterializedAlarmRepository: Send + Sync {
    /// Inserts or fully replaces the read model keyed by its id, child
    /// collection included. Redelivering the same model must converge to the
    /// same stored state.
    ///
    /// # Errors
    ///
    /// Returns a store-level `DomainError` when the upsert fails; only this
    /// store is affected.
    async fn upsert(&self, alarm: &AlarmReadModel) -> Result<(), DomainError>;
}

/// Read access to one read store.
#[async_trait]
pub trait FindAlarmsRepository: Send + Sync {
    /// Returns every materialized alarm in this store, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReadStore` when the store cannot be read.
    async fn find_all(&self) -> Result<Vec<AlarmReadModel>, DomainError>;
}
