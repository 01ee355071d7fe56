//! `PostgreSQL` document read store: one schema-less JSONB document per
//! alarm, items embedded.

use async_trait::async_trait;
use klaxon_alarms::application::ports::{FindAlarmsRepository, UpsertMaterializedAlarmRepository};
use klaxon_alarms::domain::read_model::AlarmReadModel;
use klaxon_core::error::DomainError;
use sqlx::PgPool;
use sqlx::types::Json;

/// PostgreSQL-backed document read store.
///
/// Owns the `materialized_alarm_documents` table. Upsert replaces the whole
/// document in one statement, so embedding makes the replacement atomic
/// without an explicit transaction.
#[derive(Debug, Clone)]
pub struct PgDocumentAlarmRepository {
    pool: PgPool,
}

impl PgDocumentAlarmRepository {
    /// Creates a repository over the read database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_store(error: sqlx::Error) -> DomainError {
    DomainError::ReadStore(error.to_string())
}

#[async_trait]
impl UpsertMaterializedAlarmRepository for PgDocumentAlarmRepository {
    async fn upsert(&self, alarm: &AlarmReadModel) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO materialized_alarm_documents (id, doc) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        )
        .bind(alarm.id)
        .bind(Json(alarm))
        .execute(&self.pool)
        .await
        .map_err(read_store)?;
        Ok(())
    }
}

#[async_trait]
impl FindAlarmsRepository for PgDocumentAlarmRepository {
    async fn find_all(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        let rows: Vec<(Json<AlarmReadModel>,)> =
            sqlx::query_as("SELECT doc FROM materialized_alarm_documents")
                .fetch_all(&self.pool)
                .await
                .map_err(read_store)?;
        Ok(rows.into_iter().map(|(Json(model),)| model).collect())
    }
}
