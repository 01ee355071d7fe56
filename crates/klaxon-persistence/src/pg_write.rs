//! `PostgreSQL` implementation of the authoritative alarm write store.

use async_trait::async_trait;
use klaxon_alarms::application::ports::CreateAlarmRepository;
use klaxon_alarms::domain::alarm::Alarm;
use klaxon_core::error::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed write repository.
///
/// Exclusively owns the authoritative record; the parent row and its item
/// rows are written in one transaction, so a failed save leaves nothing
/// behind and no event is ever published for it.
#[derive(Debug, Clone)]
pub struct PgCreateAlarmRepository {
    pool: PgPool,
}

impl PgCreateAlarmRepository {
    /// Creates a repository over the write database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_store(error: sqlx::Error) -> DomainError {
    DomainError::WriteStore(error.to_string())
}

#[async_trait]
impl CreateAlarmRepository for PgCreateAlarmRepository {
    async fn save(&self, alarm: &Alarm) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(write_store)?;

        sqlx::query(
            "INSERT INTO alarms (id, name, severity, triggered_at, is_acknowledged)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(alarm.id)
        .bind(&alarm.name)
        .bind(alarm.severity.as_str())
        .bind(alarm.triggered_at)
        .bind(alarm.is_acknowledged)
        .execute(&mut *tx)
        .await
        .map_err(write_store)?;

        for item in &alarm.items {
            sqlx::query("INSERT INTO alarm_items (id, name, type, alarm_id) VALUES ($1, $2, $3, $4)")
                .bind(Uuid::new_v4())
                .bind(&item.name)
                .bind(&item.kind)
                .bind(alarm.id)
                .execute(&mut *tx)
                .await
                .map_err(write_store)?;
        }

        tx.commit().await.map_err(write_store)
    }
}
