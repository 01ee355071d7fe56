//! `PostgreSQL` relational read store: parent view rows plus child item rows.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use klaxon_alarms::application::ports::{FindAlarmsRepository, UpsertMaterializedAlarmRepository};
use klaxon_alarms::domain::alarm::{AlarmItem, AlarmSeverity};
use klaxon_alarms::domain::read_model::AlarmReadModel;
use klaxon_core::error::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed relational read store.
///
/// Owns the `materialized_alarm_views` / `materialized_alarm_items` pair.
#[derive(Debug, Clone)]
pub struct PgMaterializedAlarmRepository {
    pool: PgPool,
}

impl PgMaterializedAlarmRepository {
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
impl UpsertMaterializedAlarmRepository for PgMaterializedAlarmRepository {
    /// Replaces the materialized alarm (delete child rows, upsert the
    /// parent, insert the new child rows) inside a single transaction, so a
    /// concurrent reader never observes a parent stripped of its items
    /// mid-sequence.
    async fn upsert(&self, alarm: &AlarmReadModel) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(read_store)?;

        sqlx::query("DELETE FROM materialized_alarm_items WHERE alarm_id = $1")
            .bind(alarm.id)
            .execute(&mut *tx)
            .await
            .map_err(read_store)?;

        sqlx::query(
            "INSERT INTO materialized_alarm_views (id, name, severity, triggered_at, is_acknowledged)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 severity = EXCLUDED.severity,
                 triggered_at = EXCLUDED.triggered_at,
                 is_acknowledged = EXCLUDED.is_acknowledged",
        )
        .bind(alarm.id)
        .bind(&alarm.name)
        .bind(alarm.severity.as_str())
        .bind(alarm.triggered_at)
        .bind(alarm.is_acknowledged)
        .execute(&mut *tx)
        .await
        .map_err(read_store)?;

        for item in &alarm.items {
            sqlx::query(
                "INSERT INTO materialized_alarm_items (id, name, type, alarm_id)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(&item.name)
            .bind(&item.kind)
            .bind(alarm.id)
            .execute(&mut *tx)
            .await
            .map_err(read_store)?;
        }

        tx.commit().await.map_err(read_store)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AlarmViewRow {
    id: Uuid,
    name: String,
    severity: String,
    triggered_at: DateTime<Utc>,
    is_acknowledged: bool,
    item_name: Option<String>,
    item_type: Option<String>,
}

#[async_trait]
impl FindAlarmsRepository for PgMaterializedAlarmRepository {
    async fn find_all(&self) -> Result<Vec<AlarmReadModel>, DomainError> {
        let rows: Vec<AlarmViewRow> = sqlx::query_as(
            "SELECT v.id, v.name, v.severity, v.triggered_at, v.is_acknowledged,
                    i.name AS item_name, i.type AS item_type
             FROM materialized_alarm_views v
             LEFT JOIN materialized_alarm_items i ON i.alarm_id = v.id
             ORDER BY v.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_store)?;

        // Fold the joined rows back into the flattened shape the document
        // store returns directly.
        let mut alarms: Vec<AlarmReadModel> = Vec::new();
        let mut index: HashMap<Uuid, usize> = HashMap::new();
        for row in rows {
            let position = match index.get(&row.id) {
                Some(position) => *position,
                None => {
                    let severity: AlarmSeverity = row.severity.parse().map_err(|error| {
                        DomainError::ReadStore(format!("invalid stored severity: {error}"))
                    })?;
                    alarms.push(AlarmReadModel {
                        id: row.id,
                        name: row.name.clone(),
                        severity,
                        triggered_at: row.triggered_at,
                        is_acknowledged: row.is_acknowledged,
                        items: Vec::new(),
                    });
                    index.insert(row.id, alarms.len() - 1);
                    alarms.len() - 1
                }
            };
            if let (Some(name), Some(kind)) = (row.item_name, row.item_type) {
                alarms[position].items.push(AlarmItem::new(name, kind));
            }
        }
        Ok(alarms)
    }
}
