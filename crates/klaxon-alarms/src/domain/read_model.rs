//! The denormalized alarm read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::alarm::{AlarmItem, AlarmSeverity, AlarmSnapshot};

/// Denormalized projection of an alarm.
///
/// Every read store materializes this one shape: the document store persists
/// it verbatim as a JSON document (hence the camelCase field names, which are
/// the persisted layout), the relational store flattens it into a parent row
/// plus child item rows and maps back on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmReadModel {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Severity level.
    pub severity: AlarmSeverity,
    /// When the alarm condition was observed.
    pub triggered_at: DateTime<Utc>,
    /// Acknowledgment flag.
    pub is_acknowledged: bool,
    /// Attached items, embedded.
    pub items: Vec<AlarmItem>,
}

impl From<&AlarmSnapshot> for AlarmReadModel {
    fn from(snapshot: &AlarmSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            severity: snapshot.severity,
            triggered_at: snapshot.triggered_at,
            is_acknowledged: snapshot.is_acknowledged,
            items: snapshot.items.clone(),
        }
    }
}
