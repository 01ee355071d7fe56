//! The Alarm aggregate and its value objects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use klaxon_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity scale for an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmSeverity {
    /// Informational condition.
    Low,
    /// Degraded but operating.
    Medium,
    /// Requires attention soon.
    High,
    /// Requires immediate attention.
    Critical,
}

impl AlarmSeverity {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlarmSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmSeverity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(DomainError::Validation(format!(
                "unrecognized severity: {other}"
            ))),
        }
    }
}

/// A measurement or resource attached to an alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmItem {
    /// Item name, e.g. `cpu0`.
    pub name: String,
    /// Item type, e.g. `core`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl AlarmItem {
    /// Creates an item.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// The aggregate root for an alarm.
///
/// `id` is unique and immutable once assigned. There is no update command in
/// current scope; all read-side state is driven by the creation event.
#[derive(Debug, Clone)]
pub struct Alarm {
    /// Aggregate identifier, generated at creation.
    pub id: Uuid,
    /// Non-empty display name.
    pub name: String,
    /// Severity level.
    pub severity: AlarmSeverity,
    /// When the alarm condition was observed.
    pub triggered_at: DateTime<Utc>,
    /// Whether an operator has acknowledged the alarm. False at creation.
    pub is_acknowledged: bool,
    /// Items attached to the alarm, possibly empty.
    pub items: Vec<AlarmItem>,
}

/// Serializable flattening of the aggregate, returned by the create
/// operation and carried in full by the creation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmSnapshot {
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
    /// Attached items.
    pub items: Vec<AlarmItem>,
}

impl From<&Alarm> for AlarmSnapshot {
    fn from(alarm: &Alarm) -> Self {
        Self {
            id: alarm.id,
            name: alarm.name.clone(),
            severity: alarm.severity,
            triggered_at: alarm.triggered_at,
            is_acknowledged: alarm.is_acknowledged,
            items: alarm.items.clone(),
        }
    }
}
