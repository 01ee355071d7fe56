//! Commands for the Alarms context.

use chrono::{DateTime, Utc};
use klaxon_core::command::Command;
use uuid::Uuid;

use super::alarm::AlarmItem;

/// Command to create a new alarm.
#[derive(Debug, Clone)]
pub struct CreateAlarm {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The alarm's display name.
    pub name: String,
    /// Requested severity level, validated by the factory.
    pub severity: String,
    /// When the alarm condition was observed; defaults to now when absent.
    pub triggered_at: Option<DateTime<Utc>>,
    /// Items attached to the alarm.
    pub items: Vec<AlarmItem>,
}

impl Command for CreateAlarm {
    fn command_type(&self) -> &'static str {
        "alarms.create_alarm"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
