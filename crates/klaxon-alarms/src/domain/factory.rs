//! Factory constructing validated Alarm aggregates.

use chrono::{DateTime, Utc};
use klaxon_core::clock::Clock;
use klaxon_core::error::DomainError;
use uuid::Uuid;

use super::alarm::{Alarm, AlarmItem, AlarmSeverity};

/// Builds write-side aggregates from raw command input. No side effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlarmFactory;

impl AlarmFactory {
    /// Validates raw input and constructs an `Alarm`.
    ///
    /// Generates the identity, defaults `triggered_at` to the current time
    /// and `items` to the empty list; new alarms start unacknowledged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `name` is empty or `severity`
    /// is not one of the known levels.
    pub fn create(
        &self,
        name: &str,
        severity: &str,
        triggered_at: Option<DateTime<Utc>>,
        items: Vec<AlarmItem>,
        clock: &dyn Clock,
    ) -> Result<Alarm, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "alarm name must not be empty".to_owned(),
            ));
        }
        let severity: AlarmSeverity = severity.parse()?;

        Ok(Alarm {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            severity,
            triggered_at: triggered_at.unwrap_or_else(|| clock.now()),
            is_acknowledged: false,
            items,
        })
    }
}
