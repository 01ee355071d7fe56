//! Query handlers for the Alarms context.
//!
//! Queries never mutate state and never touch the write path; each handler
//! reads from exactly one designated read store.

use klaxon_core::error::DomainError;

use crate::application::ports::FindAlarmsRepository;
use crate::domain::read_model::AlarmReadModel;

/// Returns every alarm from the designated read store.
///
/// A pure pass-through today; filter/pagination parameters can be added
/// here without breaking existing callers.
///
/// # Errors
///
/// Returns `DomainError::ReadStore` when the store cannot be read.
pub async fn get_alarms(
    repository: &dyn FindAlarmsRepository,
) -> Result<Vec<AlarmReadModel>, DomainError> {
    repository.find_all().await
}
