//! Scheduled health sweep.
//!
//! A background input port in the same sense as the HTTP routes: it consumes
//! only the query path (`AlarmService::list`) and holds no domain logic.

use std::sync::Arc;
use std::time::Duration;

use klaxon_alarms::application::service::AlarmService;
use tokio::task::JoinHandle;

/// Spawns the periodic sweep; the task runs until the process exits.
///
/// Each tick counts the currently materialized alarms and reports through
/// the logs. A failing read store downgrades the tick to a warning.
pub fn spawn_health_sweep(service: Arc<AlarmService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick of `interval` fires immediately; skip it so startup
        // stays quiet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match service.list().await {
                Ok(alarms) => tracing::info!(count = alarms.len(), "alarm health sweep"),
                Err(error) => tracing::warn!(%error, "alarm health sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use klaxon_test_support::FixedClock;

    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_sweep_keeps_running_over_an_empty_store() {
        let state = AppState::in_memory(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        )));

        let handle = spawn_health_sweep(state.service.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(!handle.is_finished());
        handle.abort();
    }
}
