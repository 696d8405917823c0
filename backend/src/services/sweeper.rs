use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::occupancy::OccupancyService;

/// Spawns the periodic expiry sweep. A store error is logged and the loop
/// retries on the next tick; the task never brings the process down.
pub fn spawn(service: OccupancyService, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so startup does not
        // race the migration-fresh pool.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match service.sweep().await {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "Expired stale session(s)"),
                Err(err) => {
                    tracing::warn!(error = ?err, "Expiry sweep failed, retrying next tick")
                }
            }
        }
    })
}
