//! Background task that periodically drops expired submissions.

use chrono::{Duration, Utc};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::store::SubmissionStore;

/// Handle to a running sweeper; dropping it without `shutdown` also stops the task
pub struct SweeperHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweep loop and wait for the task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "Submission sweeper ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the expiry sweep on the current tokio runtime
///
/// Every `period`, submissions older than `max_age` are removed from `store`.
pub fn spawn_sweeper(store: SubmissionStore, period: Duration, max_age: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    // interval() panics on a zero period
    let period = period
        .to_std()
        .ok()
        .filter(|period| !period.is_zero())
        .unwrap_or(std::time::Duration::from_secs(60));

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick
        ticker.tick().await;

        info!(period_secs = period.as_secs(), "Submission sweeper started");

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let removed = store.sweep_expired(Utc::now(), max_age).await;
                    if removed > 0 {
                        info!(removed, "Expired submissions removed");
                    } else {
                        debug!("No expired submissions");
                    }
                }
            }
        }

        info!("Submission sweeper stopped");
    });

    SweeperHandle { shutdown_tx, task }
}
