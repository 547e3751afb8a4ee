use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};

/// Periodically reclaims artifacts older than the retention window.
pub struct ArtifactJanitor {
    store: Arc<dyn ArtifactStore>,
    retention: Duration,
    interval: Duration,
}

impl ArtifactJanitor {
    pub fn new(store: Arc<dyn ArtifactStore>, retention: Duration, interval: Duration) -> Self {
        Self {
            store,
            retention,
            interval,
        }
    }

    pub async fn sweep_once(&self) -> Result<usize, ArtifactStoreError> {
        let retention =
            chrono::Duration::from_std(self.retention).unwrap_or_else(|_| chrono::Duration::days(365));
        let cutoff = Utc::now() - retention;
        self.store.purge_older_than(cutoff).await
    }

    pub async fn run(self) {
        tracing::info!(
            retention_secs = self.retention.as_secs(),
            interval_secs = self.interval.as_secs(),
            "Artifact janitor started"
        );

        let mut ticker = tokio::time::interval(self.interval.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.sweep_once().await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "Expired artifacts reclaimed"),
                Err(e) => tracing::warn!(error = %e, "Artifact sweep failed"),
            }
        }
    }
}
