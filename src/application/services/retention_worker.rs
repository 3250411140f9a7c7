use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::BlobStore;
use crate::domain::ObjectKey;

pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiredObject {
    pub bucket: String,
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Periodically deletes archived objects older than the retention window.
pub struct RetentionWorker {
    store: Arc<dyn BlobStore>,
    buckets: Vec<String>,
    interval: Duration,
    retention: TimeDelta,
}

impl RetentionWorker {
    /// A zero `interval` or `retention` falls back to the defaults.
    pub fn new(
        store: Arc<dyn BlobStore>,
        buckets: Vec<String>,
        interval: Duration,
        retention: Duration,
    ) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_CLEANUP_INTERVAL
        } else {
            interval
        };
        let retention = if retention.is_zero() {
            DEFAULT_RETENTION
        } else {
            retention
        };

        Self {
            store,
            buckets,
            interval,
            retention: TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Sweeps once immediately, then on every tick, until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            retention_secs = self.retention.num_seconds(),
            buckets = ?self.buckets,
            "Retention worker started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.sweep(Utc::now(), &cancel).await;
                }
            }
        }

        tracing::info!("Retention worker stopped");
    }

    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.retention)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Deletes every object last modified before `now - retention`.
    ///
    /// Listing or deletion failures are logged and counted; objects that
    /// could not be deleted stay for the next sweep. Once `cancel` fires no
    /// further deletions are issued.
    pub async fn sweep(&self, now: DateTime<Utc>, cancel: &CancellationToken) -> CleanupReport {
        let started = Instant::now();
        let cutoff = self.cutoff(now);
        let mut report = CleanupReport::default();

        tracing::info!(cutoff = %cutoff, "Starting cleanup");

        'buckets: for bucket in &self.buckets {
            let objects = match self.store.list(bucket).await {
                Ok(objects) => objects,
                Err(e) => {
                    tracing::error!(bucket = %bucket, error = %e, "Failed to list bucket");
                    continue;
                }
            };

            for object in objects.into_iter().filter(|o| o.last_modified < cutoff) {
                if cancel.is_cancelled() {
                    tracing::info!("Cleanup interrupted by shutdown");
                    break 'buckets;
                }

                let key = match ObjectKey::new(object.key) {
                    Ok(key) => key,
                    Err(e) => {
                        tracing::warn!(bucket = %bucket, error = %e, "Skipping unusable object key");
                        report.failed += 1;
                        continue;
                    }
                };
                match self.store.delete(bucket, &key).await {
                    Ok(()) => {
                        tracing::debug!(
                            bucket = %bucket,
                            key = %key,
                            last_modified = %object.last_modified,
                            "Deleted expired object"
                        );
                        report.deleted += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            bucket = %bucket,
                            key = %key,
                            last_modified = %object.last_modified,
                            error = %e,
                            "Failed to delete expired object"
                        );
                        report.failed += 1;
                    }
                }
            }
        }

        tracing::info!(
            total_deleted = report.deleted,
            total_failed = report.failed,
            duration_ms = started.elapsed().as_millis() as u64,
            "Cleanup completed"
        );

        report
    }

    /// Lists what a sweep at `now` would delete, without deleting anything.
    pub async fn expired_objects(&self, now: DateTime<Utc>) -> Vec<ExpiredObject> {
        let cutoff = self.cutoff(now);
        let mut expired = Vec::new();

        for bucket in &self.buckets {
            match self.store.list(bucket).await {
                Ok(objects) => expired.extend(
                    objects
                        .into_iter()
                        .filter(|o| o.last_modified < cutoff)
                        .map(|o| ExpiredObject {
                            bucket: bucket.clone(),
                            key: o.key,
                            size: o.size,
                            last_modified: o.last_modified,
                        }),
                ),
                Err(e) => {
                    tracing::error!(bucket = %bucket, error = %e, "Failed to list bucket");
                }
            }
        }

        expired
    }
}
