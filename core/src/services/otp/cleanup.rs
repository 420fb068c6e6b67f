//! Background cleanup of expired OTP records.
//!
//! Correctness never depends on this task because `find_active` already
//! ignores expired rows; the reaper only keeps the table from growing.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::otp::OtpRepository;

/// Configuration for the OTP cleanup task
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 600, // Run every 10 minutes, matching the code TTL
            enabled: true,
        }
    }
}

/// Service for reaping expired OTP records
pub struct OtpCleanupService<O: OtpRepository + 'static> {
    repository: Arc<O>,
    config: OtpCleanupConfig,
}

impl<O: OtpRepository> OtpCleanupService<O> {
    /// Create a new cleanup service
    pub fn new(repository: Arc<O>, config: OtpCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle, returning how many records were deleted
    pub async fn run_cleanup(&self) -> Result<u64, DomainError> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.repository.delete_expired().await?;
        if deleted > 0 {
            info!("Deleted {} expired OTP records", deleted);
        }
        Ok(deleted)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("OTP cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "OTP cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("OTP cleanup cycle failed: {}", e);
                }
            }
        });
    }
}
