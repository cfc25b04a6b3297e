//! Daily archive sweep
//!
//! Runs the reset-past sweep once per local day, as soon as the configured
//! hour has been reached.

use std::time::Duration;

use chrono::{NaiveDate, Timelike};
use tokio::task::JoinHandle;

use crate::{error::AppResult, services::BookingService, state::AppState};

/// How often the scheduler looks at the clock
const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Background task that archives past reservations every day
pub struct ArchiveScheduler {
    state: AppState,
    hour: u32,
    last_run: Option<NaiveDate>,
}

impl ArchiveScheduler {
    pub fn new(state: AppState, hour: u32) -> Self {
        Self {
            state,
            hour,
            last_run: None,
        }
    }

    /// Run the sweep if it is due; returns how many reservations moved
    pub async fn tick(&mut self) -> AppResult<Option<usize>> {
        let now = self.state.clock().now();
        let today = now.date();

        if now.hour() < self.hour || self.last_run == Some(today) {
            return Ok(None);
        }

        let moved = BookingService::reset_past(self.state.store(), today).await?;
        self.last_run = Some(today);
        Ok(Some(moved))
    }

    /// Start checking in the background
    pub fn spawn(mut self) -> JoinHandle<()> {
        tracing::info!(hour = self.hour, "Automatic archive sweep enabled");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CHECK_INTERVAL);
            loop {
                interval.tick().await;
                if let Err(e) = self.tick().await {
                    tracing::error!(error = %e, "Automatic archive sweep failed");
                }
            }
        })
    }
}
