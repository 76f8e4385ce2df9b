//! Common test utilities for integration tests
//!
//! Builds a full [`AppState`] over an in-memory notification center and a
//! manual clock.

use chrono::{DateTime, TimeZone, Utc};
use health_tracker_app::{
    clock::ManualClock, config::AppConfig, notifications::InMemoryNotificationCenter,
    state::AppState,
};
use std::sync::Arc;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub center: InMemoryNotificationCenter,
    pub clock: ManualClock,
}

impl TestApp {
    /// App with sample data and default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let center = InMemoryNotificationCenter::new();
        let clock = ManualClock::new(start());
        let state = AppState::new(config, Arc::new(center.clone()), Arc::new(clock.clone()));
        Self {
            state,
            center,
            clock,
        }
    }

    /// Wait for queued notification calls to reach the center
    pub async fn flush(&self) {
        self.state
            .store()
            .scheduler()
            .flush()
            .await
            .expect("scheduler running");
    }
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 3, 9, 0, 0).unwrap()
}
