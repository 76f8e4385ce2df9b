//! Application state and run loop
//!
//! [`AppState`] wires the store to its collaborators once at startup and
//! then owns it. Other parts of the app reach the store only through the
//! notification delegate's channel and the store's event bus.

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::events::EventBus;
use crate::notifications::{NotificationCenter, NotificationDelegate, ReminderResponse, ReminderScheduler};
use crate::store::{HealthStore, StoreData};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct AppState {
    config: Arc<AppConfig>,
    store: HealthStore,
    delegate: NotificationDelegate,
    responses: mpsc::UnboundedReceiver<ReminderResponse>,
    dispatcher: JoinHandle<()>,
}

impl AppState {
    /// Build the store and start the reminder dispatcher
    ///
    /// Declares the reminder category and, if configured, asks for
    /// notification permission. Must be called inside a tokio runtime.
    pub fn new(config: AppConfig, center: Arc<dyn NotificationCenter>, clock: Arc<dyn Clock>) -> Self {
        let (scheduler, dispatcher) = ReminderScheduler::spawn(center, config.notifications.enabled);
        scheduler.register_action_category();
        if config.notifications.request_permission_on_launch {
            scheduler.request_permission();
        }

        let now = clock.now();
        let data = if config.seed.load_sample_data {
            StoreData::sample(now)
        } else {
            StoreData::empty(now)
        };
        let events = EventBus::new(config.events.channel_capacity);
        let store = HealthStore::new(data, scheduler, clock, events)
            .with_reminder_cancellation(config.notifications.cancel_reminders_on_delete);
        let (delegate, responses) = NotificationDelegate::channel();

        info!(
            appointments = store.appointments().len(),
            medications = store.medications().len(),
            "Health store ready"
        );

        Self {
            config: Arc::new(config),
            store,
            delegate,
            responses,
            dispatcher,
        }
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &HealthStore {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut HealthStore {
        &mut self.store
    }

    /// Delegate to hand to the platform notification service
    pub fn delegate(&self) -> NotificationDelegate {
        self.delegate.clone()
    }

    /// The app came to the foreground
    pub fn on_foreground(&mut self) {
        if self.config.daily_reset.enabled {
            self.store.reset_daily_if_new_day();
        }
    }

    /// Apply every reminder response already waiting; returns how many
    pub fn drain_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(response) = self.responses.try_recv() {
            self.store.apply_reminder_response(response);
            applied += 1;
        }
        applied
    }

    /// Serve reminder responses and day-change checks until `shutdown` resolves
    ///
    /// Returns the store so callers can inspect the final state.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> HealthStore {
        tokio::pin!(shutdown);
        let reset_enabled = self.config.daily_reset.enabled;
        let mut day_check = tokio::time::interval(self.config.daily_reset.check_interval());

        loop {
            tokio::select! {
                Some(response) = self.responses.recv() => {
                    self.store.apply_reminder_response(response);
                }
                _ = day_check.tick(), if reset_enabled => {
                    self.store.reset_daily_if_new_day();
                }
                _ = &mut shutdown => {
                    debug!("Run loop received shutdown");
                    break;
                }
            }
        }

        if let Err(e) = self.store.scheduler().flush().await {
            warn!(error = %e, "Pending notification commands were not delivered");
        }
        self.dispatcher.abort();
        self.store
    }
}
