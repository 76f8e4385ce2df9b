//! Store change events
//!
//! Every successful mutation on the store publishes one [`StoreEvent`].
//! Presentation code subscribes and re-reads whatever views it shows.
//! Publishing never blocks: with no subscribers the event is dropped, and a
//! slow subscriber sees `RecvError::Lagged` instead of stalling the store.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// A change to domain state, or a navigation request for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    ProfileUpdated,
    AppointmentsChanged,
    MedicationsChanged,
    HealthSummaryUpdated,
    /// All medications were reset for a new day
    DailyReset,
    /// Switch to the medications tab, optionally highlighting one entry
    OpenMedications { highlight: Option<Uuid> },
    /// Confirm that a reminder's "mark as taken" action was applied
    ShowTakenConfirmation { medication_id: Uuid },
}

/// Broadcast side of the store's event stream
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: StoreEvent) {
        trace!(?event, "Publishing store event");
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
