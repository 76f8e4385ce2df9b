//! End-to-end tests for medication reminders

mod common;

use chrono::{Duration, NaiveTime};
use common::TestApp;
use health_tracker_app::events::StoreEvent;
use health_tracker_app::notifications::{
    NotificationResponse, DEFAULT_ACTION, MARK_AS_TAKEN_ACTION, MEDICATION_REMINDER_CATEGORY,
};
use health_tracker_shared::{FoodRelation, Medication, TimeOfDay};

fn twice_daily() -> Medication {
    Medication::new(
        "Metformin",
        "500 mg",
        "Twice daily",
        vec![
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        ],
        TimeOfDay::Morning,
        FoodRelation::AfterFood,
    )
}

#[tokio::test]
async fn test_add_medication_then_mark_taken_from_notification() {
    let mut app = TestApp::new();
    let medication = twice_daily();
    let id = medication.id;

    app.state.store_mut().add_medication(medication);
    app.flush().await;

    let pending = app.center.pending();
    let identifiers: Vec<&str> = pending.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(identifiers, vec![format!("{id}_0"), format!("{id}_1")]);
    assert!(pending
        .iter()
        .all(|r| r.trigger.repeats && r.content.category_identifier == MEDICATION_REMINDER_CATEGORY));
    assert_eq!((pending[1].trigger.hour, pending[1].trigger.minute), (20, 30));

    // Reminder fires later in the day and the user presses "Mark as Taken"
    app.clock.advance(Duration::hours(11));
    let delivered_at = common::start() + Duration::hours(11);
    let mut events = app.state.store().subscribe();

    app.state
        .delegate()
        .did_receive(&NotificationResponse::new(format!("{id}_0"), MARK_AS_TAKEN_ACTION));
    assert_eq!(app.state.drain_responses(), 1);

    let taken = app.state.store().medication(id).unwrap();
    assert!(taken.is_taken);
    assert_eq!(taken.last_taken, Some(delivered_at));

    assert_eq!(events.try_recv().unwrap(), StoreEvent::MedicationsChanged);
    assert_eq!(events.try_recv().unwrap(), StoreEvent::OpenMedications { highlight: Some(id) });
    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::ShowTakenConfirmation { medication_id: id }
    );
}

#[tokio::test]
async fn test_tapping_malformed_notification_only_switches_tab() {
    let mut app = TestApp::new();
    let mut events = app.state.store().subscribe();
    let revision = app.state.store().revision();

    app.state
        .delegate()
        .did_receive(&NotificationResponse::new("legacy-reminder", DEFAULT_ACTION));
    app.state.drain_responses();

    assert_eq!(app.state.store().revision(), revision);
    assert_eq!(events.try_recv().unwrap(), StoreEvent::OpenMedications { highlight: None });
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_deleted_medication_keeps_reminders_by_default() {
    let mut app = TestApp::new();
    let medication = twice_daily();
    let id = medication.id;
    app.state.store_mut().add_medication(medication);
    app.state.store_mut().delete_medications(&[id]);
    app.flush().await;

    assert_eq!(app.center.pending().len(), 2);

    // A stale reminder still arrives; acting on it changes nothing
    app.state
        .delegate()
        .did_receive(&NotificationResponse::new(format!("{id}_1"), MARK_AS_TAKEN_ACTION));
    app.state.drain_responses();
    assert!(app.state.store().medication(id).is_none());
}

#[tokio::test]
async fn test_reminder_cancellation_can_be_enabled() {
    let mut config = health_tracker_app::config::AppConfig::default();
    config.notifications.cancel_reminders_on_delete = true;
    let mut app = TestApp::with_config(config);
    let medication = twice_daily();
    let id = medication.id;

    app.state.store_mut().add_medication(medication);
    app.state.store_mut().delete_medications(&[id]);
    app.flush().await;

    assert!(app.center.pending().is_empty());
}

#[tokio::test]
async fn test_next_day_foreground_resets_taken_flags() {
    let mut app = TestApp::new();
    let ids: Vec<_> = app.state.store().medications().iter().map(|m| m.id).collect();
    for id in &ids {
        app.state.store_mut().toggle_taken(*id);
    }
    assert!(app.state.store().medications().iter().all(|m| m.is_taken));

    app.clock.advance(Duration::days(1) + Duration::hours(20));
    app.state.on_foreground();

    let groups = app.state.store().grouped_medications();
    assert!(groups
        .iter()
        .flat_map(|g| &g.medications)
        .all(|m| !m.is_taken && m.last_taken.is_none()));
}
