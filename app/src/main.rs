//! Health Tracker
//!
//! Headless runtime for the health tracker core.
//!
//! ## Architecture
//!
//! - Store: profile, appointments, medications and daily summary
//! - Notifications: reminder scheduling and inbound reminder actions
//! - Events: change notifications for the presentation layer

use anyhow::Result;
use health_tracker_app::{
    clock::SystemClock, config, events::StoreEvent, notifications::LoggingNotificationCenter,
    state::AppState,
};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Health Tracker"
    );

    let state = AppState::new(config, Arc::new(LoggingNotificationCenter), Arc::new(SystemClock));

    let summary = serde_json::to_string(state.store().health_summary())?;
    debug!(%summary, "Loaded health summary");
    info!(
        bmi = %format!("{:.2}", state.store().calculate_bmi()),
        category = %state.store().bmi_category(),
        upcoming = state.store().upcoming_appointments().len(),
        "Profile loaded"
    );

    tokio::spawn(log_events(state.store().subscribe()));

    let store = state.run(shutdown_signal()).await;

    info!(revision = store.revision(), "Shutdown complete");
    Ok(())
}

/// Stand-in for the presentation layer: log every store event
async fn log_events(mut events: tokio::sync::broadcast::Receiver<StoreEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => info!(?event, "Store event"),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event listener lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "health_tracker_app=info,health_tracker=info".into()
        } else {
            "health_tracker_app=debug,health_tracker=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
