//! Health Tracker App Library
//!
//! Domain state, medication reminders and the runtime that ties them
//! together. Presentation code drives [`store::HealthStore`] and listens on
//! its [`events::EventBus`].

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod notifications;
pub mod state;
pub mod store;
