//! Headless control surface for the guard bot's admin service.
//!
//! Polls statistics, channels, administrators and keywords into a shared
//! [`view::ViewState`], runs an independent health check, and routes
//! confirmation-gated commands back to the service.

pub mod actions;
pub mod admin_client;
pub mod config;
pub mod console;
pub mod health;
pub mod sync;
pub mod types;
pub mod view;

pub use actions::{ActionDispatcher, Command, Confirm, DispatchOutcome};
pub use admin_client::{AdminApi, AdminClient};
pub use config::Config;
pub use health::{HealthMonitor, HealthState};
pub use sync::{CycleReport, DataSyncController};
pub use types::PanelError;
pub use view::{NotificationCenter, SharedView, ViewState};
