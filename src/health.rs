//! Independent liveness loop behind the dashboard's health badge.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::admin_client::AdminApi;
use crate::view::{HealthBadge, SharedView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

pub struct HealthMonitor {
    api: Arc<dyn AdminApi>,
    view: SharedView,
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl HealthMonitor {
    pub fn new(api: Arc<dyn AdminApi>, view: SharedView, interval: Duration) -> Self {
        Self {
            api,
            view,
            interval,
            task: Mutex::new(None),
        }
    }

    /// Check once immediately, then every interval until stopped.
    /// Restarting cancels the previous loop first.
    pub fn start(&self) {
        let api = Arc::clone(&self.api);
        let view = self.view.clone();
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                check(api.as_ref(), &view).await;
            }
        });

        let previous = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Cancel the loop, freezing the last rendered state. Safe to call when idle.
    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
            info!("Health check stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Run a single check outside the loop.
    pub async fn check_now(&self) -> HealthState {
        check(self.api.as_ref(), &self.view).await
    }

    pub fn state(&self) -> Option<HealthState> {
        self.view.read(|view| view.health.as_ref().map(|badge| badge.state))
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
    }
}

async fn check(api: &dyn AdminApi, view: &SharedView) -> HealthState {
    let state = match api.health().await {
        Ok(()) => HealthState::Healthy,
        Err(err) => {
            warn!(error = %err, "Health check failed");
            HealthState::Unhealthy
        }
    };

    let previous = view.update(|view| {
        let previous = view.health.as_ref().map(|badge| badge.state);
        view.health = Some(HealthBadge::for_state(state));
        previous
    });
    if previous != Some(state) {
        info!(?state, "Health state changed");
    }
    state
}
