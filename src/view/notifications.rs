use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::format::escape_html;
use super::state::{Notification, Severity, SharedView};

/// Transient message surface. Each notification expires on its own timer.
#[derive(Clone)]
pub struct NotificationCenter {
    view: SharedView,
    lifetime: Duration,
    next_id: Arc<AtomicU64>,
}

impl NotificationCenter {
    pub fn new(view: SharedView, lifetime: Duration) -> Self {
        Self {
            view,
            lifetime,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Insert a notification above all existing ones and schedule its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, message: impl AsRef<str>, severity: Severity) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let expires_at = Instant::now() + self.lifetime;
        let notification = Notification {
            id,
            message: escape_html(message.as_ref()),
            severity,
            created_at: Utc::now(),
        };
        self.view
            .update(|view| view.notifications.insert(0, notification));

        let view = self.view.clone();
        tokio::spawn(async move {
            sleep_until(expires_at).await;
            view.update(|view| view.notifications.retain(|n| n.id != id));
            debug!(id, "Notification expired");
        });
        id
    }

    pub fn info(&self, message: impl AsRef<str>) -> u64 {
        self.notify(message, Severity::Info)
    }

    pub fn success(&self, message: impl AsRef<str>) -> u64 {
        self.notify(message, Severity::Success)
    }

    pub fn error(&self, message: impl AsRef<str>) -> u64 {
        self.notify(message, Severity::Error)
    }
}
