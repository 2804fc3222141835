//! User-facing notifications
//!
//! Both add-in modules report progress and failures as [`Alert`]s through an
//! [`AlertSink`]. How an alert is shown (banner, toast, log line) belongs to
//! the front end; the add-ins only decide *what* to say and at which level.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique per alert so a front end can dismiss it individually
    pub id: String,
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            id: format!("alert-{}", uuid::Uuid::new_v4()),
            level,
            message: message.into(),
        }
    }
}

/// Receiver of user-facing notifications
pub trait AlertSink: Send + Sync {
    fn notify(&self, alert: Alert);

    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Alert::new(AlertLevel::Info, message));
    }

    fn success(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Alert::new(AlertLevel::Success, message));
    }

    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Alert::new(AlertLevel::Warning, message));
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Alert::new(AlertLevel::Error, message));
    }
}

impl<S: AlertSink> AlertSink for Arc<S> {
    fn notify(&self, alert: Alert) {
        (**self).notify(alert);
    }
}

/// Forwards alerts to `tracing` at the matching level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlerts;

impl AlertSink for TracingAlerts {
    fn notify(&self, alert: Alert) {
        match alert.level {
            AlertLevel::Info | AlertLevel::Success => {
                tracing::info!(alert_id = %alert.id, level = ?alert.level, "{}", alert.message)
            }
            AlertLevel::Warning => tracing::warn!(alert_id = %alert.id, "{}", alert.message),
            AlertLevel::Error => tracing::error!(alert_id = %alert.id, "{}", alert.message),
        }
    }
}

/// Keeps every alert in memory, in emission order
#[derive(Debug, Clone, Default)]
pub struct RecordingAlerts {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// All alerts received so far
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    /// Alerts of one level
    pub fn of_level(&self, level: AlertLevel) -> Vec<Alert> {
        self.alerts
            .lock()
            .iter()
            .filter(|a| a.level == level)
            .cloned()
            .collect()
    }

    /// Drain and return everything received so far
    pub fn take(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.alerts.lock())
    }
}

impl AlertSink for RecordingAlerts {
    fn notify(&self, alert: Alert) {
        self.alerts.lock().push(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order_and_levels() {
        let sink = RecordingAlerts::new();
        sink.info("Loading zones...");
        sink.error("Error loading zones: offline");
        sink.success("Successfully loaded 2 zones");

        let all = sink.alerts();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].message, "Loading zones...");
        assert_eq!(sink.of_level(AlertLevel::Error).len(), 1);

        assert_eq!(sink.take().len(), 3);
        assert!(sink.alerts().is_empty());
    }

    #[test]
    fn test_alert_ids_are_unique() {
        let a = Alert::new(AlertLevel::Info, "a");
        let b = Alert::new(AlertLevel::Info, "a");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("alert-"));
    }
}
