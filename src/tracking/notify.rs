//! Notification capability. Delivery is the notifier's concern; the core
//! logs a failed delivery and moves on without retrying.

use std::sync::Mutex;

use crate::models::Alert;

#[derive(Debug, thiserror::Error)]
#[error("Alert delivery failed: {0}")]
pub struct NotifyError(pub String);

pub trait Notifier: Send + Sync {
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError>;
}

/// Writes alerts to the log. Default for hosts without a push channel.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        tracing::warn!(
            case_id = %alert.case_id,
            urgency = alert.urgency.as_str(),
            message = %alert.message,
            "Emergency alert"
        );
        Ok(())
    }
}

/// Keeps every alert in memory. Useful for hosts that poll and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Alert> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .map_err(|_| NotifyError("lock poisoned".into()))?
            .push(alert.clone());
        Ok(())
    }
}
