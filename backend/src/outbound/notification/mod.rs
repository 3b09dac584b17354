//! Notification dispatch adapters.
//!
//! No email transport is wired in: intents are emitted as structured log
//! events so operators (or a log shipper) can pick them up.

use tracing::info;

use crate::domain::NotificationIntent;
use crate::domain::ports::NotificationDispatcher;

/// Dispatcher that records each intent as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationDispatcher;

impl TracingNotificationDispatcher {
    /// Dispatcher logging under the `shuttle_pool::notifications` target.
    pub fn new() -> Self {
        Self
    }
}

impl NotificationDispatcher for TracingNotificationDispatcher {
    fn dispatch(&self, intent: &NotificationIntent) {
        let context = intent
            .context()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(
            target: "shuttle_pool::notifications",
            kind = %intent.kind(),
            recipient = intent.target(),
            context = %context,
            "notification intent dispatched"
        );
    }
}
