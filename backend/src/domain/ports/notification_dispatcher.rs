//! Port for handing notification intents to a delivery channel.

use crate::domain::NotificationIntent;

/// Fire-and-forget sink for notification intents.
///
/// Delivery failures are the adapter's concern; workflow results never depend
/// on them.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationDispatcher: Send + Sync {
    /// Hand over one intent.
    fn dispatch(&self, intent: &NotificationIntent);
}
