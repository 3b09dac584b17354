//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod notification_dispatcher;
mod snapshot_store;

#[cfg(test)]
pub use notification_dispatcher::MockNotificationDispatcher;
pub use notification_dispatcher::NotificationDispatcher;
#[cfg(test)]
pub use snapshot_store::MockSnapshotStore;
pub use snapshot_store::{ACCOUNTS_KEY, BOOKINGS_KEY, SnapshotStore, SnapshotStoreError};
