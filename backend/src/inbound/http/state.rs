//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::NotificationDispatcher;
use crate::domain::{AccountDirectory, BookingLedger, ContactDesk, NotificationIntent};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountDirectory>,
    pub bookings: Arc<BookingLedger>,
    pub contact: ContactDesk,
    pub notifications: Arc<dyn NotificationDispatcher>,
}

impl HttpState {
    /// Construct state from its services.
    pub fn new(
        accounts: Arc<AccountDirectory>,
        bookings: Arc<BookingLedger>,
        contact: ContactDesk,
        notifications: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            accounts,
            bookings,
            contact,
            notifications,
        }
    }

    /// Forward an intent to the configured dispatcher.
    pub fn notify(&self, intent: &NotificationIntent) {
        self.notifications.dispatch(intent);
    }
}
