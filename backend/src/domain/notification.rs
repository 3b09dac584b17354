//! Notification intents.
//!
//! Every state-changing workflow step yields a [`NotificationIntent`]
//! describing who should hear about it. The domain never delivers anything:
//! inbound adapters forward intents to a
//! [`crate::domain::ports::NotificationDispatcher`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category of a notification intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    RegistrationSubmitted,
    AccountApproved,
    AccountRejected,
    BookingCreated,
    BookingUpdate,
    BookingConfirmedUpdate,
    Confirmed,
    Rejected,
    BookingCancelled,
    CarpoolRequested,
    ContactReceived,
}

impl NotificationKind {
    /// Wire value of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegistrationSubmitted => "registration-submitted",
            Self::AccountApproved => "account-approved",
            Self::AccountRejected => "account-rejected",
            Self::BookingCreated => "booking-created",
            Self::BookingUpdate => "booking-update",
            Self::BookingConfirmedUpdate => "booking-confirmed-update",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::BookingCancelled => "booking-cancelled",
            Self::CarpoolRequested => "carpool-requested",
            Self::ContactReceived => "contact-received",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to tell `target` (an email address) about a workflow event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIntent {
    kind: NotificationKind,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<Value>,
}

impl NotificationIntent {
    /// Intent without extra context.
    pub fn new(kind: NotificationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            context: None,
        }
    }

    /// Attach structured context, such as the requesting rider.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Event category.
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Recipient email address.
    #[must_use]
    pub fn target(&self) -> &str {
        self.target.as_str()
    }

    /// Structured context, if any was attached.
    #[must_use]
    pub fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }
}

/// Outcome of a successful workflow step paired with its intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Notified<T> {
    pub value: T,
    pub notification: NotificationIntent,
}

impl<T> Notified<T> {
    /// Pair `value` with the intent it raised.
    pub fn new(value: T, notification: NotificationIntent) -> Self {
        Self {
            value,
            notification,
        }
    }
}
