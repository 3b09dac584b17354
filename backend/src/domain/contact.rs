//! Contact desk: validates public inquiries and acknowledges them with a
//! notification intent addressed to the sender. Inquiries are not stored.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, NotificationIntent, NotificationKind};

/// Message submitted through the public contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactInquiry {
    fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Stateless service turning inquiries into acknowledgement intents.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactDesk;

impl ContactDesk {
    /// Validate an inquiry and build the intent acknowledging it.
    pub fn submit(&self, inquiry: ContactInquiry) -> Result<NotificationIntent, Error> {
        if let Some(field) = inquiry.first_missing_field() {
            return Err(
                Error::invalid_request(format!("{field} must not be empty")).with_details(json!({
                    "field": field,
                    "code": format!("empty_{field}"),
                })),
            );
        }

        info!(subject = %inquiry.subject, "contact inquiry received");
        let ContactInquiry {
            name,
            email,
            subject,
            message,
        } = inquiry;
        Ok(
            NotificationIntent::new(NotificationKind::ContactReceived, email).with_context(json!({
                "name": name,
                "subject": subject,
                "message": message,
            })),
        )
    }
}
