//! Response envelope for state-changing endpoints.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::domain::{NotificationIntent, Notified};
use crate::inbound::http::state::HttpState;

/// `{ "data": ..., "notification": ... }`
#[derive(Debug, Serialize)]
pub struct NotifiedResponse<T> {
    pub data: T,
    pub notification: NotificationIntent,
}

/// Dispatch the outcome's intent and render it with `status`.
///
/// `view` maps the domain value into its wire representation.
pub fn respond<T, V, F>(
    state: &HttpState,
    status: StatusCode,
    outcome: Notified<T>,
    view: F,
) -> HttpResponse
where
    V: Serialize,
    F: FnOnce(T) -> V,
{
    let Notified {
        value,
        notification,
    } = outcome;
    state.notify(&notification);
    HttpResponse::build(status).json(NotifiedResponse {
        data: view(value),
        notification,
    })
}
