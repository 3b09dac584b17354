//! Booking API handlers.
//!
//! ```text
//! GET    /api/v1/bookings
//! POST   /api/v1/bookings                           {"date":"2026-03-10","time":"14:00",...}
//! PUT    /api/v1/bookings/{id}
//! DELETE /api/v1/bookings/{id}
//! POST   /api/v1/bookings/{id}/confirmation         (driver, admin)
//! POST   /api/v1/bookings/{id}/carpool-requests
//! ```
//!
//! Bookings are returned in their stored shape; they carry no secrets.

use std::convert::identity;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::domain::{Booking, BookingId, BookingRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::respond;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// All bookings ordered by trip date and time.
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Booking>>> {
    session.require_account(&state.accounts).await?;
    Ok(web::Json(state.bookings.list().await))
}

/// Create a booking owned by the signed-in account.
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_account(&state.accounts).await?;
    let outcome = state.bookings.create(&owner, payload.into_inner()).await?;
    Ok(respond(&state, StatusCode::CREATED, outcome, identity))
}

/// Replace a booking's trip details.
#[put("/bookings/{id}")]
pub async fn edit_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_account(&state.accounts).await?;
    let id = BookingId::from_uuid(path.into_inner());
    let outcome = state
        .bookings
        .edit(&id, &caller, payload.into_inner())
        .await?;
    Ok(respond(&state, StatusCode::OK, outcome, identity))
}

/// Cancel (delete) a booking.
#[delete("/bookings/{id}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_account(&state.accounts).await?;
    let id = BookingId::from_uuid(path.into_inner());
    let outcome = state.bookings.cancel(&id, &caller).await?;
    Ok(respond(&state, StatusCode::OK, outcome, identity))
}

/// Toggle a booking between pending and confirmed.
#[post("/bookings/{id}/confirmation")]
pub async fn toggle_confirmation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_account(&state.accounts).await?;
    let id = BookingId::from_uuid(path.into_inner());
    let outcome = state.bookings.toggle_confirmation(&id, &caller).await?;
    Ok(respond(&state, StatusCode::OK, outcome, identity))
}

/// Ask to share someone else's trip.
#[post("/bookings/{id}/carpool-requests")]
pub async fn request_carpool(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_account(&state.accounts).await?;
    let id = BookingId::from_uuid(path.into_inner());
    let outcome = state.bookings.request_carpool(&id, &requester).await?;
    Ok(respond(&state, StatusCode::CREATED, outcome, identity))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
