//! HTTP inbound adapter exposing the booking workflow as a JSON API.

pub mod accounts;
pub mod bookings;
pub mod contact;
pub mod envelope;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::{ApiResult, json_config};

/// Register every `/api/v1` handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use shuttle_pool::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::current_account)
        .service(accounts::pending_accounts)
        .service(accounts::approve_account)
        .service(accounts::reject_account)
        .service(bookings::list_bookings)
        .service(bookings::create_booking)
        .service(bookings::edit_booking)
        .service(bookings::cancel_booking)
        .service(bookings::toggle_confirmation)
        .service(bookings::request_carpool)
        .service(contact::submit_inquiry);
}
