//! Shared-ride airport shuttle booking service.
//!
//! Riders register and wait for approval, book trips to or from the airport
//! at least 72 hours ahead, and can ask to share each other's trips. Drivers
//! confirm trips; administrators approve accounts and manage every booking.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

pub use middleware::Trace;
