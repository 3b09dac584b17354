//! Domain primitives, services and ports.
//!
//! Purpose: model the shuttle booking workflow independently of transport and
//! storage. Inbound adapters call the services; outbound adapters implement
//! the traits in [`ports`].
//!
//! Public surface:
//! - [`AccountDirectory`]: registration, sign-in and approvals.
//! - [`BookingLedger`]: trip lifecycle and carpool requests.
//! - [`ContactDesk`]: public inquiries.
//! - [`Error`] / [`ErrorCode`]: failure payload shared by every adapter.

pub mod account;
pub mod account_directory;
pub mod admission;
pub mod booking;
pub mod booking_ledger;
pub mod contact;
pub mod error;
pub mod notification;
pub mod ports;
pub mod pricing;
mod snapshot;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, AccountStatus, BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_ID,
    BOOTSTRAP_ADMIN_NAME, BOOTSTRAP_ADMIN_ORGANIZATION, BOOTSTRAP_ADMIN_PASSWORD,
    LoginCredentials, Password, Registration, RegistrationValidationError, Role,
};
pub use self::account_directory::AccountDirectory;
pub use self::admission::{LEAD_TIME_HOURS, is_within_lead_time};
pub use self::booking::{
    Booking, BookingId, BookingRequest, BookingStatus, BookingValidationError, CarpoolRequest,
    DATE_FORMAT, Direction, OwnerSnapshot, TIME_FORMAT, TripDetails,
};
pub use self::booking_ledger::BookingLedger;
pub use self::contact::{ContactDesk, ContactInquiry};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{NotificationIntent, NotificationKind, Notified};
pub use self::pricing::{DEFAULT_BASE_FARE, Fare, PricingRule};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use shuttle_pool::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
