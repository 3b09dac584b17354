//! Shuttle booking data model.
//!
//! A [`Booking`] records one shuttle trip together with a frozen copy of the
//! owner's identity ([`OwnerSnapshot`]) and the riders who asked to share it.
//! Raw client input arrives as a [`BookingRequest`] and becomes
//! [`TripDetails`] once validated.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, AccountId};
use super::pricing::Fare;

/// Accepted wire format for trip dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Canonical wire format for trip times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Stable booking identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Generate a new random [`BookingId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Whether the trip heads to or leaves from the airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    ToAirport,
    FromAirport,
}

impl Direction {
    /// Wire value of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToAirport => "to-airport",
            Self::FromAirport => "from-airport",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = BookingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "to-airport" => Ok(Self::ToAirport),
            "from-airport" => Ok(Self::FromAirport),
            _ => Err(BookingValidationError::InvalidMovementType),
        }
    }
}

/// Driver decision on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

impl BookingStatus {
    /// The status a confirmation toggle moves to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Confirmed,
            Self::Confirmed => Self::Pending,
        }
    }
}

/// Owner identity copied onto a booking when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSnapshot {
    #[serde(rename = "userId")]
    pub id: AccountId,
    #[serde(rename = "userName")]
    pub name: String,
    #[serde(rename = "userEmail")]
    pub email: String,
    pub organization: String,
}

impl From<&Account> for OwnerSnapshot {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_owned(),
            email: account.email().to_owned(),
            organization: account.organization().to_owned(),
        }
    }
}

/// A rider's request to share someone else's trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarpoolRequest {
    pub user_id: AccountId,
    pub user_name: String,
    pub user_email: String,
    pub requested_at: DateTime<Utc>,
}

impl CarpoolRequest {
    /// Stamp a new request from the requesting account.
    #[must_use]
    pub fn from_account(account: &Account, requested_at: DateTime<Utc>) -> Self {
        Self {
            user_id: account.id(),
            user_name: account.name().to_owned(),
            user_email: account.email().to_owned(),
            requested_at,
        }
    }
}

/// Unvalidated trip payload as supplied by a client.
///
/// Dates use `YYYY-MM-DD` and times `HH:MM` (24-hour clock). Times given
/// as `HH:MM:SS` are accepted and truncated to the minute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub movement_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default = "default_luggage")]
    pub luggage: u32,
    #[serde(default)]
    pub midpoint_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub carpool_open: bool,
}

const fn default_passengers() -> u32 {
    1
}

const fn default_luggage() -> u32 {
    1
}

/// Validation errors raised while turning a [`BookingRequest`] into
/// [`TripDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("date must not be empty")]
    EmptyDate,
    #[error("date must use the YYYY-MM-DD format")]
    InvalidDate,
    #[error("time must not be empty")]
    EmptyTime,
    #[error("time must use the HH:MM format")]
    InvalidTime,
    #[error("movement type must be to-airport or from-airport")]
    InvalidMovementType,
    #[error("address must not be empty")]
    EmptyAddress,
    #[error("at least one passenger is required")]
    NoPassengers,
    #[error("carpool is only available for single-passenger bookings")]
    CarpoolRequiresSinglePassenger,
}

impl BookingValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyDate | Self::InvalidDate => "date",
            Self::EmptyTime | Self::InvalidTime => "time",
            Self::InvalidMovementType => "movementType",
            Self::EmptyAddress => "address",
            Self::NoPassengers => "passengers",
            Self::CarpoolRequiresSinglePassenger => "carpoolOpen",
        }
    }

    /// Machine-readable reason attached to error details.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::EmptyDate => "empty_date",
            Self::InvalidDate => "invalid_date",
            Self::EmptyTime => "empty_time",
            Self::InvalidTime => "invalid_time",
            Self::InvalidMovementType => "invalid_movement_type",
            Self::EmptyAddress => "empty_address",
            Self::NoPassengers => "no_passengers",
            Self::CarpoolRequiresSinglePassenger => "carpool_requires_single_passenger",
        }
    }
}

/// Validated trip fields shared by creation and edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    date: NaiveDate,
    #[serde(with = "hh_mm")]
    time: NaiveTime,
    movement_type: Direction,
    address: String,
    passengers: u32,
    luggage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    midpoint_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    carpool_open: bool,
}

impl TripDetails {
    /// Trip date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Pickup or flight time on the trip date.
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Local date-time at which the trip is scheduled.
    #[must_use]
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Travel direction.
    #[must_use]
    pub fn movement_type(&self) -> Direction {
        self.movement_type
    }

    /// Pickup or drop-off address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Number of travellers.
    #[must_use]
    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    /// Number of luggage pieces.
    #[must_use]
    pub fn luggage(&self) -> u32 {
        self.luggage
    }

    /// Optional intermediate stop.
    #[must_use]
    pub fn midpoint_address(&self) -> Option<&str> {
        self.midpoint_address.as_deref()
    }

    /// Free-form notes for the driver.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Whether other riders may ask to share the trip.
    #[must_use]
    pub fn carpool_open(&self) -> bool {
        self.carpool_open
    }

    /// Reject carpool offers on trips carrying more than one passenger.
    ///
    /// Only checked when a booking is created; edits keep whatever the owner
    /// submits.
    pub fn ensure_carpool_eligible(&self) -> Result<(), BookingValidationError> {
        if self.carpool_open && self.passengers > 1 {
            return Err(BookingValidationError::CarpoolRequiresSinglePassenger);
        }
        Ok(())
    }
}

impl TryFrom<BookingRequest> for TripDetails {
    type Error = BookingValidationError;

    fn try_from(request: BookingRequest) -> Result<Self, Self::Error> {
        let BookingRequest {
            date,
            time,
            movement_type,
            address,
            passengers,
            luggage,
            midpoint_address,
            notes,
            carpool_open,
        } = request;

        let date = parse_date(&date)?;
        let time = parse_time(&time)?;
        let movement_type = movement_type.parse()?;
        if address.trim().is_empty() {
            return Err(BookingValidationError::EmptyAddress);
        }
        if passengers == 0 {
            return Err(BookingValidationError::NoPassengers);
        }

        Ok(Self {
            date,
            time,
            movement_type,
            address,
            passengers,
            luggage,
            midpoint_address: non_blank(midpoint_address),
            notes: non_blank(notes),
            carpool_open,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, BookingValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BookingValidationError::EmptyDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| BookingValidationError::InvalidDate)
}

fn parse_time(raw: &str) -> Result<NaiveTime, BookingValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BookingValidationError::EmptyTime);
    }
    parse_minute(raw).ok_or(BookingValidationError::InvalidTime)
}

/// Parse `HH:MM` or `HH:MM:SS`, dropping any seconds so the trip time is
/// identical in memory and in storage.
fn parse_minute(raw: &str) -> Option<NaiveTime> {
    let time = NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()?;
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// A shuttle trip held by the booking ledger.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `carpool_requests` holds at most one entry per account and never one
///   from the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    id: BookingId,
    #[serde(flatten)]
    owner: OwnerSnapshot,
    #[serde(flatten)]
    trip: TripDetails,
    cost: Fare,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    carpool_requests: Vec<CarpoolRequest>,
}

impl Booking {
    /// Open a new pending booking for `owner`.
    #[must_use]
    pub fn new(
        owner: OwnerSnapshot,
        trip: TripDetails,
        cost: Fare,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BookingId::random(),
            owner,
            trip,
            cost,
            status: BookingStatus::Pending,
            created_at,
            carpool_requests: Vec::new(),
        }
    }

    /// Stable booking identifier.
    #[must_use]
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Identity of the account that created the booking.
    #[must_use]
    pub fn owner(&self) -> &OwnerSnapshot {
        &self.owner
    }

    /// Whether `account` created this booking.
    #[must_use]
    pub fn is_owned_by(&self, account: &Account) -> bool {
        self.owner.id == account.id()
    }

    /// Current trip fields.
    #[must_use]
    pub fn trip(&self) -> &TripDetails {
        &self.trip
    }

    /// Fare charged for the trip.
    #[must_use]
    pub fn cost(&self) -> Fare {
        self.cost
    }

    /// Driver decision.
    #[must_use]
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Riders who asked to share the trip, oldest first.
    #[must_use]
    pub fn carpool_requests(&self) -> &[CarpoolRequest] {
        self.carpool_requests.as_slice()
    }

    /// Whether `account` already has a pending carpool request here.
    #[must_use]
    pub fn has_carpool_request_from(&self, account: &Account) -> bool {
        self.carpool_requests
            .iter()
            .any(|request| request.user_id == account.id())
    }

    pub(crate) fn replace_trip(&mut self, trip: TripDetails, cost: Fare) {
        self.trip = trip;
        self.cost = cost;
    }

    pub(crate) fn toggle_status(&mut self) -> BookingStatus {
        self.status = self.status.toggled();
        self.status
    }

    pub(crate) fn push_carpool_request(&mut self, request: CarpoolRequest) {
        self.carpool_requests.push(request);
    }
}

/// Serde adapter storing [`NaiveTime`] as `HH:MM`.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_minute(raw.trim())
            .ok_or_else(|| D::Error::custom(format!("invalid trip time {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn request() -> BookingRequest {
        BookingRequest {
            date: "2026-03-10".to_owned(),
            time: "14:00".to_owned(),
            movement_type: "to-airport".to_owned(),
            address: "1 Main St".to_owned(),
            passengers: 1,
            luggage: 2,
            midpoint_address: Some("  ".to_owned()),
            notes: None,
            carpool_open: true,
        }
    }

    #[rstest]
    fn valid_request_becomes_trip_details(request: BookingRequest) {
        let trip = TripDetails::try_from(request).expect("valid trip");
        assert_eq!(trip.movement_type(), Direction::ToAirport);
        assert_eq!(trip.time().format(TIME_FORMAT).to_string(), "14:00");
        assert!(trip.midpoint_address().is_none());
        assert!(trip.ensure_carpool_eligible().is_ok());
    }

    #[rstest]
    #[case(|r: &mut BookingRequest| r.date = String::new(), BookingValidationError::EmptyDate)]
    #[case(|r: &mut BookingRequest| r.date = "10/03/2026".to_owned(), BookingValidationError::InvalidDate)]
    #[case(|r: &mut BookingRequest| r.time = " ".to_owned(), BookingValidationError::EmptyTime)]
    #[case(|r: &mut BookingRequest| r.time = "25:00".to_owned(), BookingValidationError::InvalidTime)]
    #[case(|r: &mut BookingRequest| r.movement_type = "sideways".to_owned(), BookingValidationError::InvalidMovementType)]
    #[case(|r: &mut BookingRequest| r.address = "  ".to_owned(), BookingValidationError::EmptyAddress)]
    #[case(|r: &mut BookingRequest| r.passengers = 0, BookingValidationError::NoPassengers)]
    fn invalid_requests_are_rejected(
        request: BookingRequest,
        #[case] mutate: fn(&mut BookingRequest),
        #[case] expected: BookingValidationError,
    ) {
        let mut input = request;
        mutate(&mut input);
        assert_eq!(TripDetails::try_from(input), Err(expected));
    }

    #[rstest]
    fn seconds_are_truncated_to_the_minute(request: BookingRequest) {
        let mut input = request;
        input.time = "14:00:30".to_owned();
        let trip = TripDetails::try_from(input).expect("valid trip");
        assert_eq!(trip.time(), NaiveTime::from_hms_opt(14, 0, 0).expect("valid time"));

        let stored = serde_json::to_value(&trip).expect("serialise trip");
        let reloaded: TripDetails = serde_json::from_value(stored).expect("decode trip");
        assert_eq!(reloaded, trip);
    }

    #[rstest]
    fn carpool_needs_single_passenger(request: BookingRequest) {
        let mut input = request;
        input.passengers = 2;
        let trip = TripDetails::try_from(input).expect("valid trip");
        assert_eq!(
            trip.ensure_carpool_eligible(),
            Err(BookingValidationError::CarpoolRequiresSinglePassenger)
        );
    }

    #[rstest]
    fn request_defaults_fill_passengers_and_luggage() {
        let request: BookingRequest = serde_json::from_value(json!({
            "date": "2026-03-10",
            "time": "14:00",
            "movementType": "from-airport",
            "address": "Terminal 2",
        }))
        .expect("decode request");
        assert_eq!(request.passengers, 1);
        assert_eq!(request.luggage, 1);
        assert!(!request.carpool_open);
    }

    #[rstest]
    fn booking_serialises_to_flat_record(request: BookingRequest) {
        let owner = OwnerSnapshot {
            id: AccountId::random(),
            name: "Alice".to_owned(),
            email: "alice@x.com".to_owned(),
            organization: "Acme".to_owned(),
        };
        let trip = TripDetails::try_from(request).expect("valid trip");
        let booking = Booking::new(owner, trip, Fare::from_minor_units(5000), Utc::now());
        let value = serde_json::to_value(&booking).expect("serialise booking");

        assert_eq!(value.get("userName"), Some(&json!("Alice")));
        assert_eq!(value.get("movementType"), Some(&json!("to-airport")));
        assert_eq!(value.get("time"), Some(&json!("14:00")));
        assert_eq!(value.get("cost"), Some(&json!(5000)));
        assert_eq!(value.get("status"), Some(&json!("pending")));
        assert_eq!(value.get("carpoolRequests"), Some(&json!([])));

        let decoded: Booking = serde_json::from_value(value).expect("decode booking");
        assert_eq!(decoded, booking);
    }

    #[rstest]
    #[case(BookingStatus::Pending, BookingStatus::Confirmed)]
    #[case(BookingStatus::Confirmed, BookingStatus::Pending)]
    fn toggling_flips_status(#[case] from: BookingStatus, #[case] to: BookingStatus) {
        assert_eq!(from.toggled(), to);
    }
}
