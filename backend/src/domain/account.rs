//! Account data model.
//!
//! Accounts are owned exclusively by the account directory. Other components
//! copy the fields they need (see [`crate::domain::OwnerSnapshot`]) instead of
//! holding references, so later account edits never rewrite booking history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Identifier of the account seeded on first start.
pub const BOOTSTRAP_ADMIN_ID: &str = "00000000-0000-4000-8000-000000000001";
/// Login email of the seeded administrator.
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@airportjointmobility.com";
/// Password of the seeded administrator.
pub const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";
/// Display name of the seeded administrator.
pub const BOOTSTRAP_ADMIN_NAME: &str = "Platform Administrator";
/// Organization of the seeded administrator.
pub const BOOTSTRAP_ADMIN_ORGANIZATION: &str = "Airport Joint Mobility";

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random [`AccountId`].
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

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Role granted to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Shuttle driver; confirms trips but never books them.
    Driver,
    /// Regular rider.
    User,
}

impl Role {
    /// Whether the role may create bookings and request carpools.
    #[must_use]
    pub const fn can_book(self) -> bool {
        !matches!(self, Self::Driver)
    }

    /// Whether the role may toggle a booking's confirmation.
    #[must_use]
    pub const fn can_confirm_trips(self) -> bool {
        matches!(self, Self::Driver | Self::Admin)
    }

    /// Whether the role administers accounts and every booking.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Approval status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registered and awaiting an administrator decision.
    Pending,
    /// Allowed to sign in.
    Approved,
}

/// Opaque account secret compared by exact match.
///
/// The buffer is zeroed on drop. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a raw secret.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Exact, case-sensitive comparison against a candidate secret.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_str() == candidate
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.0.as_str().to_owned()
    }
}

/// Registered platform account.
///
/// ## Invariants
/// - `email` is unique across the directory (enforced by the directory).
/// - `role == Admin` implies `status == Approved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: AccountId,
    email: String,
    password: Password,
    name: String,
    organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    role: Role,
    status: AccountStatus,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Build a freshly self-registered account in `pending` status.
    #[must_use]
    pub fn register(registration: Registration, created_at: DateTime<Utc>) -> Self {
        let Registration {
            name,
            email,
            password,
            organization,
            phone,
        } = registration;
        Self {
            id: AccountId::random(),
            email,
            password: Password::new(password.as_str()),
            name,
            organization,
            phone: phone.filter(|value| !value.trim().is_empty()),
            role: Role::User,
            status: AccountStatus::Pending,
            created_at,
        }
    }

    /// Build the well-known administrator seeded into an empty directory.
    #[must_use]
    pub fn bootstrap_admin(created_at: DateTime<Utc>) -> Self {
        let id = BOOTSTRAP_ADMIN_ID
            .parse()
            .unwrap_or_else(|_| AccountId::random());
        Self {
            id,
            email: BOOTSTRAP_ADMIN_EMAIL.to_owned(),
            password: Password::new(BOOTSTRAP_ADMIN_PASSWORD),
            name: BOOTSTRAP_ADMIN_NAME.to_owned(),
            organization: BOOTSTRAP_ADMIN_ORGANIZATION.to_owned(),
            phone: None,
            role: Role::Admin,
            status: AccountStatus::Approved,
            created_at,
        }
    }

    /// Approved account with an explicit role, for seeding test directories.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn provisioned(
        registration: Registration,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut account = Self::register(registration, created_at);
        account.role = role;
        account.status = AccountStatus::Approved;
        account
    }

    /// Stable account identifier.
    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Login email, case-sensitive as entered.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Organization the account belongs to.
    #[must_use]
    pub fn organization(&self) -> &str {
        self.organization.as_str()
    }

    /// Optional phone number.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Granted role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Approval status.
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Registration timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the supplied credentials match exactly.
    #[must_use]
    pub fn credentials_match(&self, credentials: &LoginCredentials) -> bool {
        self.email == credentials.email() && self.password.matches(credentials.password())
    }

    pub(crate) fn approve(&mut self) {
        self.status = AccountStatus::Approved;
    }
}

/// Self-registration payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub organization: String,
    pub phone: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("organization", &self.organization)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Validation errors returned by [`Registration::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("organization must not be empty")]
    EmptyOrganization,
}

impl RegistrationValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
            Self::EmptyOrganization => "organization",
        }
    }
}

impl Registration {
    /// Check that every required field carries a value.
    pub fn validate(&self) -> Result<(), RegistrationValidationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if self.organization.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyOrganization);
        }
        Ok(())
    }
}

/// Email and password presented at sign-in.
///
/// Neither value is trimmed or case-folded: matching is exact.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Email used for the directory lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
