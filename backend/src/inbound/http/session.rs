//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Only the authenticated account id is stored in the (encrypted) cookie.
//! Handlers resolve it back to an [`Account`] on each request so approvals,
//! rejections and role changes take effect immediately.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Account, AccountDirectory, AccountId, Error};

pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";

/// Signed-in identity carried by the session cookie.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `account_id`.
    ///
    /// The session key is rotated so a cookie issued before sign-in cannot be
    /// reused afterwards.
    pub fn persist_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCOUNT_ID_KEY, account_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Sign out.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Account id stored in the cookie. Unparseable values count as absent.
    pub fn account_id(&self) -> Result<Option<AccountId>, Error> {
        let raw = self
            .0
            .get::<String>(ACCOUNT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| {
            value
                .parse::<AccountId>()
                .inspect_err(|error| warn!(%error, "discarding malformed account id in session"))
                .ok()
        }))
    }

    /// Resolve the signed-in account, or fail with `unauthorized`.
    ///
    /// A cookie naming an account that has since been deleted counts as
    /// signed out.
    pub async fn require_account(&self, directory: &AccountDirectory) -> Result<Account, Error> {
        let Some(id) = self.account_id()? else {
            return Err(login_required());
        };
        directory.find(&id).await.ok_or_else(login_required)
    }
}

fn login_required() -> Error {
    Error::unauthorized("login required")
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { Ok(Self::new(session.await?)) })
    }
}
