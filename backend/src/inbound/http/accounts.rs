//! Account API handlers.
//!
//! ```text
//! POST /api/v1/accounts                {"name":..,"email":..,"password":..,"organization":..}
//! POST /api/v1/login                   {"email":"admin@airportjointmobility.com","password":"admin123"}
//! POST /api/v1/logout
//! GET  /api/v1/accounts/me
//! GET  /api/v1/accounts/pending        (admin)
//! POST /api/v1/accounts/{id}/approve   (admin)
//! POST /api/v1/accounts/{id}/reject    (admin)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{
    Account, AccountId, AccountStatus, Error, LoginCredentials, Registration, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::respond;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/v1/accounts`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(value: RegisterRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: Zeroizing::new(value.password),
            organization: value.organization,
            phone: value.phone,
        }
    }
}

/// Login body for `POST /api/v1/login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Account as exposed over HTTP; the password never leaves the server.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub organization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            email: account.email().to_owned(),
            name: account.name().to_owned(),
            organization: account.organization().to_owned(),
            phone: account.phone().map(str::to_owned),
            role: account.role(),
            status: account.status(),
            created_at: account.created_at(),
        }
    }
}

async fn require_admin(session: &SessionContext, state: &HttpState) -> ApiResult<Account> {
    let caller = session.require_account(&state.accounts).await?;
    if !caller.role().is_admin() {
        return Err(Error::forbidden("administrator access required"));
    }
    Ok(caller)
}

/// Submit a self-registration; the account starts pending.
#[post("/accounts")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .accounts
        .register(payload.into_inner().into())
        .await?;
    Ok(respond(&state, StatusCode::CREATED, outcome, AccountView::from))
}

/// Authenticate and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountView>> {
    let LoginRequest { email, password } = payload.into_inner();
    let account = state
        .accounts
        .authenticate(&LoginCredentials::new(email, password))
        .await?;
    session.persist_account(&account.id())?;
    Ok(web::Json(account.into()))
}

/// End the current session.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The signed-in account.
#[get("/accounts/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountView>> {
    let account = session.require_account(&state.accounts).await?;
    Ok(web::Json(account.into()))
}

/// Accounts awaiting approval.
#[get("/accounts/pending")]
pub async fn pending_accounts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AccountView>>> {
    require_admin(&session, &state).await?;
    let pending = state.accounts.pending_accounts().await;
    Ok(web::Json(pending.into_iter().map(Into::into).collect()))
}

/// Approve a pending account.
#[post("/accounts/{id}/approve")]
pub async fn approve_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    require_admin(&session, &state).await?;
    let id = AccountId::from_uuid(path.into_inner());
    let outcome = state.accounts.approve(&id).await?;
    Ok(respond(&state, StatusCode::OK, outcome, AccountView::from))
}

/// Reject and delete a pending account.
#[post("/accounts/{id}/reject")]
pub async fn reject_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    require_admin(&session, &state).await?;
    let id = AccountId::from_uuid(path.into_inner());
    let outcome = state.accounts.reject(&id).await?;
    Ok(respond(&state, StatusCode::OK, outcome, AccountView::from))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
