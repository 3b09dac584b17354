//! Account directory service.
//!
//! Owns the account collection: self-registration, sign-in, and the
//! administrator approval queue. Every mutation is persisted through the
//! [`SnapshotStore`] before it becomes visible; a failed write leaves the
//! directory untouched.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{ACCOUNTS_KEY, SnapshotStore};
use crate::domain::snapshot::{load_collection, persist_collection};
use crate::domain::{
    Account, AccountId, AccountStatus, Error, LoginCredentials, NotificationIntent,
    NotificationKind, Notified, Registration,
};

/// Registry of platform accounts.
pub struct AccountDirectory {
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    accounts: Mutex<Vec<Account>>,
}

impl AccountDirectory {
    /// Load the stored accounts, seeding the bootstrap administrator when no
    /// account collection has been stored yet.
    pub async fn bootstrap(
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let stored: Option<Vec<Account>> = load_collection(store.as_ref(), ACCOUNTS_KEY).await?;
        let accounts = match stored {
            Some(accounts) => {
                info!(count = accounts.len(), "loaded accounts");
                accounts
            }
            None => {
                let seeded = vec![Account::bootstrap_admin(clock.utc())];
                persist_collection(store.as_ref(), ACCOUNTS_KEY, &seeded).await?;
                info!("seeded bootstrap administrator");
                seeded
            }
        };

        Ok(Self {
            store,
            clock,
            accounts: Mutex::new(accounts),
        })
    }

    /// Register a new account awaiting administrator approval.
    pub async fn register(&self, registration: Registration) -> Result<Notified<Account>, Error> {
        registration.validate().map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": err.field(),
                "code": format!("empty_{}", err.field()),
            }))
        })?;

        let mut accounts = self.accounts.lock().await;
        if accounts
            .iter()
            .any(|account| account.email() == registration.email)
        {
            return Err(Error::duplicate_email(format!(
                "an account already exists for {}",
                registration.email
            )));
        }

        let account = Account::register(registration, self.clock.utc());
        let mut next = accounts.clone();
        next.push(account.clone());
        self.commit(&mut accounts, next).await?;

        info!(account_id = %account.id(), "account registered");
        let intent = NotificationIntent::new(NotificationKind::RegistrationSubmitted, account.email());
        Ok(Notified::new(account, intent))
    }

    /// Resolve credentials to an approved account.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to callers.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Account, Error> {
        let accounts = self.accounts.lock().await;
        let account = accounts
            .iter()
            .find(|account| account.credentials_match(credentials))
            .ok_or_else(|| Error::invalid_credentials("email or password is incorrect"))?;

        if account.status() != AccountStatus::Approved {
            return Err(Error::pending_approval(
                "account is awaiting administrator approval",
            ));
        }
        Ok(account.clone())
    }

    /// Approve a pending account.
    pub async fn approve(&self, id: &AccountId) -> Result<Notified<Account>, Error> {
        let mut accounts = self.accounts.lock().await;
        let mut next = accounts.clone();
        let account = next
            .iter_mut()
            .find(|account| account.id() == *id && account.status() == AccountStatus::Pending)
            .ok_or_else(|| pending_not_found(id))?;
        account.approve();
        let approved = account.clone();
        self.commit(&mut accounts, next).await?;

        info!(account_id = %id, "account approved");
        let intent = NotificationIntent::new(NotificationKind::AccountApproved, approved.email());
        Ok(Notified::new(approved, intent))
    }

    /// Reject a pending account, deleting it from the directory.
    pub async fn reject(&self, id: &AccountId) -> Result<Notified<Account>, Error> {
        let mut accounts = self.accounts.lock().await;
        let position = accounts
            .iter()
            .position(|account| account.id() == *id && account.status() == AccountStatus::Pending)
            .ok_or_else(|| pending_not_found(id))?;
        let mut next = accounts.clone();
        let rejected = next.remove(position);
        self.commit(&mut accounts, next).await?;

        info!(account_id = %id, "account rejected");
        let intent = NotificationIntent::new(NotificationKind::AccountRejected, rejected.email());
        Ok(Notified::new(rejected, intent))
    }

    /// Accounts awaiting approval, in registration order.
    pub async fn pending_accounts(&self) -> Vec<Account> {
        self.accounts
            .lock()
            .await
            .iter()
            .filter(|account| account.status() == AccountStatus::Pending)
            .cloned()
            .collect()
    }

    /// Look up an account by id.
    pub async fn find(&self, id: &AccountId) -> Option<Account> {
        self.accounts
            .lock()
            .await
            .iter()
            .find(|account| account.id() == *id)
            .cloned()
    }

    /// Persist `next` and, only on success, make it the live collection.
    async fn commit(&self, live: &mut Vec<Account>, next: Vec<Account>) -> Result<(), Error> {
        persist_collection(self.store.as_ref(), ACCOUNTS_KEY, &next).await?;
        *live = next;
        Ok(())
    }
}

fn pending_not_found(id: &AccountId) -> Error {
    Error::not_found(format!("no pending account {id}"))
}

#[cfg(test)]
#[path = "account_directory_tests.rs"]
mod tests;
