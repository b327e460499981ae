//! Account credential storage.
//!
//! The dispatcher only sees the [`CredentialStore`] trait: `verify` for
//! login and `create` for registration. [`AccountStore`] implements it with
//! salted password hashes kept in memory and, optionally, persisted as JSON.

pub mod account;
pub mod password;

pub use account::AccountStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username {0:?} is already registered")]
    Duplicate(String),
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

pub trait CredentialStore: Send + Sync {
    /// `Ok(true)` when `username` exists and `password` matches.
    fn verify(&self, username: &str, password: &str) -> Result<bool, StoreError>;

    /// Registers a new account. Fails with [`StoreError::Duplicate`] when the
    /// username is taken.
    fn create(&self, username: &str, password: &str) -> Result<(), StoreError>;
}
