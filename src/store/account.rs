use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::store::password::PasswordHash;
use crate::store::{CredentialStore, StoreError};

/// Username -> password hash map behind a mutex.
///
/// With a persistence path, the whole map is rewritten to disk after every
/// successful `create`. All methods block; async callers run them on the
/// blocking pool.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Mutex<HashMap<String, PasswordHash>>,
    persistence_path: Option<PathBuf>,
}

impl AccountStore {
    /// An empty store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`, loading existing accounts if the file
    /// exists. Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let accounts: HashMap<String, PasswordHash> = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            HashMap::new()
        };

        tracing::info!(
            path = %path.display(),
            accounts = accounts.len(),
            "Opened account store"
        );

        Ok(Self {
            accounts: Mutex::new(accounts),
            persistence_path: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, accounts: &HashMap<String, PasswordHash>) -> Result<(), StoreError> {
        let Some(path) = &self.persistence_path else {
            return Ok(());
        };

        let tmp = path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer(&mut writer, accounts)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl CredentialStore for AccountStore {
    fn verify(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let accounts = self.accounts.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(accounts
            .get(username)
            .is_some_and(|hash| hash.matches(password)))
    }

    fn create(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock().map_err(|_| StoreError::Poisoned)?;
        if accounts.contains_key(username) {
            return Err(StoreError::Duplicate(username.to_string()));
        }

        accounts.insert(username.to_string(), PasswordHash::new(password));
        if let Err(e) = self.persist(&accounts) {
            accounts.remove(username);
            return Err(e);
        }

        tracing::info!(username, "Account created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_verify() {
        let store = AccountStore::in_memory();
        store.create("bob", "pw").unwrap();

        assert!(store.verify("bob", "pw").unwrap());
        assert!(!store.verify("bob", "wrong").unwrap());
        assert!(!store.verify("alice", "pw").unwrap());
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = AccountStore::in_memory();
        store.create("bob", "pw").unwrap();

        let err = store.create("bob", "other").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(name) if name == "bob"));
        assert!(store.verify("bob", "pw").unwrap());
        assert_eq!(store.len(), 1);
    }
}
