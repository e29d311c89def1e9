//! Directory: in-memory account map with write-through persistence

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Account;
use crate::error::{AuthError, Result, StockError, ValidationError};
use crate::session::Session;
use crate::storage::{JsonFileStore, SnapshotStore, StorageWarning};
use crate::types::Role;

/// Snapshot type persisted by the directory, username → account
pub type AccountMap = BTreeMap<String, Account>;

/// Owns all accounts. Accounts are created by sign-up and never edited or removed.
#[derive(Debug)]
pub struct Directory<S = JsonFileStore<AccountMap>> {
    store: S,
    accounts: AccountMap,
    load_warning: Option<StorageWarning>,
}

impl Directory<JsonFileStore<AccountMap>> {
    /// Open the directory stored at `path`
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(JsonFileStore::new(path))
    }
}

impl<S: SnapshotStore<AccountMap>> Directory<S> {
    pub fn open(store: S) -> Self {
        let (accounts, load_warning) = store.load().into_parts();
        tracing::debug!(store = %store.location(), accounts = accounts.len(), "directory opened");
        Self {
            store,
            accounts,
            load_warning,
        }
    }

    /// Warning raised while loading, if the snapshot had to be discarded
    pub fn load_warning(&self) -> Option<&StorageWarning> {
        self.load_warning.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Register `username`. The password is stored only as its digest.
    pub fn sign_up(
        &mut self,
        username: &str,
        password: &str,
        confirm_password: &str,
        role: Role,
    ) -> Result<Account> {
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername.into());
        }
        if self.contains(username) {
            return Err(StockError::Conflict(username.to_string()));
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }

        let account = Account::new(password, role);
        let mut accounts = self.accounts.clone();
        accounts.insert(username.to_string(), account.clone());
        self.store.save(&accounts)?;
        self.accounts = accounts;

        tracing::info!(%username, %role, "account created");
        Ok(account)
    }

    /// Same as [`sign_up`](Self::sign_up) with the role given as text
    pub fn sign_up_with_role_name(
        &mut self,
        username: &str,
        password: &str,
        confirm_password: &str,
        role: &str,
    ) -> Result<Account> {
        let role: Role = role.parse()?;
        self.sign_up(username, password, confirm_password, role)
    }

    /// Check credentials and open a session carrying the stored role
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let account = self.accounts.get(username).ok_or_else(|| {
            tracing::warn!(%username, "login for unknown user");
            AuthError::UnknownUser(username.to_string())
        })?;

        if !account.verify(password) {
            tracing::warn!(%username, "login with incorrect password");
            return Err(AuthError::IncorrectPassword.into());
        }

        tracing::info!(%username, role = %account.role, "login");
        Ok(Session::new(username, account.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn directory() -> Directory<MemoryStore> {
        Directory::open(MemoryStore::new())
    }

    #[test]
    fn test_login_against_existing_users_file() {
        let store = MemoryStore::with_document(
            r#"{"bob": {"password": "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad", "role": "admin"}}"#,
        );
        let mut directory = Directory::open(store);
        assert!(directory.load_warning().is_none());

        let session = directory.login("bob", "abc").unwrap();
        assert_eq!(session.role(), Role::Admin);
        assert!(matches!(
            directory.sign_up("bob", "abc", "abc", Role::Admin),
            Err(StockError::Conflict(_))
        ));
    }

    #[test]
    fn test_sign_up_then_login() {
        let mut directory = directory();
        directory.sign_up("bob", "x", "x", Role::Admin).unwrap();

        let session = directory.login("bob", "x").unwrap();
        assert_eq!(session.username(), "bob");
        assert_eq!(session.role(), Role::Admin);
    }

    #[test]
    fn test_wrong_password_and_unknown_user_are_distinct() {
        let mut directory = directory();
        directory.sign_up("bob", "x", "x", Role::Viewer).unwrap();

        assert!(matches!(
            directory.login("bob", "y"),
            Err(StockError::Auth(AuthError::IncorrectPassword))
        ));
        assert!(matches!(
            directory.login("alice", "x"),
            Err(StockError::Auth(AuthError::UnknownUser(name))) if name == "alice"
        ));
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let mut directory = directory();
        directory.sign_up("bob", "x", "x", Role::Viewer).unwrap();
        directory.sign_up("Bob", "z", "z", Role::Admin).unwrap();
        assert_eq!(directory.len(), 2);
        assert!(directory.login("BOB", "x").is_err());
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let mut directory = directory();
        directory.sign_up("bob", "x", "x", Role::Viewer).unwrap();
        let err = directory.sign_up("bob", "q", "q", Role::Admin).unwrap_err();
        assert!(matches!(err, StockError::Conflict(name) if name == "bob"));
        assert_eq!(directory.get("bob").unwrap().role, Role::Viewer);
    }

    #[test]
    fn test_password_mismatch() {
        let mut directory = directory();
        let err = directory.sign_up("bob", "x", "y", Role::Admin).unwrap_err();
        assert!(matches!(
            err,
            StockError::Validation(ValidationError::PasswordMismatch)
        ));
        assert!(directory.is_empty());
    }

    #[test]
    fn test_blank_username_rejected() {
        let mut directory = directory();
        let err = directory.sign_up(" ", "x", "x", Role::Admin).unwrap_err();
        assert!(matches!(
            err,
            StockError::Validation(ValidationError::EmptyUsername)
        ));
    }

    #[test]
    fn test_role_by_name() {
        let mut directory = directory();
        directory
            .sign_up_with_role_name("carol", "pw", "pw", "viewer")
            .unwrap();
        let err = directory
            .sign_up_with_role_name("dave", "pw", "pw", "owner")
            .unwrap_err();
        assert!(matches!(
            err,
            StockError::Validation(ValidationError::UnknownRole(_))
        ));
        assert!(!directory.contains("dave"));
    }

    #[test]
    fn test_snapshot_never_contains_plaintext() {
        let mut directory = directory();
        directory
            .sign_up("erin", "correct horse", "correct horse", Role::Admin)
            .unwrap();
        let document = directory.store().document().unwrap();
        assert!(!document.contains("correct horse"));
        assert!(document.contains("password_hash"));
    }

    #[test]
    fn test_failed_save_does_not_register() {
        let mut directory = directory();
        directory.store().set_fail_writes(true);
        let err = directory.sign_up("bob", "x", "x", Role::Admin).unwrap_err();
        assert!(err.is_storage());
        assert!(!directory.contains("bob"));
    }
}
