//! Account Directory
//!
//! User accounts keyed by username, persisted as a single JSON object. The
//! directory verifies credentials and hands out the [`Session`] that every
//! later authorization check is made against.

pub mod directory;

pub use directory::{AccountMap, Directory};

use serde::{Deserialize, Serialize};

use crate::types::{PasswordDigest, Role};

/// Stored credentials for one username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(alias = "password")]
    pub password_hash: PasswordDigest,
    pub role: Role,
}

impl Account {
    pub fn new(password: &str, role: Role) -> Self {
        Self {
            password_hash: PasswordDigest::of(password),
            role,
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        self.password_hash.matches(password)
    }
}
