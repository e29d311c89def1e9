//! Snapshot persistence
//!
//! Every collection (the inventory list, the account map) is durable only as
//! a whole: `save` rewrites the complete document, `load` reads it back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   save(&C)    ┌──────────────────────────┐
//! │   Catalog /  │ ────────────▶ │  SnapshotStore<C>        │
//! │   Directory  │ ◀──────────── │  ├─ JsonFileStore (disk) │
//! └──────────────┘  Loaded<C>    │  └─ MemoryStore (tests)  │
//!                                └──────────────────────────┘
//! ```
//!
//! Reads never fail. A missing snapshot is an empty collection; an unreadable
//! or unparsable one is an empty collection plus a [`StorageWarning`] that the
//! caller can inspect. Writes go through a temporary file and a rename, so an
//! interrupted save leaves the previous snapshot untouched.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Backing storage for one collection snapshot
pub trait SnapshotStore<C> {
    /// Read the whole collection, degrading to `C::default()` on any problem
    fn load(&self) -> Loaded<C>;

    /// Replace the stored snapshot with `collection`
    fn save(&self, collection: &C) -> Result<()>;

    /// Human readable location, used in logs and warnings
    fn location(&self) -> String;
}

impl<C, S> SnapshotStore<C> for &S
where
    S: SnapshotStore<C> + ?Sized,
{
    fn load(&self) -> Loaded<C> {
        (**self).load()
    }

    fn save(&self, collection: &C) -> Result<()> {
        (**self).save(collection)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Outcome of a snapshot read
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<C> {
    pub collection: C,
    pub warning: Option<StorageWarning>,
}

impl<C: Default> Loaded<C> {
    /// Nothing stored yet
    pub fn empty() -> Self {
        Self {
            collection: C::default(),
            warning: None,
        }
    }

    /// Snapshot existed but could not be used; continue with nothing
    pub fn recovered(warning: StorageWarning) -> Self {
        Self {
            collection: C::default(),
            warning: Some(warning),
        }
    }
}

impl<C> Loaded<C> {
    pub fn clean(collection: C) -> Self {
        Self {
            collection,
            warning: None,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_parts(self) -> (C, Option<StorageWarning>) {
        (self.collection, self.warning)
    }
}

/// A snapshot that existed but was discarded while loading.
///
/// Whatever it held is not in memory; the next save overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageWarning {
    pub location: PathBuf,
    pub reason: String,
}

impl StorageWarning {
    pub fn new(location: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self {
            location: location.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "snapshot {} could not be read ({}); starting empty",
            self.location.display(),
            self.reason
        )
    }
}
