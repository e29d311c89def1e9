//! In-memory snapshot store for testing

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::io;

use super::{Loaded, SnapshotStore, StorageWarning};
use crate::error::{Result, StockError};

/// Holds the serialized snapshot text in memory.
///
/// Snapshots still go through `serde_json`, so a round trip here exercises the
/// same encoding as the file store. Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from arbitrary stored text, valid or not
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(text.into())),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl<C> SnapshotStore<C> for MemoryStore
where
    C: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> Loaded<C> {
        match self.document.borrow().as_deref() {
            None => Loaded::empty(),
            Some(text) if text.trim().is_empty() => Loaded::empty(),
            Some(text) => match serde_json::from_str(text) {
                Ok(collection) => Loaded::clean(collection),
                Err(e) => Loaded::recovered(StorageWarning::new("memory", e.to_string())),
            },
        }
    }

    fn save(&self, collection: &C) -> Result<()> {
        if self.fail_writes.get() {
            let err = io::Error::new(io::ErrorKind::Other, "simulated write failure");
            return Err(StockError::from(err).context("saving snapshot to memory"));
        }
        let text = serde_json::to_string_pretty(collection)?;
        *self.document.borrow_mut() = Some(text);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
