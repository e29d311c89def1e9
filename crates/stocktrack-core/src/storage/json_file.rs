//! JsonFileStore: pretty-printed JSON snapshot on local disk

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::{Loaded, SnapshotStore, StorageWarning};
use crate::error::{Result, ResultExt};

/// Indentation of persisted documents
const INDENT: &[u8] = b"    ";

/// One collection stored as a single JSON document at `path`
#[derive(Debug, Clone)]
pub struct JsonFileStore<C> {
    path: PathBuf,
    _collection: PhantomData<fn() -> C>,
}

impl<C> JsonFileStore<C> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _collection: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl<C> SnapshotStore<C> for JsonFileStore<C>
where
    C: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> Loaded<C> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot yet");
                return Loaded::empty();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot unreadable");
                return Loaded::recovered(StorageWarning::new(&self.path, e.to_string()));
            }
        };

        if content.trim().is_empty() {
            return Loaded::empty();
        }

        match serde_json::from_str(&content) {
            Ok(collection) => {
                tracing::debug!(path = %self.path.display(), bytes = content.len(), "snapshot loaded");
                Loaded::clean(collection)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot corrupt, starting empty");
                Loaded::recovered(StorageWarning::new(&self.path, e.to_string()))
            }
        }
    }

    fn save(&self, collection: &C) -> Result<()> {
        write_atomically(self.parent_dir(), &self.path, collection)
            .with_context(|| format!("saving snapshot to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_atomically<C: Serialize>(dir: &Path, path: &Path, collection: &C) -> Result<()> {
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut tmp, formatter);
        collection.serialize(&mut serializer)?;
    }
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
