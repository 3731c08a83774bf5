use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};

use crate::foundation::error::{DojoError, DojoResult};

/// Keyed string storage, the capability behind [`ProgressStore`].
///
/// Implementations report faults; the store decides to swallow them.
pub trait KvBackend {
    /// Raw value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> DojoResult<Option<String>>;
    /// Write `value` under `key`.
    fn set(&self, key: &str, value: &str) -> DojoResult<()>;
    /// Delete `key`; deleting an absent key is not an error.
    fn remove(&self, key: &str) -> DojoResult<()>;
}

/// In-memory backend for tests and environments without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> DojoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DojoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DojoResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Backend that behaves like storage with no persistent execution context.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableBackend;

impl KvBackend for UnavailableBackend {
    fn get(&self, _key: &str) -> DojoResult<Option<String>> {
        Err(DojoError::storage("persistent storage is unavailable"))
    }

    fn set(&self, _key: &str, _value: &str) -> DojoResult<()> {
        Err(DojoError::storage("persistent storage is unavailable"))
    }

    fn remove(&self, _key: &str) -> DojoResult<()> {
        Err(DojoError::storage("persistent storage is unavailable"))
    }
}

/// A JSON object file mapping keys to string values.
///
/// A missing file reads as empty. A file that does not parse is replaced on the next
/// write; any other read failure aborts the write. Writes go to a sibling temp file
/// that is renamed over the original.
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend over `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> DojoResult<BTreeMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read progress file '{}'", self.path.display()))
                    .into());
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            DojoError::storage(format!(
                "progress file '{}' is not a JSON object of strings: {e}",
                self.path.display()
            ))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> DojoResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create progress dir '{}'", parent.display()))?;
        }
        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&tmp, json)
            .with_context(|| format!("write progress file '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace progress file '{}'", self.path.display()))?;
        Ok(())
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> DojoResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> DojoResult<()> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(DojoError::Storage(reason)) => {
                tracing::debug!(%reason, "replacing unreadable progress file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> DojoResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Best-effort JSON persistence over a [`KvBackend`].
///
/// No operation returns an error: unavailable storage, absent keys and malformed
/// payloads all read as "nothing saved", and failed writes are logged and dropped.
/// Cloning shares the backend.
#[derive(Clone)]
pub struct ProgressStore {
    backend: Rc<dyn KvBackend>,
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressStore").finish_non_exhaustive()
    }
}

impl ProgressStore {
    /// Store over `backend`.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Store over a shared backend.
    pub fn from_shared(backend: Rc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Read and decode `key`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(key, error = %e, "progress storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(key, error = %e, "discarding malformed progress payload");
                None
            }
        }
    }

    /// Encode and write `value` under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "progress payload failed to serialize");
                return;
            }
        };
        if let Err(e) = self.backend.set(key, &raw) {
            tracing::warn!(key, error = %e, "progress storage write failed");
        }
    }

    /// Delete `key`.
    pub fn clear(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::warn!(key, error = %e, "progress storage delete failed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/store.rs"]
mod tests;
