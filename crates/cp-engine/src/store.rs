//! Key-value substrates for the baseline store.
//!
//! [`KeyValueStore`] is the persistence contract: opaque bytes under string
//! keys.  Two implementations ship with the crate: [`InMemoryStore`] for
//! tests and single-process use, and [`FileStore`], one file per key in a
//! directory.

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cp_core::errors::{Error, Result};
use log::debug;
use parking_lot::RwLock;
use tempfile::NamedTempFile;

/// Byte storage keyed by string.
///
/// Writes to one key are last-write-wins.  Deleting an absent key succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// The bytes stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove `key`.
    async fn delete(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// A `HashMap` behind a read-write lock.  Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.data.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// One `<encoded key>.json` file per key under a root directory.
///
/// Each write goes to its own temporary file in the same directory and is
/// renamed into place, so a reader sees either the old or the new value and
/// concurrent writers of one key resolve to the last rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root`, creating it if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| store_error(&root.display().to_string(), e))?;
        debug!("file store at {}", root.display());
        Ok(Self { root })
    }

    /// The directory holding the files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error(key, e)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let root = self.root.clone();
        let path = self.path_for(key);
        // Each write gets its own temporary file, so concurrent writers of
        // one key never share a staging file; the last rename wins.
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut staged = NamedTempFile::new_in(&root)?;
            staged.write_all(&value)?;
            staged.as_file().sync_all()?;
            staged.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| Error::FreezeStore {
            key: key.to_string(),
            reason: format!("write task failed: {e}"),
        })?;
        written.map_err(|e| store_error(key, e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(key, e)),
        }
    }
}

fn store_error(key: &str, e: std::io::Error) -> Error {
    Error::FreezeStore {
        key: key.to_string(),
        reason: e.to_string(),
    }
}

/// Percent-encode everything but `[A-Za-z0-9_-]` so any key is a safe
/// file name.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
