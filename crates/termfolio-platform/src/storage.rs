//! Persisted key/value storage.
//!
//! termfolio persists exactly one preference (the theme), but storage is
//! kept behind a small string-to-string trait so the theme store can be
//! tested against memory and run against a TOML file.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use termfolio_types::error::{Result, TermfolioError};

/// String key/value storage.
pub trait KvStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage. Clones share the same map, which lets tests simulate
/// a restart by building a second consumer over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a flat TOML table on disk.
///
/// The file is re-read on every access; it holds a handful of keys at most.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupted file is replaced rather than blocking every write.
        let mut map = self.load().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable state file {}: {e}", self.path.display());
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                TermfolioError::Storage(format!("create {}: {e}", parent.display()))
            })?;
        }
        std::fs::write(&self.path, toml::to_string(&map)?)?;
        log::debug!("Persisted {key}={value} to {}", self.path.display());
        Ok(())
    }
}
