//! Snapshot slot storage.
//!
//! Persistence is a set of named slots, each holding one serialized value
//! written and read in full: plain structured text, no compression, no
//! encryption, no partial writes. [`FileSlotStore`] keeps one file per
//! slot under a data directory; [`MemorySlotStore`] backs tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Slot holding the serialized report collection.
pub const REPORTS_SLOT: &str = "ppkpt_reports";

/// Slot holding the admin session flag.
pub const AUTH_SLOT: &str = "ppkpt_auth";

/// A named-slot store.
///
/// The whole value for a slot is replaced on every write; there is no
/// partial update and no concurrent-writer protection.
pub trait SlotStore: std::fmt::Debug + Send {
    /// Read the value in `key`, or `None` if the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value in `key` in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be removed.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Slot store keeping one file per slot under a directory.
#[derive(Debug)]
pub struct FileSlotStore {
    /// Directory holding the slot files.
    dir: PathBuf,
}

impl FileSlotStore {
    /// Open a slot store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|source| Error::DirectoryCreate {
                path: dir.clone(),
                source,
            })?;
        }
        debug!("slot store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SlotStore for FileSlotStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::slot_read(key, source)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.slot_path(key), value)
            .map_err(|source| Error::slot_write(key, source))?;
        debug!("wrote {} bytes to slot '{key}'", value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::slot_write(key, source)),
        }
    }
}

/// In-memory slot store for tests.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
}

impl MemorySlotStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one slot.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.into(), value.into());
        store
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}
