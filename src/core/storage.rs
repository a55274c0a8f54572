//! Persistent key-value slot with a fixed storage quota

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use thiserror::Error;

/// Quota for a single slot, mirroring a browser local-storage budget
pub const QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Errors from persisting to a slot
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("storage quota exceeded ({size} bytes, quota {quota})")]
    QuotaExceeded { size: usize, quota: usize },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A named persistent key-value slot. Single global namespace, no
/// cross-process synchronization: last write wins.
pub trait StorageSlot {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError>;
}

/// File-backed slot: one file per key under the app data directory
pub struct FileSlot {
    dir: PathBuf,
    quota: usize,
}

impl FileSlot {
    pub fn new(dir: PathBuf, quota: usize) -> Self {
        Self { dir, quota }
    }

    /// Open the slot in the default per-user data directory
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "papershelf", "Papershelf")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(dirs.data_dir().to_path_buf(), QUOTA_BYTES))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageSlot for FileSlot {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        if value.len() > self.quota {
            return Err(SlotError::QuotaExceeded {
                size: value.len(),
                quota: self.quota,
            });
        }
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory slot for tests
#[cfg(test)]
pub struct MemorySlot {
    entries: std::collections::HashMap<String, String>,
    quota: usize,
}

#[cfg(test)]
impl MemorySlot {
    pub fn new() -> Self {
        Self {
            entries: std::collections::HashMap::new(),
            quota: QUOTA_BYTES,
        }
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: std::collections::HashMap::new(),
            quota,
        }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn seed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
impl StorageSlot for MemorySlot {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        if value.len() > self.quota {
            return Err(SlotError::QuotaExceeded {
                size: value.len(),
                quota: self.quota,
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
