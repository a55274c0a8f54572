//! Transient binary blob references for the viewer
//!
//! A reference is a single-owner, single-lifetime resource: `revoke` consumes
//! the handle, so a reference cannot be revoked twice or kept after revocation.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Opaque handle to a live blob reference. Not cloneable: exactly one owner.
#[derive(Debug, PartialEq, Eq)]
pub struct BlobHandle {
    uri: String,
}

impl BlobHandle {
    fn new(uri: String) -> Self {
        Self { uri }
    }

    /// URL-like locator usable by a display surface
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Creates and revokes blob references
pub trait BlobRefService {
    fn create_reference(&mut self, bytes: &[u8], mime: &str) -> Result<BlobHandle>;
    fn revoke(&mut self, handle: BlobHandle);
}

/// Blob references materialized as uniquely-named files in the OS temp
/// directory, so the host's native viewer can open them.
pub struct TempFileBlobs {
    dir: PathBuf,
    counter: u64,
}

impl TempFileBlobs {
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
            counter: 0,
        }
    }

    fn extension_for(mime: &str) -> &'static str {
        match mime {
            "application/pdf" => "pdf",
            _ => "bin",
        }
    }
}

impl Default for TempFileBlobs {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobRefService for TempFileBlobs {
    fn create_reference(&mut self, bytes: &[u8], mime: &str) -> Result<BlobHandle> {
        self.counter += 1;
        let name = format!(
            "papershelf-{}-{}.{}",
            std::process::id(),
            self.counter,
            Self::extension_for(mime)
        );
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write blob: {}", path.display()))?;
        Ok(BlobHandle::new(path.to_string_lossy().to_string()))
    }

    fn revoke(&mut self, handle: BlobHandle) {
        if let Err(e) = std::fs::remove_file(&handle.uri) {
            tracing::debug!("Failed to remove blob {}: {}", handle.uri, e);
        }
    }
}

/// In-memory reference service for tests; tracks live handle count
#[cfg(test)]
pub struct MemoryBlobs {
    live: std::collections::HashMap<String, Vec<u8>>,
    counter: u64,
}

#[cfg(test)]
impl MemoryBlobs {
    pub fn new() -> Self {
        Self {
            live: std::collections::HashMap::new(),
            counter: 0,
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn bytes_for(&self, handle: &BlobHandle) -> Option<&[u8]> {
        self.live.get(handle.uri()).map(Vec::as_slice)
    }
}

#[cfg(test)]
impl BlobRefService for MemoryBlobs {
    fn create_reference(&mut self, bytes: &[u8], mime: &str) -> Result<BlobHandle> {
        self.counter += 1;
        let uri = format!("blob:{}/{}", mime, self.counter);
        self.live.insert(uri.clone(), bytes.to_vec());
        Ok(BlobHandle::new(uri))
    }

    fn revoke(&mut self, handle: BlobHandle) {
        self.live.remove(handle.uri());
    }
}
