//! File-backed blob storage
//!
//! State and configuration blobs live in plain files. A missing file means
//! nothing is stored; so does a file larger than the engine can accept,
//! since handing the engine a truncated blob would be worse than none.
//!
//! Saves go to a sibling `.tmp` file which is then renamed over the target,
//! so a power cut mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use aircycle_core::traits::{ConfigSource, StateStore};
use aircycle_core::StorageError;

use crate::error::HostError;

/// Read `path` into `buf`; `Ok(0)` when the file does not exist
fn read_blob(path: &Path, buf: &mut [u8]) -> Result<usize, HostError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };
    if data.len() > buf.len() {
        return Err(HostError::BlobTooLarge {
            len: data.len(),
            max: buf.len(),
        });
    }
    buf[..data.len()].copy_from_slice(&data);
    Ok(data.len())
}

fn load_or_nothing(path: &Path, buf: &mut [u8], what: &str) -> usize {
    match read_blob(path, buf) {
        Ok(0) => {
            log::debug!("no {} stored at {}", what, path.display());
            0
        }
        Ok(len) => len,
        Err(e) => {
            log::warn!("ignoring {} at {}: {}", what, path.display(), e);
            0
        }
    }
}

/// Engine state persisted in a single file
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Store state at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write `blob` atomically
    pub fn write(&self, blob: &[u8]) -> Result<(), HostError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(blob)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load_state(&mut self, buf: &mut [u8]) -> usize {
        load_or_nothing(&self.path, buf, "engine state")
    }

    fn save_state(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        self.write(blob).map_err(|e| {
            log::warn!("failed to write engine state to {}: {}", self.path.display(), e);
            match e {
                HostError::Io(io) if io.kind() == ErrorKind::PermissionDenied => StorageError::Unavailable,
                _ => StorageError::Io,
            }
        })
    }
}

/// Engine configuration read from an optional file
#[derive(Debug, Clone, Default)]
pub struct FileConfigSource {
    path: Option<PathBuf>,
}

impl FileConfigSource {
    /// Read configuration from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// No configuration file; the engine keeps its defaults
    pub fn none() -> Self {
        Self { path: None }
    }
}

impl ConfigSource for FileConfigSource {
    fn load_config(&mut self, buf: &mut [u8]) -> usize {
        match &self.path {
            Some(path) => load_or_nothing(path, buf, "engine configuration"),
            None => 0,
        }
    }
}
