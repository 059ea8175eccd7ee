//! Attachment file storage.
//!
//! Uploaded files are buffered in memory and written under the configured
//! directory with generated names ([`stored_filename`]): a client-supplied
//! name can never collide with or overwrite an existing file, and never
//! contributes path components.
//!
//! File writes are not coupled to the record store: a crash between a file
//! write and the store commit can orphan a file.

use std::path::{Path, PathBuf};

use podium_core::naming::stored_filename;

/// Stores and removes attachment files under a base directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are stored under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write one uploaded file, returning its generated stored name.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> std::io::Result<String> {
        let stored = stored_filename(original_name);
        tokio::fs::write(self.dir.join(&stored), data).await?;
        Ok(stored)
    }

    /// Remove a stored file. A missing file is not an error.
    pub async fn delete(&self, stored_name: &str) -> std::io::Result<()> {
        match tokio::fs::remove_file(self.dir.join(stored_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Remove every file in `stored_names`.
    pub async fn delete_all<I>(&self, stored_names: I) -> std::io::Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in stored_names {
            self.delete(name.as_ref()).await?;
        }
        Ok(())
    }

    /// Read a stored file, `None` if it is absent.
    pub async fn read(&self, stored_name: &str) -> std::io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.dir.join(stored_name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
