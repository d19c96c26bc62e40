//! File-backed storage backend.
//!
//! Directory structure:
//! ```text
//! root/
//! ├── goMarketplace%3Acart.json
//! └── ...
//! ```
//!
//! Keys are URL-encoded to form file names, so any key maps to a single
//! portable file name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{KeyValueStorage, StorageError};

/// Storage that keeps each key in its own file under `root`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", urlencoding::encode(key)))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Self::io_error(key, e))?;

        // Write to a sibling and rename so readers never see a partial blob
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|e| Self::io_error(key, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::io_error(key, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Stored item");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("goMarketplace:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("goMarketplace:cart", "[1]").await.unwrap();
        storage.set_item("goMarketplace:cart", "[2]").await.unwrap();

        assert_eq!(
            storage
                .get_item("goMarketplace:cart")
                .await
                .unwrap()
                .as_deref(),
            Some("[2]")
        );
    }

    #[tokio::test]
    async fn test_creates_root_directory_on_write() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("store"));

        storage.set_item("k", "v").await.unwrap();
        assert!(storage.path_for("k").exists());
    }

    #[tokio::test]
    async fn test_key_is_url_encoded() {
        let storage = FileStorage::new("/data");
        let path = storage.path_for("goMarketplace:cart");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "goMarketplace%3Acart.json"
        );
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set_item("k", "v").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("k", "v").await.unwrap();
        storage.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        // Removing again is fine
        storage.remove_item("k").await.unwrap();
    }
}
