//! Durable key/value storage for user preferences
//!
//! Each key maps to one JSON file under the data directory. Writes go to a
//! temporary file first and are renamed into place, so a crash never leaves a
//! half-written value behind.

use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub trait Storage {
    /// Read the raw value stored under `key`, or `None` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    fn write(&self, key: &str, value: &str) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {e}", path.display())))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Storage(format!(
                "Failed to create data directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| Error::Storage(format!("Failed to replace {}: {e}", path.display())))?;

        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Resolve the data directory: an explicit override, else the platform data dir
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, Error> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => dirs_next::data_dir()
            .map(|dir| dir.join("flagdex"))
            .ok_or_else(|| Error::Storage("Unable to determine data directory".to_string())),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        assert_eq!(storage.read("flagdex-favorites").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested"));

        storage.write("flagdex-theme", "\"dark\"").unwrap();

        assert_eq!(
            storage.read("flagdex-theme").unwrap().as_deref(),
            Some("\"dark\"")
        );
        assert!(temp_dir.path().join("nested/flagdex-theme.json").exists());
        assert!(!temp_dir.path().join("nested/flagdex-theme.json.tmp").exists());
    }

    #[test]
    fn test_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write("k", "1").unwrap();
        storage.write("k", "2").unwrap();

        assert_eq!(storage.read("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_resolve_data_dir_override() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/flagdex-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/flagdex-test"));
    }
}
