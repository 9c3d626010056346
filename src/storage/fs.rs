// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Filesystem-backed record storage.
//!
//! One JSON file per record, grouped into per-entity directories (see
//! [`StoragePaths`]). Writes go through a temp file followed by an atomic
//! rename, so a concurrent reader never observes a partially written
//! record and the last completed write wins.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use super::StoragePaths;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Entity already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Record storage manager over plain filesystem I/O.
#[derive(Debug, Clone)]
pub struct Storage {
    paths: StoragePaths,
    initialized: bool,
}

impl Storage {
    /// Create a new Storage instance.
    ///
    /// Does NOT initialize the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Initialize the storage directory structure.
    ///
    /// Creates all required directories. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        let dirs = [
            self.paths.users_dir(),
            self.paths.categories_dir(),
            self.paths.products_dir(),
        ];

        for dir in dirs {
            fs::create_dir_all(&dir)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Check if the storage directory is available and writable.
    ///
    /// Performs a write-read-delete probe.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let test_file = self.paths.root().join(".health_check");
        let test_data = b"health_check_data";

        fs::write(&test_file, test_data)?;
        let read_data = fs::read(&test_file)?;
        fs::remove_file(&test_file)?;

        if read_data != test_data {
            return Err(StorageError::Io(io::Error::other(
                "health check data mismatch",
            )));
        }

        Ok(())
    }

    // ========== Generic JSON Operations ==========

    /// Read a JSON file and deserialize it.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Write a JSON file (atomic write via rename).
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Check if a file exists.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().is_file()
    }

    /// Delete a file.
    pub fn delete(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        fs::remove_file(path.as_ref())?;
        Ok(())
    }

    /// List the stems of all files in a directory with the given extension.
    pub fn list_files(&self, dir: impl AsRef<Path>, extension: &str) -> StorageResult<Vec<String>> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext == extension {
                        if let Some(stem) = path.file_stem() {
                            if let Some(id) = stem.to_str() {
                                ids.push(id.to_string());
                            }
                        }
                    }
                }
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    fn test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = Storage::new(paths);
        storage.initialize().expect("Failed to initialize storage");
        (storage, temp_dir)
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        id: String,
        value: i32,
    }

    #[test]
    fn initialize_creates_directories() {
        let (storage, _dir) = test_storage();

        assert!(storage.paths().users_dir().exists());
        assert!(storage.paths().categories_dir().exists());
        assert!(storage.paths().products_dir().exists());
    }

    #[test]
    fn write_read_roundtrip() {
        let (storage, _dir) = test_storage();

        let data = TestData {
            id: "t-1".to_string(),
            value: 42,
        };
        let path = storage.paths().root().join("test.json");
        storage.write_json(&path, &data).unwrap();

        let loaded: TestData = storage.read_json(&path).unwrap();
        assert_eq!(loaded, data);
        assert!(storage.exists(&path));
    }

    #[test]
    fn delete_removes_file() {
        let (storage, _dir) = test_storage();

        let path = storage.paths().root().join("gone.json");
        storage
            .write_json(&path, &TestData { id: "x".into(), value: 1 })
            .unwrap();
        storage.delete(&path).unwrap();
        assert!(!storage.exists(&path));
    }

    #[test]
    fn list_files_returns_stems() {
        let (storage, _dir) = test_storage();

        for id in ["a", "b", "c"] {
            let path = storage.paths().users_dir().join(format!("{id}.json"));
            storage
                .write_json(&path, &TestData { id: id.into(), value: 0 })
                .unwrap();
        }

        let mut ids = storage.list_files(storage.paths().users_dir(), "json").unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn list_files_on_missing_dir_is_empty() {
        let (storage, _dir) = test_storage();
        let ids = storage
            .list_files(storage.paths().root().join("nope"), "json")
            .unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn uninitialized_storage_errors() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(StoragePaths::new(temp_dir.path()));

        let result: StorageResult<TestData> =
            storage.read_json(temp_dir.path().join("x.json"));
        assert!(matches!(result, Err(StorageError::NotInitialized)));
    }

    #[test]
    fn health_check_passes_after_initialize() {
        let (storage, _dir) = test_storage();
        storage.health_check().unwrap();
    }
}
