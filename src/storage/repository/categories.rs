// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Category repository.
//!
//! Each category is stored as a separate JSON file under
//! `{DATA_DIR}/categories/`. Deletes are hard deletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{Storage, StorageError, StorageResult};

/// Category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCategory {
    /// Unique category identifier (UUID)
    pub id: String,
    /// Category name
    pub name: String,
    /// Category description
    pub description: String,
    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl StoredCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// Repository for category operations on record storage.
pub struct CategoryRepository<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check if a category exists.
    pub fn exists(&self, category_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().category(category_id))
    }

    /// Get a category by ID.
    pub fn get(&self, category_id: &str) -> StorageResult<StoredCategory> {
        let path = self.storage.paths().category(category_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Category {category_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new category.
    pub fn create(&self, category: &StoredCategory) -> StorageResult<()> {
        let category_id = &category.id;

        if self.exists(category_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Category {category_id}"
            )));
        }

        self.storage
            .write_json(self.storage.paths().category(category_id), category)
    }

    /// Update an existing category.
    pub fn update(&self, category: &StoredCategory) -> StorageResult<()> {
        let category_id = &category.id;

        if !self.exists(category_id) {
            return Err(StorageError::NotFound(format!("Category {category_id}")));
        }

        self.storage
            .write_json(self.storage.paths().category(category_id), category)
    }

    /// Delete a category.
    pub fn delete(&self, category_id: &str) -> StorageResult<()> {
        if !self.exists(category_id) {
            return Err(StorageError::NotFound(format!("Category {category_id}")));
        }

        self.storage
            .delete(self.storage.paths().category(category_id))
    }

    /// List all categories.
    pub fn list_all(&self) -> StorageResult<Vec<StoredCategory>> {
        let category_ids = self
            .storage
            .list_files(self.storage.paths().categories_dir(), "json")?;

        let mut categories = Vec::new();
        for id in category_ids {
            if let Ok(category) = self.get(&id) {
                categories.push(category);
            }
        }
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(categories)
    }
}
