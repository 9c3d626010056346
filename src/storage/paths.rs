// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the record storage layout.

use std::path::{Path, PathBuf};

/// Storage path utilities for the record filesystem.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all stored data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user record.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Category Paths ==========

    /// Directory containing all category records.
    pub fn categories_dir(&self) -> PathBuf {
        self.root.join("categories")
    }

    /// Path to a specific category record.
    pub fn category(&self, category_id: &str) -> PathBuf {
        self.categories_dir().join(format!("{category_id}.json"))
    }

    // ========== Product Paths ==========

    /// Directory containing all product records.
    pub fn products_dir(&self) -> PathBuf {
        self.root.join("products")
    }

    /// Path to a specific product record.
    pub fn product(&self, product_id: &str) -> PathBuf {
        self.products_dir().join(format!("{product_id}.json"))
    }
}
