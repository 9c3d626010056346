// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product repository.
//!
//! Each product is stored as a separate JSON file under
//! `{DATA_DIR}/products/`. Products are soft-deleted: a delete sets
//! `is_deleted` and `deleted_at` and the record stays on disk. Listing
//! excludes soft-deleted products; direct lookup by id does not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{Storage, StorageError, StorageResult};

/// Product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredProduct {
    /// Unique product identifier (UUID)
    pub id: String,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Owning category id
    pub category_id: String,
    /// Units in stock
    pub stock: i64,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// When the product was soft-deleted, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the product was created
    pub created_at: DateTime<Utc>,
}

impl StoredProduct {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category_id: impl Into<String>,
        stock: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            price,
            category_id: category_id.into(),
            stock,
            is_deleted: false,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Filters for product listing. All fields are optional and combined
/// with AND; substring matches are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
}

impl ProductFilter {
    fn matches(&self, product: &StoredProduct) -> bool {
        if product.is_deleted {
            return false;
        }
        if let Some(ref category_id) = self.category_id {
            if &product.category_id != category_id {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        if let Some(ref name) = self.name {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(ref description) = self.description {
            if !product
                .description
                .to_lowercase()
                .contains(&description.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.min_stock {
            if product.stock < min {
                return false;
            }
        }
        if let Some(max) = self.max_stock {
            if product.stock > max {
                return false;
            }
        }
        true
    }
}

/// Repository for product operations on record storage.
pub struct ProductRepository<'a> {
    storage: &'a Storage,
}

impl<'a> ProductRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check if a product exists.
    pub fn exists(&self, product_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().product(product_id))
    }

    /// Get a product by ID (soft-deleted products included).
    pub fn get(&self, product_id: &str) -> StorageResult<StoredProduct> {
        let path = self.storage.paths().product(product_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Product {product_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new product.
    pub fn create(&self, product: &StoredProduct) -> StorageResult<()> {
        let product_id = &product.id;

        if self.exists(product_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Product {product_id}"
            )));
        }

        self.storage
            .write_json(self.storage.paths().product(product_id), product)
    }

    /// Update an existing product.
    pub fn update(&self, product: &StoredProduct) -> StorageResult<()> {
        let product_id = &product.id;

        if !self.exists(product_id) {
            return Err(StorageError::NotFound(format!("Product {product_id}")));
        }

        self.storage
            .write_json(self.storage.paths().product(product_id), product)
    }

    /// Soft-delete a product.
    ///
    /// Fails with `AlreadyExists` if the product is already deleted, so the
    /// caller can distinguish a repeat delete from a missing product.
    pub fn soft_delete(&self, product_id: &str) -> StorageResult<StoredProduct> {
        let mut product = self.get(product_id)?;

        if product.is_deleted {
            return Err(StorageError::AlreadyExists(format!(
                "Product {product_id} is already deleted"
            )));
        }

        product.is_deleted = true;
        product.deleted_at = Some(Utc::now());
        self.update(&product)?;
        Ok(product)
    }

    /// List products matching the filter, paginated.
    ///
    /// Returns the requested page (stable creation order) and the total
    /// number of matches before pagination.
    pub fn list_filtered(
        &self,
        filter: &ProductFilter,
        page: usize,
        limit: usize,
    ) -> StorageResult<(Vec<StoredProduct>, usize)> {
        let product_ids = self
            .storage
            .list_files(self.storage.paths().products_dir(), "json")?;

        let mut products = Vec::new();
        for id in product_ids {
            if let Ok(product) = self.get(&id) {
                if filter.matches(&product) {
                    products.push(product);
                }
            }
        }
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = products.len();
        let page = page.max(1);
        let limit = limit.max(1);
        let page_items = products
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok((page_items, total))
    }
}
