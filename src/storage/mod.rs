// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Record Storage Module
//!
//! Persistent storage as one JSON file per record under the configured
//! data directory. Repositories wrap the generic backend with per-entity
//! operations; business rules beyond uniqueness live above this layer.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users/
//!     {user_id}.json       # Identity records (password hash, role, refresh token)
//!   categories/
//!     {category_id}.json
//!   products/
//!     {product_id}.json
//! ```

pub mod fs;
pub mod paths;
pub mod repository;

pub use fs::{Storage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    CategoryRepository, ProductFilter, ProductRepository, StoredCategory, StoredProduct,
    StoredUser, UserRepository,
};
