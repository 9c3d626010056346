// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-entity repositories over the record storage backend.

pub mod categories;
pub mod products;
pub mod users;

pub use categories::{CategoryRepository, StoredCategory};
pub use products::{ProductFilter, ProductRepository, StoredProduct};
pub use users::{StoredUser, UserRepository};
