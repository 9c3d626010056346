// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Request types validate their own shape at the boundary;
//! nothing malformed reaches the auth core or the repositories.
//!
//! Wire field names are camelCase to preserve the service's public
//! contract (`accessToken`, `categoryId`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::Role;
use crate::error::ApiError;
use crate::storage::{StoredCategory, StoredProduct, StoredUser};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 4;

/// Cheap shape check: one `@`, non-empty local part, dotted domain.
/// Deliverability is not this layer's problem.
fn is_email_shaped(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

// =============================================================================
// Auth Models
// =============================================================================

/// Request to register a new user.
///
/// Also used for admin-created users, which may carry any role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Plaintext password; never stored as-is.
    pub password: String,
    /// Role; defaults to client when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request("name should not be empty"));
        }
        if !is_email_shaped(&self.email) {
            return Err(ApiError::bad_request("Please enter a correct email"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::bad_request(
                "Password must be at least 4 characters long",
            ));
        }
        Ok(())
    }
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_email_shaped(&self.email) {
            return Err(ApiError::bad_request("Please enter a correct email"));
        }
        if self.password.is_empty() {
            return Err(ApiError::bad_request("password should not be empty"));
        }
        Ok(())
    }
}

/// Request to exchange a refresh token for a new access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// The refresh token returned by login.
    pub refresh_token: String,
}

/// Confirmation message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Access + refresh token pair returned by login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    /// Short-lived token used on every request.
    pub access_token: String,
    /// Longer-lived token used only to mint new access tokens.
    pub refresh_token: String,
}

/// New access token returned by the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

// =============================================================================
// User Models
// =============================================================================

/// User record as exposed by the API.
///
/// Never includes the password hash or the stored refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request to assign a role to a user.
///
/// The role arrives as a string and is parsed against the closed role
/// set; anything else is a validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignRoleRequest {
    pub role: String,
}

// =============================================================================
// Category Models
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<StoredCategory> for Category {
    fn from(category: StoredCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

/// Request to create a category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request("name should not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::bad_request("description should not be empty"));
        }
        Ok(())
    }
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Product Models
// =============================================================================

/// A product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Owning category.
    pub category_id: String,
    pub stock: i64,
    pub is_deleted: bool,
}

impl From<StoredProduct> for Product {
    fn from(product: StoredProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            stock: product.stock,
            is_deleted: product.is_deleted,
        }
    }
}

/// Request to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub stock: i64,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request("name should not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::bad_request("description should not be empty"));
        }
        if self.price <= 0.0 {
            return Err(ApiError::bad_request("price must be a positive number"));
        }
        if self.stock < 0 {
            return Err(ApiError::bad_request("Stock must be a positive number"));
        }
        Ok(())
    }
}

/// Partial update of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

/// Query parameters for product listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Filter by owning category id.
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive name substring.
    pub name: Option<String>,
    /// Case-insensitive description substring.
    pub description: Option<String>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    /// 1-based page number (default 1).
    pub page: Option<usize>,
    /// Page size (default 10).
    pub limit: Option<usize>,
}

/// One page of products.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    pub products: Vec<Product>,
    /// Total matches before pagination.
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
}
