// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product endpoints.
//!
//! The list endpoint declares no required roles: any authenticated
//! identity may browse the catalog. All other operations are gated per
//! the policy table.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    auth::{require_role, Auth, Role},
    error::ApiError,
    models::{
        CreateProductRequest, MessageResponse, Product, ProductListQuery, ProductPageResponse,
        UpdateProductRequest,
    },
    state::AppState,
    storage::{CategoryRepository, ProductFilter, ProductRepository, StorageError, StoredProduct},
};

/// Roles permitted to read a single product.
const PRODUCT_READ_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::Client];
/// Roles permitted to create and update products.
const PRODUCT_WRITE_ROLES: &[Role] = &[Role::Admin, Role::Manager];
/// Roles permitted to delete products.
const PRODUCT_DELETE_ROLES: &[Role] = &[Role::Admin];
/// Listing is open to any authenticated identity.
const PRODUCT_LIST_ROLES: &[Role] = &[];

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Created product", body = Product),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Referenced category not found"),
    )
)]
pub async fn create_product(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    require_role(&user, PRODUCT_WRITE_ROLES)?;
    request.validate()?;

    // The owning category must exist
    if !CategoryRepository::new(&state.storage).exists(&request.category_id) {
        return Err(ApiError::not_found(format!(
            "Category with ID {} not found",
            request.category_id
        )));
    }

    let product = StoredProduct::new(
        request.name,
        request.description,
        request.price,
        request.category_id,
        request.stock,
    );
    ProductRepository::new(&state.storage)
        .create(&product)
        .map_err(|e| ApiError::internal(format!("Failed to create product: {e}")))?;

    Ok(Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductListQuery),
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "One page of products", body = ProductPageResponse),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_products(
    Auth(user): Auth,
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductPageResponse>, ApiError> {
    require_role(&user, PRODUCT_LIST_ROLES)?;

    let filter = ProductFilter {
        category_id: query.category,
        min_price: query.min_price,
        max_price: query.max_price,
        name: query.name,
        description: query.description,
        min_stock: query.min_stock,
        max_stock: query.max_stock,
    };
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let (products, total) = ProductRepository::new(&state.storage)
        .list_filtered(&filter, page, limit)
        .map_err(|e| ApiError::internal(format!("Failed to list products: {e}")))?;

    Ok(Json(ProductPageResponse {
        products: products.into_iter().map(Product::from).collect(),
        total,
        current_page: page,
        total_pages: total.div_ceil(limit),
    }))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn get_product(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    require_role(&user, PRODUCT_READ_ROLES)?;

    let product = ProductRepository::new(&state.storage)
        .get(&id)
        .map_err(|_| ApiError::not_found(format!("Product with ID {id} not found")))?;

    Ok(Json(product.into()))
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn update_product(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    require_role(&user, PRODUCT_WRITE_ROLES)?;

    let repo = ProductRepository::new(&state.storage);
    let mut product = repo
        .get(&id)
        .map_err(|_| ApiError::not_found(format!("Product with ID {id} not found")))?;

    if let Some(name) = request.name {
        product.name = name;
    }
    if let Some(description) = request.description {
        product.description = description;
    }
    if let Some(price) = request.price {
        if price <= 0.0 {
            return Err(ApiError::bad_request("price must be a positive number"));
        }
        product.price = price;
    }
    if let Some(category_id) = request.category_id {
        if !CategoryRepository::new(&state.storage).exists(&category_id) {
            return Err(ApiError::not_found(format!(
                "Category with ID {category_id} not found"
            )));
        }
        product.category_id = category_id;
    }
    if let Some(stock) = request.stock {
        if stock < 0 {
            return Err(ApiError::bad_request("Stock must be a positive number"));
        }
        product.stock = stock;
    }

    repo.update(&product)
        .map_err(|e| ApiError::internal(format!("Failed to update product: {e}")))?;

    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product soft-deleted", body = MessageResponse),
        (status = 400, description = "Product already deleted"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn delete_product(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_role(&user, PRODUCT_DELETE_ROLES)?;

    ProductRepository::new(&state.storage)
        .soft_delete(&id)
        .map_err(|e| match e {
            StorageError::AlreadyExists(_) => {
                ApiError::bad_request(format!("Product with ID {id} is already deleted"))
            }
            _ => ApiError::not_found(format!("Product with ID {id} not found")),
        })?;

    Ok(Json(MessageResponse {
        message: format!("Product with ID {id} has been successfully deleted"),
    }))
}
