// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Category endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::{require_role, Auth, Role},
    error::ApiError,
    models::{Category, CreateCategoryRequest, UpdateCategoryRequest},
    state::AppState,
    storage::{CategoryRepository, StoredCategory},
};

/// Roles permitted to read categories.
const CATEGORY_READ_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::Client];
/// Roles permitted to create and update categories.
const CATEGORY_WRITE_ROLES: &[Role] = &[Role::Admin, Role::Manager];
/// Roles permitted to delete categories.
const CATEGORY_DELETE_ROLES: &[Role] = &[Role::Admin];

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    tag = "Categories",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Created category", body = Category),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role"),
    )
)]
pub async fn create_category(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    require_role(&user, CATEGORY_WRITE_ROLES)?;
    request.validate()?;

    let category = StoredCategory::new(request.name, request.description);
    CategoryRepository::new(&state.storage)
        .create(&category)
        .map_err(|e| ApiError::internal(format!("Failed to create category: {e}")))?;

    Ok(Json(category.into()))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All categories", body = [Category]),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_categories(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    require_role(&user, CATEGORY_READ_ROLES)?;

    let categories = CategoryRepository::new(&state.storage)
        .list_all()
        .map_err(|e| ApiError::internal(format!("Failed to list categories: {e}")))?;

    Ok(Json(categories.into_iter().map(Category::from).collect()))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    tag = "Categories",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn get_category(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    require_role(&user, CATEGORY_READ_ROLES)?;

    let category = CategoryRepository::new(&state.storage)
        .get(&id)
        .map_err(|_| ApiError::not_found(format!("Category with ID {id} not found")))?;

    Ok(Json(category.into()))
}

#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    tag = "Categories",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn update_category(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    require_role(&user, CATEGORY_WRITE_ROLES)?;

    let repo = CategoryRepository::new(&state.storage);
    let mut category = repo
        .get(&id)
        .map_err(|_| ApiError::not_found(format!("Category with ID {id} not found")))?;

    if let Some(name) = request.name {
        category.name = name;
    }
    if let Some(description) = request.description {
        category.description = description;
    }

    repo.update(&category)
        .map_err(|e| ApiError::internal(format!("Failed to update category: {e}")))?;

    Ok(Json(category.into()))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    tag = "Categories",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn delete_category(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), ApiError> {
    require_role(&user, CATEGORY_DELETE_ROLES)?;

    CategoryRepository::new(&state.storage)
        .delete(&id)
        .map_err(|_| ApiError::not_found(format!("Category with ID {id} not found")))?;

    Ok(())
}
