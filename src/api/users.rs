// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.
//!
//! User management is Admin-only; `/users/me` is open to any
//! authenticated identity.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::{require_role, Auth, AuthService, Role},
    error::ApiError,
    models::{AssignRoleRequest, SignUpRequest, UserResponse},
    state::AppState,
    storage::UserRepository,
};

/// Roles permitted to manage users.
const USER_MANAGE_ROLES: &[Role] = &[Role::Admin];

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The caller's identity", body = UserResponse),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn get_current_user(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let stored = UserRepository::new(&state.storage)
        .get(&user.id)
        .map_err(|_| ApiError::not_found("User not found"))?;

    Ok(Json(stored.into()))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 403, description = "Insufficient role"),
    )
)]
pub async fn list_users(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_role(&user, USER_MANAGE_ROLES)?;

    let users = UserRepository::new(&state.storage)
        .list_all()
        .map_err(|e| ApiError::internal(format!("Failed to list users: {e}")))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = SignUpRequest,
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 403, description = "Insufficient role"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn create_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require_role(&user, USER_MANAGE_ROLES)?;
    request.validate()?;

    let service = AuthService::new(&state.storage, &state.tokens);
    let created =
        service.sign_up(&request.name, &request.email, &request.password, request.role)?;

    Ok(Json(created.into()))
}

#[utoipa::path(
    patch,
    path = "/users/{id}/roles",
    params(("id" = String, Path, description = "User id")),
    request_body = AssignRoleRequest,
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User with updated role", body = UserResponse),
        (status = 400, description = "Unknown role"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn assign_role(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AssignRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require_role(&user, USER_MANAGE_ROLES)?;

    let role = Role::from_str(&request.role)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid role: {}", request.role)))?;

    let updated = UserRepository::new(&state.storage)
        .update_role(&id, role)
        .map_err(|_| ApiError::not_found("User not found"))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), ApiError> {
    require_role(&user, USER_MANAGE_ROLES)?;

    UserRepository::new(&state.storage)
        .delete(&id)
        .map_err(|_| ApiError::not_found("User not found"))?;

    Ok(())
}
