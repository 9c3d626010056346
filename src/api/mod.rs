// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AccessTokenResponse, AssignRoleRequest, Category, CreateCategoryRequest,
        CreateProductRequest, LoginRequest, MessageResponse, Product, ProductPageResponse,
        RefreshTokenRequest, SignUpRequest, TokenPairResponse, UpdateCategoryRequest,
        UpdateProductRequest, UserResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod categories;
pub mod health;
pub mod products;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/me", get(users::get_current_user))
        .route("/users/{id}", delete(users::delete_user))
        .route("/users/{id}/roles", patch(users::assign_role))
        .route("/health", get(health::health))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::sign_up,
        auth::login,
        auth::refresh_token,
        categories::create_category,
        categories::list_categories,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        products::create_product,
        products::list_products,
        products::get_product,
        products::update_product,
        products::delete_product,
        users::get_current_user,
        users::list_users,
        users::create_user,
        users::assign_role,
        users::delete_user,
        health::health
    ),
    components(
        schemas(
            SignUpRequest,
            LoginRequest,
            RefreshTokenRequest,
            MessageResponse,
            TokenPairResponse,
            AccessTokenResponse,
            UserResponse,
            AssignRoleRequest,
            Category,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            ProductPageResponse
        )
    ),
    tags(
        (name = "Auth", description = "Sign-up, login, and token refresh"),
        (name = "Categories", description = "Category management"),
        (name = "Products", description = "Product catalog"),
        (name = "Users", description = "User management (admin)"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;
