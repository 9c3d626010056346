// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication endpoints: sign-up, login, refresh.

use axum::{extract::State, Json};

use crate::{
    auth::AuthService,
    error::ApiError,
    models::{
        AccessTokenResponse, LoginRequest, MessageResponse, RefreshTokenRequest, SignUpRequest,
        TokenPairResponse,
    },
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Malformed input"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let service = AuthService::new(&state.storage, &state.tokens);
    let user = service.sign_up(&request.name, &request.email, &request.password, request.role)?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Access and refresh tokens", body = TokenPairResponse),
        (status = 401, description = "Invalid email or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    request.validate()?;

    let service = AuthService::new(&state.storage, &state.tokens);
    let pair = service.login(&request.email, &request.password)?;

    Ok(Json(TokenPairResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    request_body = RefreshTokenRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Invalid refresh token"),
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let service = AuthService::new(&state.storage, &state.tokens);
    let access_token = service.refresh(&request.refresh_token)?;

    Ok(Json(AccessTokenResponse { access_token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::categories::{delete_category, list_categories};
    use crate::auth::{Auth, TokenIssuer};
    use crate::storage::{CategoryRepository, Storage, StoragePaths, StoredCategory};
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;

    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = Storage::new(paths);
        storage.initialize().expect("Failed to initialize storage");

        let state = AppState::new(storage, TokenIssuer::new("test-secret", 3600));
        (state, temp_dir)
    }

    fn sign_up_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "pass".to_string(),
            role: None,
        }
    }

    async fn authenticate(state: &AppState, access_token: &str) -> Auth {
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", format!("Bearer {access_token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;
        use axum::extract::FromRequestParts;
        Auth::from_request_parts(&mut parts, state)
            .await
            .expect("authentication succeeds")
    }

    #[tokio::test]
    async fn sign_up_returns_confirmation_without_tokens() {
        let (state, _dir) = create_test_state();

        let Json(response) = sign_up(State(state), Json(sign_up_request("a@x.com")))
            .await
            .unwrap();
        assert_eq!(response.message, "User registered successfully");
    }

    #[tokio::test]
    async fn sign_up_rejects_short_password() {
        let (state, _dir) = create_test_state();

        let mut request = sign_up_request("a@x.com");
        request.password = "abc".to_string();

        let err = sign_up(State(state), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sign_up_rejects_malformed_email() {
        let (state, _dir) = create_test_state();

        let err = sign_up(State(state), Json(sign_up_request("not-an-email")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Please enter a correct email");
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_conflict() {
        let (state, _dir) = create_test_state();

        sign_up(State(state.clone()), Json(sign_up_request("dup@x.com")))
            .await
            .unwrap();
        let err = sign_up(State(state), Json(sign_up_request("dup@x.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_returns_token_pair() {
        let (state, _dir) = create_test_state();

        sign_up(State(state.clone()), Json(sign_up_request("a@x.com")))
            .await
            .unwrap();

        let Json(pair) = login(
            State(state),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pass".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn login_with_bad_credentials_is_unauthorized() {
        let (state, _dir) = create_test_state();

        sign_up(State(state.clone()), Json(sign_up_request("a@x.com")))
            .await
            .unwrap();

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "invalid email or password");
    }

    #[tokio::test]
    async fn refresh_mints_new_access_token() {
        let (state, _dir) = create_test_state();

        sign_up(State(state.clone()), Json(sign_up_request("a@x.com")))
            .await
            .unwrap();
        let Json(pair) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pass".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(refreshed) = refresh_token(
            State(state),
            Json(RefreshTokenRequest {
                refresh_token: pair.refresh_token,
            }),
        )
        .await
        .unwrap();
        assert!(!refreshed.access_token.is_empty());
    }

    #[tokio::test]
    async fn refresh_with_garbage_is_unauthorized() {
        let (state, _dir) = create_test_state();

        let err = refresh_token(
            State(state),
            Json(RefreshTokenRequest {
                refresh_token: "junk".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid refresh token");
    }

    /// Full session scenario: sign up, log in, read the catalog as a
    /// client, then hit an admin-only delete with the same token.
    #[tokio::test]
    async fn client_session_reads_but_cannot_delete() {
        let (state, _dir) = create_test_state();

        let category = StoredCategory::new("Books", "Printed matter");
        CategoryRepository::new(&state.storage)
            .create(&category)
            .unwrap();

        sign_up(State(state.clone()), Json(sign_up_request("a@x.com")))
            .await
            .unwrap();
        let Json(pair) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pass".to_string(),
            }),
        )
        .await
        .unwrap();

        // Client-readable operation succeeds
        let auth = authenticate(&state, &pair.access_token).await;
        let Json(categories) = list_categories(auth, State(state.clone())).await.unwrap();
        assert_eq!(categories.len(), 1);

        // Admin-only delete with the same token is forbidden
        let auth = authenticate(&state, &pair.access_token).await;
        let err = delete_category(
            auth,
            State(state),
            axum::extract::Path(category.id.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
