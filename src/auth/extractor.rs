// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users: the authentication gate.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! The gate is stateless and side-effect-free beyond one store lookup:
//! it verifies the bearer token, resolves the user record by the token's
//! subject, and returns the identity as a value for the handler to thread
//! into the authorization policy and onward. Nothing is stashed in
//! ambient state.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use crate::state::AppState;
use crate::storage::UserRepository;

/// Extractor for authenticated users.
///
/// Rejects with a 401 when the header is missing or malformed, when the
/// token fails verification, or when the token's subject no longer
/// exists. All token-verification causes collapse into the same error.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A previously resolved identity (e.g. injected by tests) wins
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = state.tokens.verify(token)?;

        // Resolve the live record; a token for a deleted user is as
        // invalid as a tampered one.
        let user = UserRepository::new(&state.storage)
            .get(&claims.sub)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(Auth(user.into()))
    }
}
