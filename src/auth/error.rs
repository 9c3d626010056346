// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.
//!
//! Credential and token failures deliberately collapse their internal
//! cause (unknown email vs wrong password; malformed vs expired vs
//! revoked token) into a single user-visible error so callers cannot
//! probe which factor failed. The role check is the one verbose error:
//! the caller is already authenticated at that point.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::roles::Role;

/// Authentication error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Invalid authorization header format
    InvalidAuthHeader,
    /// Token failed verification (malformed, bad signature, expired, or
    /// its subject no longer exists)
    InvalidToken,
    /// Login failed (unknown email or wrong password)
    InvalidCredentials,
    /// Refresh token failed verification or does not match the stored copy
    InvalidRefreshToken,
    /// Email is already registered
    DuplicateEmail,
    /// Authenticated, but the role does not permit this operation
    InsufficientRole { required: Vec<Role>, actual: Role },
    /// Internal error (e.g. hashing failure); never treated as a mismatch
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidRefreshToken => "invalid_refresh_token",
            AuthError::DuplicateEmail => "duplicate_email",
            AuthError::InsufficientRole { .. } => "insufficient_role",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidToken => write!(f, "Invalid or expired token"),
            AuthError::InvalidCredentials => write!(f, "invalid email or password"),
            AuthError::InvalidRefreshToken => write!(f, "Invalid refresh token"),
            AuthError::DuplicateEmail => write!(f, "Email is already registered"),
            AuthError::InsufficientRole { required, actual } => {
                let required = required
                    .iter()
                    .map(Role::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Required roles: {required}, User role: {actual}")
            }
            AuthError::Internal(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
