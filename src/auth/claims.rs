// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;
use crate::storage::StoredUser;

/// Claim set carried by both access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Email at issuance time
    pub email: String,
    /// Role at issuance time
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Unique token id. Keeps two logins in the same second from minting
    /// identical refresh tokens, which would defeat revocation-on-replace.
    pub jti: String,
}

/// Authenticated user resolved by the authentication gate.
///
/// This is the primary type handlers receive for the caller's identity.
/// It is built from the stored user record, not from the token claims, so
/// role changes take effect on the next request rather than at the next
/// token refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Current role
    pub role: Role,
}

impl From<StoredUser> for AuthenticatedUser {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
