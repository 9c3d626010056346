// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed token issuance and verification.
//!
//! Access and refresh tokens share one claim shape and one HS256 signing
//! secret; they differ only in lifetime. The secret is injected at
//! construction and is process-wide configuration: rotating it invalidates
//! every outstanding token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::error::AuthError;
use crate::storage::StoredUser;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Refresh token lifetime policy.
///
/// The two paths have historically carried different lifetimes and are
/// kept as distinct named policies rather than unified: login issues
/// 7-day refresh tokens, sign-up issued 10-day ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenPolicy {
    /// Issued by login: 7 days
    Login,
    /// Issued by sign-up: 10 days
    SignUp,
}

impl RefreshTokenPolicy {
    /// Lifetime granted under this policy.
    pub fn ttl(&self) -> Duration {
        match self {
            RefreshTokenPolicy::Login => Duration::days(7),
            RefreshTokenPolicy::SignUp => Duration::days(10),
        }
    }
}

/// Issues and verifies signed, time-bounded tokens.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the given signing secret and access token
    /// lifetime in seconds.
    pub fn new(secret: &str, access_ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(access_ttl_secs),
        }
    }

    /// Issue a short-lived access token for a user.
    pub fn issue_access(&self, user: &StoredUser) -> Result<String, AuthError> {
        self.issue(user, self.access_ttl)
    }

    /// Issue a refresh token under the given lifetime policy.
    pub fn issue_refresh(
        &self,
        user: &StoredUser,
        policy: RefreshTokenPolicy,
    ) -> Result<String, AuthError> {
        self.issue(user, policy.ttl())
    }

    fn issue(&self, user: &StoredUser, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Malformed, tampered, and expired tokens all fail the same way;
    /// there is no partial-trust mode.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}
