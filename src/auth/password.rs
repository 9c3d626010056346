// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification (bcrypt, cost 10).

use super::error::AuthError;

/// bcrypt work factor. Matches the cost the service has always used;
/// changing it only affects newly created digests.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password.
///
/// Salted: the same plaintext produces a different digest on every call.
/// A hashing failure is surfaced as an internal error, never as a
/// verification mismatch.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, BCRYPT_COST).map_err(|e| AuthError::Internal(e.to_string()))
}

/// Verify a plaintext password against a stored digest.
///
/// Returns `false` for a mismatch and also for a malformed digest; this
/// function does not fail.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}
