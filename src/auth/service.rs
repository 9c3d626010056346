// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session manager: sign-up, login, and token refresh.
//!
//! Orchestrates the password hasher, the credential store, and the token
//! issuer. Holds no state of its own; construct one per request.

use super::error::AuthError;
use super::password::{hash_password, verify_password};
use super::roles::Role;
use super::tokens::{RefreshTokenPolicy, TokenIssuer};
use crate::storage::{Storage, StorageError, StoredUser, UserRepository};

/// Access + refresh token pair returned by login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Session lifecycle operations over the credential store.
pub struct AuthService<'a> {
    storage: &'a Storage,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage, tokens: &'a TokenIssuer) -> Self {
        Self { storage, tokens }
    }

    /// Register a new user.
    ///
    /// The role defaults to Client when not supplied. No tokens are
    /// issued; the caller must log in to start a session.
    pub fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<StoredUser, AuthError> {
        let password_hash = hash_password(password)?;
        let user = StoredUser::new(name, email, password_hash, role.unwrap_or_default());

        let repo = UserRepository::new(self.storage);
        repo.create(&user).map_err(|e| match e {
            StorageError::AlreadyExists(_) => AuthError::DuplicateEmail,
            other => AuthError::Internal(other.to_string()),
        })?;

        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// Issues an access token and a 7-day refresh token, and persists the
    /// refresh token on the user record, overwriting any prior one. The
    /// error for an unknown email is identical to the error for a wrong
    /// password.
    pub fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let repo = UserRepository::new(self.storage);

        let user = repo
            .get_by_email(email)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access(&user)?;
        let refresh_token = self
            .tokens
            .issue_refresh(&user, RefreshTokenPolicy::Login)?;

        // Prior sessions' refresh tokens stop working here even though
        // they still verify cryptographically: refresh() checks the
        // stored copy.
        repo.update_refresh_token(&user.id, &refresh_token)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The presented token must verify AND exactly equal the stored copy
    /// for its subject. The stored token is left unchanged; only a new
    /// login rotates it.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self
            .tokens
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let repo = UserRepository::new(self.storage);
        let user = repo
            .get(&claims.sub)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AuthError::InvalidRefreshToken);
        }

        self.tokens.issue_access(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_env() -> (Storage, TokenIssuer, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = Storage::new(paths);
        storage.initialize().expect("Failed to initialize");
        (storage, TokenIssuer::new("test-secret", 3600), temp_dir)
    }

    #[test]
    fn sign_up_defaults_to_client_role() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        let user = service.sign_up("A", "a@x.com", "pass", None).unwrap();
        assert_eq!(user.role, Role::Client);

        let supplied = service
            .sign_up("B", "b@x.com", "pass", Some(Role::Manager))
            .unwrap();
        assert_eq!(supplied.role, Role::Manager);
    }

    #[test]
    fn sign_up_never_stores_plaintext() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        let a = service.sign_up("A", "a@x.com", "pass", None).unwrap();
        let b = service.sign_up("B", "b@x.com", "pass", None).unwrap();

        assert_ne!(a.password_hash, "pass");
        // Salted: same plaintext, different digests
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[test]
    fn sign_up_duplicate_email_fails_and_keeps_one_record() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        service.sign_up("A", "dup@x.com", "pass", None).unwrap();
        let err = service
            .sign_up("B", "dup@x.com", "other", None)
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);

        let repo = UserRepository::new(&storage);
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn login_then_refresh_yields_matching_identity() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        let user = service.sign_up("A", "a@x.com", "pass", None).unwrap();
        let pair = service.login("a@x.com", "pass").unwrap();

        let access = service.refresh(&pair.refresh_token).unwrap();
        let claims = tokens.verify(&access).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[test]
    fn wrong_password_and_unknown_email_are_indistinguishable() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        service.sign_up("A", "a@x.com", "pass", None).unwrap();

        let wrong_password = service.login("a@x.com", "nope").unwrap_err();
        let unknown_email = service.login("ghost@x.com", "pass").unwrap_err();

        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn refresh_is_idempotent_until_next_login() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        service.sign_up("A", "a@x.com", "pass", None).unwrap();
        let pair = service.login("a@x.com", "pass").unwrap();

        service.refresh(&pair.refresh_token).unwrap();
        // A second refresh with the same token still succeeds
        service.refresh(&pair.refresh_token).unwrap();
    }

    #[test]
    fn new_login_revokes_prior_refresh_token() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        service.sign_up("A", "a@x.com", "pass", None).unwrap();
        let first = service.login("a@x.com", "pass").unwrap();
        let second = service.login("a@x.com", "pass").unwrap();

        // The first token still verifies cryptographically but no longer
        // matches the stored copy.
        assert!(tokens.verify(&first.refresh_token).is_ok());
        assert_eq!(
            service.refresh(&first.refresh_token).unwrap_err(),
            AuthError::InvalidRefreshToken
        );

        service.refresh(&second.refresh_token).unwrap();
    }

    #[test]
    fn refresh_rejects_access_token_mismatch() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        service.sign_up("A", "a@x.com", "pass", None).unwrap();
        let pair = service.login("a@x.com", "pass").unwrap();

        // An access token verifies but does not equal the stored refresh token
        assert_eq!(
            service.refresh(&pair.access_token).unwrap_err(),
            AuthError::InvalidRefreshToken
        );
    }

    #[test]
    fn refresh_rejects_garbage() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        assert_eq!(
            service.refresh("junk").unwrap_err(),
            AuthError::InvalidRefreshToken
        );
    }

    #[test]
    fn refresh_rejects_token_for_deleted_user() {
        let (storage, tokens, _dir) = test_env();
        let service = AuthService::new(&storage, &tokens);

        let user = service.sign_up("A", "a@x.com", "pass", None).unwrap();
        let pair = service.login("a@x.com", "pass").unwrap();

        UserRepository::new(&storage).delete(&user.id).unwrap();

        assert_eq!(
            service.refresh(&pair.refresh_token).unwrap_err(),
            AuthError::InvalidRefreshToken
        );
    }
}
