// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository: the credential store for identity records.
//!
//! Each user is stored as a separate JSON file under `{DATA_DIR}/users/`.
//! Email uniqueness is enforced here at creation time; a duplicate-email
//! create fails without writing anything. Email comparison is
//! case-sensitive exact match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

use super::super::{Storage, StorageError, StorageResult};

/// Identity record kept in the credential store.
///
/// `password_hash` is a bcrypt digest; the plaintext is never stored.
/// `refresh_token` holds the single currently valid refresh token for this
/// identity, overwritten on every login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID), assigned at creation, immutable
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// bcrypt digest of the password
    pub password_hash: String,
    /// Authorization role
    pub role: Role,
    /// Currently valid refresh token, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Build a new record with a fresh id and no active session.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            refresh_token: None,
            created_at: Utc::now(),
        }
    }
}

/// Repository for user operations on record storage.
pub struct UserRepository<'a> {
    storage: &'a Storage,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Get a user by email (case-sensitive exact match).
    pub fn get_by_email(&self, email: &str) -> StorageResult<StoredUser> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        for id in user_ids {
            if let Ok(user) = self.get(&id) {
                if user.email == email {
                    return Ok(user);
                }
            }
        }

        Err(StorageError::NotFound(format!("User with email {email}")))
    }

    /// Create a new user.
    ///
    /// Fails with `AlreadyExists` if the email is already registered,
    /// without mutating state.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        let user_id = &user.id;

        if self.exists(user_id) {
            return Err(StorageError::AlreadyExists(format!("User {user_id}")));
        }

        if self.get_by_email(&user.email).is_ok() {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {}",
                user.email
            )));
        }

        self.storage
            .write_json(self.storage.paths().user(user_id), user)
    }

    /// Update an existing user.
    pub fn update(&self, user: &StoredUser) -> StorageResult<()> {
        let user_id = &user.id;

        if !self.exists(user_id) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }

        self.storage
            .write_json(self.storage.paths().user(user_id), user)
    }

    /// Replace the stored refresh token unconditionally (last writer wins).
    pub fn update_refresh_token(&self, user_id: &str, token: &str) -> StorageResult<()> {
        let mut user = self.get(user_id)?;
        user.refresh_token = Some(token.to_string());
        self.update(&user)
    }

    /// Assign a new role to a user.
    pub fn update_role(&self, user_id: &str, role: Role) -> StorageResult<StoredUser> {
        let mut user = self.get(user_id)?;
        user.role = role;
        self.update(&user)?;
        Ok(user)
    }

    /// Delete a user.
    pub fn delete(&self, user_id: &str) -> StorageResult<()> {
        if !self.exists(user_id) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }

        self.storage.delete(self.storage.paths().user(user_id))
    }

    /// List all users (admin view).
    pub fn list_all(&self) -> StorageResult<Vec<StoredUser>> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        let mut users = Vec::new();
        for id in user_ids {
            if let Ok(user) = self.get(&id) {
                users.push(user);
            }
        }
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = Storage::new(paths);
        storage.initialize().expect("Failed to initialize");
        (storage, temp_dir)
    }

    fn test_user(email: &str) -> StoredUser {
        StoredUser::new("Test User", email, "$2b$10$fakehash", Role::Client)
    }

    #[test]
    fn create_and_get_user() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("a@x.com");
        repo.create(&user).unwrap();

        let loaded = repo.get(&user.id).unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn get_by_email_is_case_sensitive() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("Casey@x.com");
        repo.create(&user).unwrap();

        assert_eq!(repo.get_by_email("Casey@x.com").unwrap().id, user.id);
        assert!(matches!(
            repo.get_by_email("casey@x.com"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_email_rejected_without_mutation() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        repo.create(&test_user("dup@x.com")).unwrap();

        let result = repo.create(&test_user("dup@x.com"));
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));

        // Exactly one record for that email remains
        let users = repo.list_all().unwrap();
        assert_eq!(
            users.iter().filter(|u| u.email == "dup@x.com").count(),
            1
        );
    }

    #[test]
    fn update_refresh_token_overwrites() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("r@x.com");
        repo.create(&user).unwrap();

        repo.update_refresh_token(&user.id, "first").unwrap();
        assert_eq!(
            repo.get(&user.id).unwrap().refresh_token.as_deref(),
            Some("first")
        );

        repo.update_refresh_token(&user.id, "second").unwrap();
        assert_eq!(
            repo.get(&user.id).unwrap().refresh_token.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn update_role_persists() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("role@x.com");
        repo.create(&user).unwrap();

        let updated = repo.update_role(&user.id, Role::Manager).unwrap();
        assert_eq!(updated.role, Role::Manager);
        assert_eq!(repo.get(&user.id).unwrap().role, Role::Manager);
    }

    #[test]
    fn delete_missing_user_errors() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        assert!(matches!(
            repo.delete("nope"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn list_all_returns_every_user() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        repo.create(&test_user("one@x.com")).unwrap();
        repo.create(&test_user("two@x.com")).unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 2);
    }
}
