// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role-based authorization policy.
//!
//! Each protected handler declares the set of roles allowed to invoke it
//! and checks the caller explicitly:
//!
//! ```rust,ignore
//! const CATEGORY_WRITE_ROLES: &[Role] = &[Role::Admin, Role::Manager];
//!
//! async fn create_category(Auth(user): Auth, ...) -> Result<..., ApiError> {
//!     require_role(&user, CATEGORY_WRITE_ROLES)?;
//!     ...
//! }
//! ```
//!
//! The check is layered on top of the authentication gate, not a
//! substitute for it: an empty allowed set admits any caller the gate has
//! already authenticated.

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use super::roles::Role;

/// Check that the authenticated user's role is in the allowed set.
///
/// An empty set means "any authenticated identity". The denial error
/// names both the required roles and the caller's actual role; the caller
/// is already authenticated, so that is operational help rather than an
/// information leak.
pub fn require_role(user: &AuthenticatedUser, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.is_empty() || allowed.contains(&user.role) {
        return Ok(());
    }

    Err(AuthError::InsufficientRole {
        required: allowed.to_vec(),
        actual: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: "u-1".to_string(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            role,
        }
    }

    #[test]
    fn empty_set_admits_any_authenticated_user() {
        for role in [Role::Admin, Role::Manager, Role::Client] {
            assert!(require_role(&user_with_role(role), &[]).is_ok());
        }
    }

    #[test]
    fn member_role_is_admitted() {
        let allowed = [Role::Admin, Role::Manager];
        assert!(require_role(&user_with_role(Role::Admin), &allowed).is_ok());
        assert!(require_role(&user_with_role(Role::Manager), &allowed).is_ok());
    }

    #[test]
    fn non_member_role_is_refused_verbosely() {
        let err = require_role(&user_with_role(Role::Client), &[Role::Admin, Role::Manager])
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::InsufficientRole {
                required: vec![Role::Admin, Role::Manager],
                actual: Role::Client,
            }
        );
        let message = err.to_string();
        assert!(message.contains("admin"));
        assert!(message.contains("manager"));
        assert!(message.contains("client"));
    }

    #[test]
    fn admin_is_not_implicitly_admitted_everywhere() {
        // Membership is literal: an Admin is refused where only Client is listed
        let err = require_role(&user_with_role(Role::Admin), &[Role::Client]).unwrap_err();
        assert!(matches!(err, AuthError::InsufficientRole { .. }));
    }
}
