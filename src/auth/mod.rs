// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential authentication, JWT session lifecycle, and role-based
//! authorization for the Relational Commerce API.
//!
//! ## Auth Flow
//!
//! 1. Client signs up with name/email/password; the password is stored
//!    only as a bcrypt digest. No tokens are issued at sign-up.
//! 2. Client logs in and receives an access token (short-lived) and a
//!    refresh token (7 days). The refresh token is also persisted on the
//!    user record; each login overwrites it, revoking prior sessions.
//! 3. Requests carry `Authorization: Bearer <access token>`. The server
//!    verifies signature and expiry, resolves the user record, and hands
//!    the resolved identity to the handler.
//! 4. `POST /auth/refresh-token` mints a new access token when the
//!    presented refresh token verifies AND matches the stored copy.
//!
//! ## Security
//!
//! - Unknown email and wrong password surface the identical error
//! - All token-verification failures collapse into one unauthenticated
//!   error; only the role check (`Forbidden`) is verbose
//! - Tokens are signed with a process-wide HS256 secret injected at
//!   startup; rotating it invalidates all outstanding tokens
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod policy;
pub mod roles;
pub mod service;
pub mod tokens;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use policy::require_role;
pub use roles::Role;
pub use service::{AuthService, TokenPair};
pub use tokens::{RefreshTokenPolicy, TokenIssuer};
