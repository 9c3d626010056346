// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for record storage | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `JWT_SECRET` | HS256 signing secret for all tokens | `fallback-secret-key` (insecure) |
//! | `ACCESS_TOKEN_TTL_SECS` | Access token lifetime in seconds | `3600` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the data directory path.
///
/// All user, category, and product records are stored here as JSON files.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default data directory when `DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Environment variable name for the token signing secret.
///
/// Rotating this secret invalidates every outstanding access and refresh
/// token. There is no key rollover; that is an explicit operational
/// trade-off.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Fallback signing secret used when `JWT_SECRET` is unset.
///
/// Deploying with this value is a security risk; startup logs a warning
/// when it is in effect.
pub const FALLBACK_JWT_SECRET: &str = "fallback-secret-key";

/// Environment variable name for the access token lifetime.
pub const ACCESS_TOKEN_TTL_ENV: &str = "ACCESS_TOKEN_TTL_SECS";

/// Default access token lifetime in seconds (1 hour).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 3600;
