// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::storage::Storage;

/// Shared application state handed to every handler.
///
/// The storage handle and token issuer are both cheap to clone; the signing
/// secret inside the issuer is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(storage: Storage, tokens: TokenIssuer) -> Self {
        Self {
            storage,
            tokens: Arc::new(tokens),
        }
    }
}
