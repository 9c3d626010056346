// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use relational_commerce_server::{
    api::router,
    auth::TokenIssuer,
    config::{
        ACCESS_TOKEN_TTL_ENV, DATA_DIR_ENV, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_DATA_DIR,
        FALLBACK_JWT_SECRET, JWT_SECRET_ENV,
    },
    state::AppState,
    storage::{Storage, StoragePaths},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Initialize record storage
    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let mut storage = Storage::new(StoragePaths::new(&data_dir));
    storage
        .initialize()
        .expect("Failed to initialize storage directories");
    tracing::info!("Storage initialized at {data_dir}");

    // Signing secret is loaded once here and injected into the issuer;
    // rotating it invalidates all outstanding tokens.
    let secret = env::var(JWT_SECRET_ENV).unwrap_or_else(|_| {
        tracing::warn!(
            "{JWT_SECRET_ENV} is not set; using the insecure fallback secret. \
             Do not deploy this configuration."
        );
        FALLBACK_JWT_SECRET.to_string()
    });

    let access_ttl: i64 = env::var(ACCESS_TOKEN_TTL_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS);

    let state = AppState::new(storage, TokenIssuer::new(&secret, access_ttl));
    let app = router(state);

    // Parse bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Relational Commerce server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .await
        .expect("HTTP server failed");
}
