// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use tracing_subscriber::EnvFilter;

use auth_gateway::api::router;
use auth_gateway::auth::{AuthService, TokenService};
use auth_gateway::cache::CredentialCache;
use auth_gateway::config::{Config, LOG_FORMAT_ENV};
use auth_gateway::directory::DirectoryClient;
use auth_gateway::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("configuration error: {err}");
        std::process::exit(1);
    });

    let tokens = TokenService::new(
        &config.jwt_secret,
        &config.jwt_issuer,
        &config.jwt_audience,
        config.jwt_expiration_minutes,
    );
    let directory = DirectoryClient::new(config.directory_base_url.clone());
    let auth = AuthService::new(directory.clone(), tokens, Arc::new(CredentialCache::new()));

    let state = AppState::new(auth, directory);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    match (&config.tls_cert_path, &config.tls_key_path) {
        (Some(cert), Some(key)) => {
            let tls_config = RustlsConfig::from_pem_file(cert, key)
                .await
                .expect("Failed to load TLS certificate");

            tracing::info!(%addr, directory = %config.directory_base_url, "listening (https, docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await
                .expect("HTTPS server failed");
        }
        _ => {
            tracing::info!(%addr, directory = %config.directory_base_url, "listening (http, docs at /docs)");
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
                .expect("HTTP server failed");
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if std::env::var(LOG_FORMAT_ENV).as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
