// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DIRECTORY_BASE_URL` | Base URL of the user-directory service | Required |
//! | `JWT_SECRET` | Symmetric signing secret for session tokens | Required |
//! | `JWT_ISSUER` | Issuer written into and expected from tokens | Required |
//! | `JWT_AUDIENCE` | Audience written into and expected from tokens | Required |
//! | `JWT_EXPIRATION_MINUTES` | Session token lifetime | `60` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | Optional |
//! | `TLS_KEY_PATH` | PEM private key | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use url::Url;

/// Environment variable name for the logging format selector.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid {
        name: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub directory_base_url: Url,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_minutes: i64,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", DEFAULT_HOST);
        let port = env_or_default("PORT", DEFAULT_PORT)
            .parse()
            .map_err(|e| invalid("PORT", e))?;

        let directory_base_url = Url::parse(&env_required("DIRECTORY_BASE_URL")?)
            .map_err(|e| invalid("DIRECTORY_BASE_URL", e))?;

        let jwt_secret = env_required("JWT_SECRET")?;
        let jwt_issuer = env_required("JWT_ISSUER")?;
        let jwt_audience = env_required("JWT_AUDIENCE")?;
        let jwt_expiration_minutes = match std::env::var("JWT_EXPIRATION_MINUTES") {
            Ok(value) => value
                .parse()
                .map_err(|e| invalid("JWT_EXPIRATION_MINUTES", e))?,
            Err(_) => DEFAULT_JWT_EXPIRATION_MINUTES,
        };

        Ok(Self {
            host,
            port,
            directory_base_url,
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            jwt_expiration_minutes,
            tls_cert_path: std::env::var("TLS_CERT_PATH").ok(),
            tls_key_path: std::env::var("TLS_KEY_PATH").ok(),
        })
    }
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn invalid(name: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        message: err.to_string(),
    }
}
