// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! Gateway failure taxonomy.
//!
//! Directory transport failures and auth rejections are remapped into these
//! variants at the orchestrator boundary; raw transport errors never reach
//! a handler or a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Bad credentials, a rejected session token, or a directory 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Directory unreachable or answering 503.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Malformed request body.
    #[error("{0}")]
    Validation(String),

    /// Any other non-2xx from the directory, its error body preserved.
    #[error("{0}")]
    Upstream(String),

    /// Unexpected internal fault (e.g. token signing).
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
