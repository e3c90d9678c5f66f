// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! Axum extractor for the caller's session.
//!
//! Use the `Session` extractor in handlers that relay to the directory:
//!
//! ```rust,ignore
//! async fn my_handler(Session(session): Session) -> impl IntoResponse {
//!     // session.id keys the caller's cached credentials
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::GatewayError;
use crate::state::AppState;

use super::claim::Claim;
use super::token::JTI_CLAIM;

/// The verified caller session recovered from a bearer token.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Session id: the token's unique `jti` claim. Scopes the caller's
    /// entries in the credential cache.
    pub id: String,
    /// Claim set embedded in the presented token.
    pub claims: Vec<Claim>,
}

/// Extractor that requires a valid session token in the
/// `Authorization: Bearer` header.
pub struct Session(pub SessionContext);

impl FromRequestParts<AppState> for Session {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                GatewayError::Unauthorized("Authorization header is required".to_string())
            })?
            .to_str()
            .map_err(|_| GatewayError::Unauthorized("Invalid authorization header".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            GatewayError::Unauthorized(
                "Invalid authorization header format (expected 'Bearer <token>')".to_string(),
            )
        })?;

        let outcome = state.auth.validate_token(token);
        if !outcome.is_valid {
            return Err(GatewayError::Unauthorized(
                outcome
                    .error_message
                    .unwrap_or_else(|| "Invalid or expired token".to_string()),
            ));
        }

        let id = outcome
            .claims
            .iter()
            .find(|c| c.claim_type == JTI_CLAIM)
            .map(|c| c.value.clone())
            .ok_or_else(|| {
                GatewayError::Unauthorized("Token is missing its session id".to_string())
            })?;

        Ok(Session(SessionContext {
            id,
            claims: outcome.claims,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::service::AuthService;
    use crate::auth::token::TokenService;
    use crate::cache::CredentialCache;
    use crate::directory::DirectoryClient;
    use axum::http::Request;
    use std::sync::Arc;
    use url::Url;

    fn test_state() -> (AppState, TokenService) {
        let tokens = TokenService::new("session-test-secret", "auth-gateway", "gateway-clients", 60);
        let directory = DirectoryClient::new(Url::parse("http://directory.invalid/").unwrap());
        let auth = AuthService::new(directory.clone(), tokens.clone(), Arc::new(CredentialCache::new()));
        (AppState::new(auth, directory), tokens)
    }

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn session_requires_auth_header() {
        let (state, _) = test_state();
        let mut parts = parts_with_header(None);

        let result = Session::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(GatewayError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn session_rejects_non_bearer_header() {
        let (state, _) = test_state();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz".to_string()));

        let result = Session::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(GatewayError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn session_rejects_invalid_token() {
        let (state, _) = test_state();
        let mut parts = parts_with_header(Some("Bearer not-a-jwt".to_string()));

        let result = Session::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(GatewayError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn session_id_is_the_token_jti() {
        let (state, tokens) = test_state();
        let minted = tokens.mint(&[Claim::new("role", "Admin")]).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {}", minted.token)));

        let Session(session) = Session::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(session.id, minted.jti);
        assert!(session.claims.iter().any(|c| c.claim_type == "role"));
    }
}
