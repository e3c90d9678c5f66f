// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! Authentication orchestrator.
//!
//! Ties the pieces together: credential validation against the directory,
//! claim-to-token conversion, credential caching, and the relay of
//! authorized user-management calls.
//!
//! ## Session scoping
//!
//! Cached credentials are keyed by the session id (the minted token's `jti`)
//! rather than by a process-wide constant. Concurrent logins therefore get
//! independent slots; a caller can only ever read the service token written
//! by its own login. The old single-slot behavior mixed identities under
//! concurrent logins, which is exactly the failure this layout removes.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::CredentialCache;
use crate::directory::{DirectoryClient, DirectoryError};
use crate::error::GatewayError;
use crate::models::{
    LoginRequest, LoginResponse, RegisterRequest, TokenValidation, UpdateUserRequest, UserFilterQuery,
    UserInfo, UserView,
};

use super::claim::Claim;
use super::token::TokenService;

/// Sentinel returned when no service token is cached for a session.
pub const NO_TOKEN: &str = "no token";

/// Sentinel returned when no user id is cached for a session.
pub const NO_USER: &str = "no user";

/// Cached credentials live shorter than the 60-minute tokens they hold, so
/// a cached token is never used near its expiry.
const CREDENTIAL_TTL: Duration = Duration::from_secs(50 * 60);

/// Claim type carrying the user's display name.
const FULL_NAME_CLAIM: &str = "fullName";

fn service_token_key(session_id: &str) -> String {
    format!("service_token:{session_id}")
}

fn current_user_key(session_id: &str) -> String {
    format!("current_user:{session_id}")
}

pub struct AuthService {
    directory: DirectoryClient,
    tokens: TokenService,
    cache: Arc<CredentialCache>,
}

impl AuthService {
    pub fn new(directory: DirectoryClient, tokens: TokenService, cache: Arc<CredentialCache>) -> Self {
        Self {
            directory,
            tokens,
            cache,
        }
    }

    /// Validate credentials against the directory and mint a session token.
    ///
    /// On success the token and the directory-reported user id are cached
    /// under the new session's keys with a 50-minute TTL.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, GatewayError> {
        let validation = match self
            .directory
            .validate_credentials(&request.email, &request.password)
            .await
        {
            Ok(validation) => validation,
            Err(DirectoryError::Unreachable(err)) => {
                warn!(error = %err, "credential check could not reach the directory");
                return Err(GatewayError::ServiceUnavailable(
                    "User service is currently unavailable".to_string(),
                ));
            }
            Err(_) => {
                return Err(GatewayError::Unauthorized("Authentication failed".to_string()));
            }
        };

        if !validation.is_valid {
            return Err(GatewayError::Unauthorized("Invalid credentials".to_string()));
        }

        // Only type and value survive into the session token; provenance is
        // re-stamped locally at mint time.
        let claims: Vec<Claim> = validation
            .claims
            .iter()
            .map(|c| Claim::new(&c.claim_type, &c.value))
            .collect();

        let minted = self
            .tokens
            .mint(&claims)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        self.cache.set(
            &service_token_key(&minted.jti),
            minted.token.clone(),
            CREDENTIAL_TTL,
        );
        self.cache.set(
            &current_user_key(&minted.jti),
            validation.id.clone(),
            CREDENTIAL_TTL,
        );

        let full_name = validation
            .claims
            .iter()
            .find(|c| c.claim_type == FULL_NAME_CLAIM)
            .map(|c| c.value.clone())
            .unwrap_or_default();

        info!(user_id = %validation.id, session_id = %minted.jti, "login succeeded");

        Ok(LoginResponse {
            token: minted.token,
            expires_at: minted.expires_at,
            user: UserInfo {
                id: validation.id,
                email: validation.email,
                role: validation.role,
                full_name,
            },
        })
    }

    /// The session's cached service token, or the `"no token"` sentinel.
    /// Never fails.
    pub fn service_token(&self, session_id: &str) -> String {
        self.cache
            .get(&service_token_key(session_id))
            .unwrap_or_else(|| NO_TOKEN.to_string())
    }

    /// The session's cached user id, or the `"no user"` sentinel.
    /// Never fails.
    pub fn current_user_id(&self, session_id: &str) -> String {
        self.cache
            .get(&current_user_key(session_id))
            .unwrap_or_else(|| NO_USER.to_string())
    }

    pub async fn get_user(&self, session_id: &str, id: &str) -> Result<UserView, GatewayError> {
        let token = self.service_token(session_id);
        Ok(self.directory.get_user(&token, id).await?)
    }

    pub async fn get_all(&self, session_id: &str) -> Result<Vec<UserView>, GatewayError> {
        let token = self.service_token(session_id);
        Ok(self.directory.get_all(&token).await?)
    }

    /// Relay a partial user update. Empty fields are dropped from the
    /// outgoing payload, so absence means "leave unchanged".
    pub async fn update_user(
        &self,
        session_id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserView, GatewayError> {
        let token = self.service_token(session_id);
        let payload = request.normalized();
        Ok(self.directory.update_user(&token, &payload).await?)
    }

    pub async fn enable_disable(&self, session_id: &str, id: &str) -> Result<(), GatewayError> {
        let token = self.service_token(session_id);
        self.directory.enable_disable(&token, id).await?;
        info!(user_id = %id, "toggled user state");
        Ok(())
    }

    pub async fn filter_users(
        &self,
        session_id: &str,
        query: UserFilterQuery,
    ) -> Result<Vec<UserView>, GatewayError> {
        let token = self.service_token(session_id);
        Ok(self.directory.filter_users(&token, &query).await?)
    }

    /// Register a new user. Anonymous: no bearer credential is attached.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserView, GatewayError> {
        match self.directory.register(&request).await {
            Ok(user) => Ok(user),
            Err(DirectoryError::Unreachable(err)) => {
                warn!(error = %err, "registration could not reach the directory");
                Err(GatewayError::ServiceUnavailable(
                    "User service is currently unavailable".to_string(),
                ))
            }
            Err(_) => Err(GatewayError::Unauthorized("Register failed".to_string())),
        }
    }

    /// Verify a session token. Failures come back as a negative result,
    /// never as an error.
    pub fn validate_token(&self, token: &str) -> TokenValidation {
        self.tokens.verify(token)
    }
}
