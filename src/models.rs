// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! # API Data Models
//!
//! Request and response structures for the exposed REST API and the
//! user-directory wire contract. All types derive `Serialize`/`Deserialize`
//! and `ToSchema` for JSON handling and OpenAPI documentation.
//!
//! Bodies are camelCase on the wire; the claim object inside them keeps its
//! own PascalCase format (see [`crate::auth::claim`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::claim::Claim;

// =============================================================================
// Login
// =============================================================================

/// Credentials presented to `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User's email.
    pub email: String,
    /// User's password.
    pub password: String,
}

/// Successful login result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed session token carrying the user's claims.
    pub token: String,
    /// Instant at which the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: UserInfo,
}

/// User identity returned alongside a fresh session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: String,
    /// Display name, taken from the `fullName` claim; empty when absent.
    pub full_name: String,
}

// =============================================================================
// Token validation
// =============================================================================

/// Body of `POST /api/auth/validate-token`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationRequest {
    pub token: String,
}

/// Outcome of verifying a session token.
///
/// Verification failures are absorbed into `is_valid = false` with an empty
/// claim set; this type never carries a transport or crypto error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub claims: Vec<Claim>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TokenValidation {
    /// A positive result carrying the token's claim set.
    pub fn valid(claims: Vec<Claim>) -> Self {
        Self {
            is_valid: true,
            claims,
            error_message: None,
        }
    }

    /// A negative result with an operator-readable reason.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            claims: Vec::new(),
            error_message: Some(message.into()),
        }
    }
}

// =============================================================================
// Directory user models
// =============================================================================

/// User record as the directory reports it.
///
/// The gateway passes these through unchanged; every field is defaulted so a
/// directory running a newer schema does not break deserialization.
/// (`surename` is the directory's own spelling.)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surename: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Body of `POST /api/auth/Register`, forwarded to the directory verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surename: String,
}

/// Partial update for `PUT /api/auth/update-user`.
///
/// Absent means "leave unchanged"; [`UpdateUserRequest::normalized`] folds
/// empty strings into absence so they are never sent as "clear this field".
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surename: Option<String>,
}

impl UpdateUserRequest {
    /// Drop fields that are empty or whitespace, so the outgoing payload
    /// only names fields the caller actually set.
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        Self {
            email: non_empty(self.email),
            password: non_empty(self.password),
            name: non_empty(self.name),
            surename: non_empty(self.surename),
        }
    }
}

/// Query for `GET /api/auth/UserFilter`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterQuery {
    /// Match on user name.
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Match on email address.
    #[serde(rename = "Email")]
    pub email: Option<String>,
    /// Match on the enabled/disabled flag.
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl UserFilterQuery {
    /// Query parameters for the directory call. Only populated fields are
    /// emitted; empty strings count as absent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("Name", name.to_string()));
        }
        if let Some(email) = self.email.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("Email", email.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("isActive", active.to_string()));
        }
        pairs
    }
}
