// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! HTTP client for the user-directory service.
//!
//! One method per directory endpoint; every call shares the same status
//! mapping (401 → [`DirectoryError::Unauthorized`], 503 →
//! [`DirectoryError::Unavailable`], other non-2xx → [`DirectoryError::Upstream`]
//! with the body preserved) and transport failures surface as
//! [`DirectoryError::Unreachable`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::auth::claim::Claim;
use crate::error::GatewayError;
use crate::models::{RegisterRequest, UpdateUserRequest, UserFilterQuery, UserView};

/// Overall per-call timeout at the directory boundary.
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("User service is currently unavailable")]
    Unreachable(#[source] reqwest::Error),

    #[error("Unauthorized to perform this action")]
    Unauthorized(String),

    #[error("User service is currently unavailable")]
    Unavailable(String),

    #[error("user directory returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("user directory response was invalid: {0}")]
    InvalidResponse(String),
}

/// Credential check sent to the directory's login endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialCheck<'a> {
    email: &'a str,
    password: &'a str,
}

/// Result of a directory credential check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserValidation {
    pub is_valid: bool,
    pub id: String,
    pub email: String,
    pub name: String,
    pub surename: String,
    pub role: String,
    pub claims: Vec<Claim>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: Url,
    http: Client,
}

impl DirectoryClient {
    /// Create a client for the directory at `base_url`.
    pub fn new(mut base_url: Url) -> Self {
        // Endpoint paths are joined onto the base, which requires the
        // trailing slash to be present.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Self {
            base_url,
            http: Client::builder()
                .timeout(CALL_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, DirectoryError> {
        self.base_url
            .join(path)
            .map_err(|e| DirectoryError::InvalidResponse(format!("bad endpoint path {path}: {e}")))
    }

    /// `POST api/User/login`: check credentials, returning the directory's
    /// verdict and claim set.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserValidation, DirectoryError> {
        let url = self.endpoint("api/User/login")?;
        let response = self
            .http
            .post(url)
            .json(&CredentialCheck { email, password })
            .send()
            .await
            .map_err(DirectoryError::Unreachable)?;

        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// `GET api/User/GetUser?Id=`
    pub async fn get_user(&self, token: &str, id: &str) -> Result<UserView, DirectoryError> {
        let url = self.endpoint("api/User/GetUser")?;
        let response = self
            .http
            .get(url)
            .query(&[("Id", id)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(DirectoryError::Unreachable)?;

        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// `GET api/User/GetAll`
    pub async fn get_all(&self, token: &str) -> Result<Vec<UserView>, DirectoryError> {
        let url = self.endpoint("api/User/GetAll")?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(DirectoryError::Unreachable)?;

        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// `PUT api/User/update-user` with a partial payload.
    pub async fn update_user(
        &self,
        token: &str,
        payload: &UpdateUserRequest,
    ) -> Result<UserView, DirectoryError> {
        let url = self.endpoint("api/User/update-user")?;
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(DirectoryError::Unreachable)?;

        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// `PUT api/User/enable-disable/{id}`, no body.
    pub async fn enable_disable(&self, token: &str, id: &str) -> Result<(), DirectoryError> {
        let url = self.endpoint(&format!("api/User/enable-disable/{id}"))?;
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(DirectoryError::Unreachable)?;

        check_status(response).await?;
        Ok(())
    }

    /// `POST api/User/Register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserView, DirectoryError> {
        let url = self.endpoint("api/User/Register")?;
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(DirectoryError::Unreachable)?;

        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// `GET api/User/UserFilter` with only the populated filter fields.
    pub async fn filter_users(
        &self,
        token: &str,
        query: &UserFilterQuery,
    ) -> Result<Vec<UserView>, DirectoryError> {
        let url = self.endpoint("api/User/UserFilter")?;
        let mut request = self.http.get(url).bearer_auth(token);

        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let response = request.send().await.map_err(DirectoryError::Unreachable)?;
        let response = check_status(response).await?;
        decode_json(response).await
    }

    /// Reachability probe for readiness checks. Any HTTP answer counts as
    /// reachable; only a transport failure does not.
    pub async fn ping(&self) -> bool {
        match self.http.get(self.base_url.clone()).send().await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "user directory is unreachable");
                false
            }
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DirectoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => DirectoryError::Unauthorized(body),
        StatusCode::SERVICE_UNAVAILABLE => DirectoryError::Unavailable(body),
        _ => DirectoryError::Upstream { status, body },
    })
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DirectoryError> {
    response
        .json()
        .await
        .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))
}

impl From<DirectoryError> for GatewayError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Unauthorized(_) => {
                GatewayError::Unauthorized("Unauthorized to perform this action".to_string())
            }
            DirectoryError::Unreachable(_) | DirectoryError::Unavailable(_) => {
                GatewayError::ServiceUnavailable(
                    "User service is currently unavailable".to_string(),
                )
            }
            err @ DirectoryError::Upstream { .. } => GatewayError::Upstream(err.to_string()),
            err @ DirectoryError::InvalidResponse(_) => GatewayError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = DirectoryClient::new(Url::parse("http://directory.local/root").unwrap());
        let url = client.endpoint("api/User/login").unwrap();
        assert_eq!(url.as_str(), "http://directory.local/root/api/User/login");
    }

    #[test]
    fn directory_errors_map_to_gateway_taxonomy() {
        let unauthorized: GatewayError = DirectoryError::Unauthorized("body".into()).into();
        assert!(matches!(unauthorized, GatewayError::Unauthorized(_)));

        let unavailable: GatewayError = DirectoryError::Unavailable("body".into()).into();
        assert!(matches!(
            unavailable,
            GatewayError::ServiceUnavailable(m) if m == "User service is currently unavailable"
        ));

        let upstream: GatewayError = DirectoryError::Upstream {
            status: StatusCode::CONFLICT,
            body: "duplicate email".into(),
        }
        .into();
        assert!(matches!(
            upstream,
            GatewayError::Upstream(m) if m.contains("duplicate email")
        ));
    }

    #[test]
    fn user_validation_decodes_with_claims_and_defaults() {
        let body = r#"{
            "isValid": true,
            "id": "u-1",
            "email": "ada@example.com",
            "role": "Admin",
            "claims": [{"Type":"fullName","Value":"Ada Lovelace"}]
        }"#;

        let validation: UserValidation = serde_json::from_str(body).unwrap();
        assert!(validation.is_valid);
        assert_eq!(validation.name, "");
        assert_eq!(validation.claims.len(), 1);
        assert_eq!(validation.claims[0].value, "Ada Lovelace");
    }
}
