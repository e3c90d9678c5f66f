// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! Authentication and user-management endpoints.
//!
//! Thin handlers: request shape checks happen here, everything else is the
//! orchestrator's job. Route casing mirrors the directory's own endpoints so
//! the routing layer in front can forward paths mechanically.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::Session;
use crate::error::GatewayError;
use crate::models::{
    LoginRequest, LoginResponse, RegisterRequest, TokenValidation, TokenValidationRequest,
    UpdateUserRequest, UserFilterQuery, UserView,
};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetUserParams {
    /// Id of the user to fetch.
    pub id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EnableDisableParams {
    /// Id of the user to enable or disable.
    #[serde(rename = "Id")]
    pub id: String,
}

/// Authenticate and receive a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "User directory unavailable"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, GatewayError> {
    if request.email.trim().is_empty() || request.password.trim().is_empty() {
        return Err(GatewayError::Validation(
            "email and password are required".to_string(),
        ));
    }

    state.auth.login(request).await.map(Json)
}

/// Fetch a single user from the directory.
#[utoipa::path(
    get,
    path = "/api/auth/GetUser",
    tag = "Auth",
    security(("bearer" = [])),
    params(GetUserParams),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 401, description = "Missing or rejected session token"),
        (status = 503, description = "User directory unavailable"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Session(session): Session,
    Query(params): Query<GetUserParams>,
) -> Result<Json<UserView>, GatewayError> {
    state.auth.get_user(&session.id, &params.id).await.map(Json)
}

/// List every user in the directory.
#[utoipa::path(
    get,
    path = "/api/auth/GetAll",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [UserView]),
        (status = 401, description = "Missing or rejected session token"),
        (status = 503, description = "User directory unavailable"),
    )
)]
pub async fn get_all(
    State(state): State<AppState>,
    Session(session): Session,
) -> Result<Json<Vec<UserView>>, GatewayError> {
    state.auth.get_all(&session.id).await.map(Json)
}

/// Partially update a user. Empty fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/auth/update-user",
    tag = "Auth",
    security(("bearer" = [])),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserView),
        (status = 401, description = "Missing or rejected session token"),
        (status = 503, description = "User directory unavailable"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, GatewayError> {
    state.auth.update_user(&session.id, request).await.map(Json)
}

/// Toggle a user's enabled/disabled state.
#[utoipa::path(
    put,
    path = "/api/auth/enable-disable",
    tag = "Auth",
    security(("bearer" = [])),
    params(EnableDisableParams),
    responses(
        (status = 200, description = "State toggled"),
        (status = 401, description = "Missing or rejected session token"),
        (status = 503, description = "User directory unavailable"),
    )
)]
pub async fn enable_disable(
    State(state): State<AppState>,
    Session(session): Session,
    Query(params): Query<EnableDisableParams>,
) -> Result<StatusCode, GatewayError> {
    state.auth.enable_disable(&session.id, &params.id).await?;
    Ok(StatusCode::OK)
}

/// Register a new user.
///
/// Kept deliberately blunt: any failure surfaces as a 500 with the raw
/// message, matching the established contract for this route.
#[utoipa::path(
    post,
    path = "/api/auth/Register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Created user", body = UserView),
        (status = 500, description = "Registration failed"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserView>, GatewayError> {
    match state.auth.register(request).await {
        Ok(user) => Ok(Json(user)),
        Err(err) => Err(GatewayError::Internal(err.to_string())),
    }
}

/// Filter directory users by name, email and/or active state.
#[utoipa::path(
    get,
    path = "/api/auth/UserFilter",
    tag = "Auth",
    security(("bearer" = [])),
    params(UserFilterQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserView]),
        (status = 401, description = "Missing or rejected session token"),
        (status = 503, description = "User directory unavailable"),
    )
)]
pub async fn user_filter(
    State(state): State<AppState>,
    Session(session): Session,
    Query(query): Query<UserFilterQuery>,
) -> Result<Json<Vec<UserView>>, GatewayError> {
    state.auth.filter_users(&session.id, query).await.map(Json)
}

/// Verify a session token without touching the directory.
#[utoipa::path(
    post,
    path = "/api/auth/validate-token",
    tag = "Auth",
    request_body = TokenValidationRequest,
    responses(
        (status = 200, description = "Verification outcome", body = TokenValidation),
    )
)]
pub async fn validate_token(
    State(state): State<AppState>,
    Json(request): Json<TokenValidationRequest>,
) -> Json<TokenValidation> {
    Json(state.auth.validate_token(&request.token))
}
