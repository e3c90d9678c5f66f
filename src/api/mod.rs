// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::claim::Claim,
    models::{
        LoginRequest, LoginResponse, RegisterRequest, TokenValidation, TokenValidationRequest,
        UpdateUserRequest, UserInfo, UserView,
    },
    state::AppState,
};

pub mod auth;
pub mod health;

pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/GetUser", get(auth::get_user))
        .route("/GetAll", get(auth::get_all))
        .route("/update-user", put(auth::update_user))
        .route("/enable-disable", put(auth::enable_disable))
        .route("/Register", post(auth::register))
        .route("/UserFilter", get(auth::user_filter))
        .route("/validate-token", post(auth::validate_token));

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::get_user,
        auth::get_all,
        auth::update_user,
        auth::enable_disable,
        auth::register,
        auth::user_filter,
        auth::validate_token,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            UserInfo,
            Claim,
            TokenValidationRequest,
            TokenValidation,
            UserView,
            RegisterRequest,
            UpdateUserRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, session tokens and user-management relay"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
