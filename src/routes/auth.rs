// ABOUTME: Token login and logout route handlers
// ABOUTME: Exchanges email/password credentials for a stateless JWT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Authentication token routes
//!
//! Tokens are stateless JWTs: login verifies credentials and issues one,
//! logout simply answers 204 and leaves discarding to the client.

use crate::{
    auth::verify_password,
    errors::AppError,
    resources::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for token login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain password
    pub password: String,
}

/// Response for token login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub auth_token: String,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/token/login/", post(Self::handle_login))
            .route("/api/auth/token/logout/", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle POST /api/auth/token/login/ - Issue a JWT for valid credentials
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .users()
            .get_by_email(&body.email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !verify_password(&body.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let token = resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

        tracing::info!("User {} logged in", user.id);

        let response = LoginResponse { auth_token: token };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/auth/token/logout/ - Stateless logout
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth_manager.authenticate_request(&headers)?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
