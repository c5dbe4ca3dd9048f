// ABOUTME: Route handler for recipe short link redirects
// ABOUTME: Decodes /s/{code} and redirects to the recipe page or answers 404
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Short link redirect route
//!
//! Any decode failure is a plain 404: a malformed code and a missing
//! recipe are indistinguishable to the caller.

use crate::{errors::AppError, resources::ServerResources, shortlink};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;

/// Short link routes handler
pub struct ShortLinkRoutes;

impl ShortLinkRoutes {
    /// Create the short link route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/s/:code/", get(Self::handle_redirect))
            .with_state(resources)
    }

    /// Handle GET /s/:code/ - Redirect to the recipe detail page
    async fn handle_redirect(
        State(resources): State<Arc<ServerResources>>,
        Path(code): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe_id = shortlink::decode_short_code(&code).map_err(|e| {
            tracing::debug!("Short code {code:?} rejected: {e}");
            AppError::not_found("Page")
        })?;

        let recipe_id = i64::try_from(recipe_id).map_err(|_| AppError::not_found("Page"))?;

        if !resources.database.recipes().exists(recipe_id).await? {
            return Err(AppError::not_found("Page"));
        }

        Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, format!("/recipes/{recipe_id}/"))
            .body(Body::empty())
            .map_err(|e| AppError::internal(format!("Failed to build redirect: {e}")))
    }
}
