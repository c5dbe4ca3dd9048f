// ABOUTME: Route handlers for recipe tags
// ABOUTME: Public read-only tag listing and lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Tag routes

use crate::{errors::AppError, models::Tag, resources::ServerResources};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Tag routes handler
pub struct TagsRoutes;

impl TagsRoutes {
    /// Create all tag routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tags/", get(Self::handle_list))
            .route("/api/tags/:id/", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/tags/ - List every tag
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tags: Vec<Tag> = resources.database.tags().list().await?;
        Ok((StatusCode::OK, Json(tags)).into_response())
    }

    /// Handle GET /api/tags/:id/ - Look up one tag
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(tag_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let tag = resources
            .database
            .tags()
            .get(tag_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {tag_id}")))?;

        Ok((StatusCode::OK, Json(tag)).into_response())
    }
}
