// ABOUTME: Route handlers for the ingredient catalog
// ABOUTME: Public read-only search and lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Ingredient routes

use crate::{errors::AppError, models::Ingredient, resources::ServerResources};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for ingredient search
#[derive(Debug, Deserialize, Default)]
pub struct IngredientSearchQuery {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

/// Ingredient routes handler
pub struct IngredientsRoutes;

impl IngredientsRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients/", get(Self::handle_list))
            .route("/api/ingredients/:id/", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/ingredients/ - List, optionally by name prefix
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<IngredientSearchQuery>,
    ) -> Result<Response, AppError> {
        let ingredients: Vec<Ingredient> = resources
            .database
            .ingredients()
            .list(query.name.as_deref())
            .await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /api/ingredients/:id/ - Look up one ingredient
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(ingredient_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let ingredient = resources
            .database
            .ingredients()
            .get(ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }
}
