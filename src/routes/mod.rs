// ABOUTME: Route module organization for the Foodgram HTTP API
// ABOUTME: Assembles per-resource routers into the application router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! HTTP route modules, one per resource

use crate::health;
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Token login/logout endpoints
pub mod auth;

/// Ingredient catalog endpoints
pub mod ingredients;

/// Recipe CRUD, favorites, cart, and downloads
pub mod recipes;

/// Short link redirect endpoint
pub mod shortlink;

/// Tag endpoints
pub mod tags;

/// User registration, profiles, and subscriptions
pub mod users;

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(users::UsersRoutes::routes(resources.clone()))
        .merge(tags::TagsRoutes::routes(resources.clone()))
        .merge(ingredients::IngredientsRoutes::routes(resources.clone()))
        .merge(recipes::RecipesRoutes::routes(resources.clone()))
        .merge(shortlink::ShortLinkRoutes::routes(resources.clone()))
        .route("/api/health", get(handle_health).with_state(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Handle GET /api/health
async fn handle_health(
    State(resources): State<Arc<ServerResources>>,
) -> Json<health::HealthResponse> {
    Json(health::check(&resources.database).await)
}
