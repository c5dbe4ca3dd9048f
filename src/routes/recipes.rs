// ABOUTME: Route handlers for recipe CRUD, favorites, cart, and downloads
// ABOUTME: The largest surface: listing with filters, short links, shopping list export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Recipe routes
//!
//! Reading is public; writing requires a bearer token and, for updates and
//! deletes, recipe authorship. The download endpoint renders the caller's
//! cart through the shopping list aggregator.

use crate::{
    auth::AuthResult,
    database::recipes::{CreateRecipeRequest, ListRecipesFilter, UpdateRecipeRequest},
    errors::AppError,
    models::{self, RecipeDetail, RecipeIngredient, Tag},
    pagination::{Page, PaginationParams},
    resources::ServerResources,
    routes::users::{RecipeShortResponse, UserResponse},
    shopping_list::{self, ReportFormat},
    shortlink,
};
use axum::{
    body::Body,
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Full recipe representation
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe id
    pub id: i64,
    /// Attached tags
    pub tags: Vec<Tag>,
    /// Author profile
    pub author: UserResponse,
    /// Ingredient associations with amounts
    pub ingredients: Vec<RecipeIngredient>,
    /// Whether the caller favorited this recipe
    pub is_favorited: bool,
    /// Whether the recipe is in the caller's cart
    pub is_in_shopping_cart: bool,
    /// Recipe name
    pub name: String,
    /// Image data URL, if set
    pub image: Option<String>,
    /// Description text
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
}

/// Query parameters for the recipe listing
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Filter to one author
    pub author: Option<Uuid>,
    /// Restrict to the caller's favorites ("1"/"true")
    pub is_favorited: Option<String>,
    /// Restrict to the caller's cart ("1"/"true")
    pub is_in_shopping_cart: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

/// Query parameters for the shopping list download
#[derive(Debug, Deserialize, Default)]
pub struct DownloadQuery {
    /// Report format: "txt" (default) or "xml"
    pub format: Option<String>,
}

/// Response carrying a recipe short link
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortLinkResponse {
    /// Absolute short URL
    #[serde(rename = "short-link")]
    pub short_link: String,
}

/// Recipe routes handler
pub struct RecipesRoutes;

impl RecipesRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/", get(Self::handle_list))
            .route("/api/recipes/", post(Self::handle_create))
            .route(
                "/api/recipes/download_shopping_cart/",
                get(Self::handle_download),
            )
            .route("/api/recipes/:id/", get(Self::handle_get))
            .route("/api/recipes/:id/", patch(Self::handle_update))
            .route("/api/recipes/:id/", delete(Self::handle_delete))
            .route("/api/recipes/:id/favorite/", post(Self::handle_favorite_add))
            .route(
                "/api/recipes/:id/favorite/",
                delete(Self::handle_favorite_remove),
            )
            .route("/api/recipes/:id/shopping_cart/", post(Self::handle_cart_add))
            .route(
                "/api/recipes/:id/shopping_cart/",
                delete(Self::handle_cart_remove),
            )
            .route("/api/recipes/:id/get-link/", get(Self::handle_get_link))
            .with_state(resources)
    }

    /// Authenticate the request, failing with 401 when anonymous
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        resources.auth_manager.authenticate_request(headers)
    }

    /// Interpret boolean-ish filter values ("1", "true")
    fn flag_is_set(value: Option<&str>) -> bool {
        matches!(value, Some("1" | "true" | "True"))
    }

    /// Collect repeated `tags=` values from the raw query string
    fn tag_slugs(raw_query: Option<&str>) -> Vec<String> {
        raw_query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .filter(|(key, _)| key == "tags")
                    .map(|(_, value)| value.into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Build the full response for a recipe, resolving the caller's flags
    async fn build_response(
        resources: &Arc<ServerResources>,
        detail: RecipeDetail,
        viewer: Option<&AuthResult>,
    ) -> Result<RecipeResponse, AppError> {
        let (is_favorited, is_in_shopping_cart, is_subscribed) = match viewer {
            Some(auth) => (
                resources
                    .database
                    .favorites()
                    .contains(auth.user_id, detail.recipe.id)
                    .await?,
                resources
                    .database
                    .cart()
                    .contains(auth.user_id, detail.recipe.id)
                    .await?,
                resources
                    .database
                    .follows()
                    .is_following(auth.user_id, detail.author.id)
                    .await?,
            ),
            None => (false, false, false),
        };

        Ok(RecipeResponse {
            id: detail.recipe.id,
            tags: detail.tags,
            author: UserResponse::from_user(&detail.author, is_subscribed),
            ingredients: detail.ingredients,
            is_favorited,
            is_in_shopping_cart,
            name: detail.recipe.name,
            image: detail.recipe.image,
            text: detail.recipe.text,
            cooking_time: detail.recipe.cooking_time,
        })
    }

    /// Fetch a recipe or fail with 404
    async fn get_detail(
        resources: &Arc<ServerResources>,
        recipe_id: i64,
    ) -> Result<RecipeDetail, AppError> {
        resources
            .database
            .recipes()
            .get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    /// Handle GET /api/recipes/ - Filtered, paginated listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListRecipesQuery>,
        RawQuery(raw_query): RawQuery,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth_manager.maybe_authenticate_request(&headers);

        let params = PaginationParams {
            page: query.page,
            limit: query.limit,
        };

        // Favorites/cart filters only narrow for authenticated callers
        let favorited_by = viewer
            .as_ref()
            .filter(|_| Self::flag_is_set(query.is_favorited.as_deref()))
            .map(|auth| auth.user_id);
        let in_cart_of = viewer
            .as_ref()
            .filter(|_| Self::flag_is_set(query.is_in_shopping_cart.as_deref()))
            .map(|auth| auth.user_id);

        let filter = ListRecipesFilter {
            author: query.author,
            tag_slugs: Self::tag_slugs(raw_query.as_deref()),
            favorited_by,
            in_cart_of,
            limit: params.limit(),
            offset: params.offset(),
        };

        let details = resources.database.recipes().list(&filter).await?;
        let count = resources.database.recipes().count(&filter).await?;

        let mut results = Vec::with_capacity(details.len());
        for detail in details {
            results.push(Self::build_response(&resources, detail, viewer.as_ref()).await?);
        }

        let endpoint = format!("{}/api/recipes/", resources.config.public_url);
        let page = Page::new(results, count, &params, &endpoint);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle POST /api/recipes/ - Create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if let Some(image) = &body.image {
            models::validate_data_url(image)?;
        }

        let detail = resources
            .database
            .recipes()
            .create(auth.user_id, &body)
            .await?;
        tracing::info!("User {} created recipe {}", auth.user_id, detail.recipe.id);

        let response = Self::build_response(&resources, detail, Some(&auth)).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/recipes/:id/ - Recipe detail
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth_manager.maybe_authenticate_request(&headers);

        let detail = Self::get_detail(&resources, recipe_id).await?;
        let response = Self::build_response(&resources, detail, viewer.as_ref()).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PATCH /api/recipes/:id/ - Author-only update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
        Json(body): Json<UpdateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let existing = Self::get_detail(&resources, recipe_id).await?;
        if existing.recipe.author_id != auth.user_id {
            return Err(AppError::permission_denied(
                "Only the author may edit a recipe",
            ));
        }

        if let Some(image) = &body.image {
            models::validate_data_url(image)?;
        }

        let detail = resources
            .database
            .recipes()
            .update(recipe_id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let response = Self::build_response(&resources, detail, Some(&auth)).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/ - Author-only delete
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let existing = Self::get_detail(&resources, recipe_id).await?;
        if existing.recipe.author_id != auth.user_id {
            return Err(AppError::permission_denied(
                "Only the author may delete a recipe",
            ));
        }

        resources.database.recipes().delete(recipe_id).await?;
        tracing::info!("User {} deleted recipe {}", auth.user_id, recipe_id);

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/recipes/:id/favorite/ - Add to favorites
    async fn handle_favorite_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let detail = Self::get_detail(&resources, recipe_id).await?;

        let added = resources
            .database
            .favorites()
            .add(auth.user_id, recipe_id)
            .await?;
        if !added {
            return Err(AppError::already_exists("Favorite"));
        }

        let response = RecipeShortResponse::from(&detail.recipe);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/favorite/ - Remove from favorites
    async fn handle_favorite_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if !resources.database.recipes().exists(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let removed = resources
            .database
            .favorites()
            .remove(auth.user_id, recipe_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Favorite"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/recipes/:id/shopping_cart/ - Add to the cart
    async fn handle_cart_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let detail = Self::get_detail(&resources, recipe_id).await?;

        let added = resources.database.cart().add(auth.user_id, recipe_id).await?;
        if !added {
            return Err(AppError::already_exists("Shopping cart entry"));
        }

        let response = RecipeShortResponse::from(&detail.recipe);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/shopping_cart/ - Remove from the cart
    async fn handle_cart_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if !resources.database.recipes().exists(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let removed = resources
            .database
            .cart()
            .remove(auth.user_id, recipe_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Shopping cart entry"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/recipes/download_shopping_cart/ - Aggregated download
    async fn handle_download(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DownloadQuery>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let format: ReportFormat = query.format.as_deref().unwrap_or("txt").parse()?;

        let user = resources
            .database
            .users()
            .get(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let cart_recipes = resources.database.cart().cart_recipes(auth.user_id).await?;
        let report = shopping_list::render(&user.full_name(), Utc::now(), &cart_recipes, format)?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, format.content_type())
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            )
            .body(Body::from(report))
            .map_err(|e| AppError::internal(format!("Failed to build download response: {e}")))
    }

    /// Handle GET /api/recipes/:id/get-link/ - Short link for a recipe
    async fn handle_get_link(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.recipes().exists(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let code = shortlink::encode_short_code(u64::try_from(recipe_id).unwrap_or(0));
        let response = ShortLinkResponse {
            short_link: format!("{}/s/{code}/", resources.config.public_url),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
