// ABOUTME: Route handlers for user registration, profiles, and subscriptions
// ABOUTME: Provides REST endpoints for accounts, avatars, passwords, and follows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! User routes
//!
//! Registration and profile listing are public; everything touching the
//! current account or subscriptions requires a bearer token.

use crate::{
    auth::{hash_password, verify_password, AuthResult},
    errors::AppError,
    models::{self, user::validate_registration, Recipe, User},
    pagination::{Page, PaginationParams},
    resources::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Public representation of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Public nickname
    pub username: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Avatar data URL, if set
    pub avatar: Option<String>,
    /// Whether the requesting user follows this user
    pub is_subscribed: bool,
}

impl UserResponse {
    /// Build from a user record and the caller's subscription state
    #[must_use]
    pub fn from_user(user: &User, is_subscribed: bool) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar.clone(),
            is_subscribed,
        }
    }
}

/// Compact recipe representation used inside subscription responses
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeShortResponse {
    /// Recipe id
    pub id: i64,
    /// Recipe name
    pub name: String,
    /// Image data URL, if set
    pub image: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: u32,
}

impl From<&Recipe> for RecipeShortResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// A followed author with a preview of their recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct UserWithRecipesResponse {
    /// The author profile
    #[serde(flatten)]
    pub user: UserResponse,
    /// Preview of the author's recipes, newest first
    pub recipes: Vec<RecipeShortResponse>,
    /// Total number of recipes by the author
    pub recipes_count: u64,
}

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email, the login identifier
    pub email: String,
    /// Public nickname
    pub username: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Plain password
    pub password: String,
}

/// Request body for setting an avatar
#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    /// Base64 data URL
    pub avatar: String,
}

/// Response for avatar updates
#[derive(Debug, Serialize, Deserialize)]
pub struct AvatarResponse {
    /// Stored data URL
    pub avatar: String,
}

/// Request body for password change
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    /// Replacement password
    pub new_password: String,
    /// Current password for verification
    pub current_password: String,
}

/// Query parameters for the subscriptions listing
#[derive(Debug, Deserialize, Default)]
pub struct SubscriptionsQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Cap on recipes embedded per author
    pub recipes_limit: Option<u32>,
}

/// User routes handler
pub struct UsersRoutes;

impl UsersRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/", get(Self::handle_list))
            .route("/api/users/", post(Self::handle_register))
            .route("/api/users/me/", get(Self::handle_me))
            .route("/api/users/me/avatar/", put(Self::handle_avatar_put))
            .route("/api/users/me/avatar/", delete(Self::handle_avatar_delete))
            .route("/api/users/set_password/", post(Self::handle_set_password))
            .route("/api/users/subscriptions/", get(Self::handle_subscriptions))
            .route("/api/users/:id/", get(Self::handle_detail))
            .route("/api/users/:id/subscribe/", post(Self::handle_subscribe))
            .route(
                "/api/users/:id/subscribe/",
                delete(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    /// Authenticate the request, failing with 401 when anonymous
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        resources.auth_manager.authenticate_request(headers)
    }

    /// Resolve the caller if a valid bearer token is present
    fn maybe_authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Option<AuthResult> {
        resources.auth_manager.maybe_authenticate_request(headers)
    }

    /// Whether `viewer` follows `target`; anonymous viewers follow nobody
    async fn is_subscribed(
        resources: &Arc<ServerResources>,
        viewer: Option<&AuthResult>,
        target: Uuid,
    ) -> Result<bool, AppError> {
        match viewer {
            Some(auth) => {
                resources
                    .database
                    .follows()
                    .is_following(auth.user_id, target)
                    .await
            }
            None => Ok(false),
        }
    }

    /// Build the subscription response for one followed author
    async fn build_author_response(
        resources: &Arc<ServerResources>,
        author: &User,
        recipes_limit: u32,
    ) -> Result<UserWithRecipesResponse, AppError> {
        let recipes = resources
            .database
            .recipes()
            .list_by_author(author.id, recipes_limit)
            .await?;
        let recipes_count = resources
            .database
            .recipes()
            .count_by_author(author.id)
            .await?;

        Ok(UserWithRecipesResponse {
            user: UserResponse::from_user(author, true),
            recipes: recipes.iter().map(Into::into).collect(),
            recipes_count,
        })
    }

    /// Handle POST /api/users/ - Register a new account
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        validate_registration(
            &body.email,
            &body.username,
            &body.first_name,
            &body.last_name,
            &body.password,
        )?;

        let password_hash = hash_password(&body.password)?;
        let user = User::new(
            body.email,
            body.username,
            body.first_name,
            body.last_name,
            password_hash,
        );

        resources.database.users().create(&user).await?;
        tracing::info!("Registered user {} ({})", user.username, user.id);

        let response = UserResponse::from_user(&user, false);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/users/ - Paginated user listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<PaginationParams>,
    ) -> Result<Response, AppError> {
        let viewer = Self::maybe_authenticate(&headers, &resources);

        let users = resources.database.users().list(&params).await?;
        let count = resources.database.users().count().await?;

        let mut results = Vec::with_capacity(users.len());
        for user in &users {
            let subscribed =
                Self::is_subscribed(&resources, viewer.as_ref(), user.id).await?;
            results.push(UserResponse::from_user(user, subscribed));
        }

        let endpoint = format!("{}/api/users/", resources.config.public_url);
        let page = Page::new(results, count, &params, &endpoint);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /api/users/:id/ - Public profile
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let viewer = Self::maybe_authenticate(&headers, &resources);

        let user = resources
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        let subscribed = Self::is_subscribed(&resources, viewer.as_ref(), user.id).await?;
        let response = UserResponse::from_user(&user, subscribed);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/me/ - Current profile
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let user = resources
            .database
            .users()
            .get(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let response = UserResponse::from_user(&user, false);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/users/me/avatar/ - Set the avatar
    async fn handle_avatar_put(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<AvatarRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        models::validate_data_url(&body.avatar)?;

        resources
            .database
            .users()
            .update_avatar(auth.user_id, Some(&body.avatar))
            .await?;

        let response = AvatarResponse {
            avatar: body.avatar,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/me/avatar/ - Remove the avatar
    async fn handle_avatar_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        resources
            .database
            .users()
            .update_avatar(auth.user_id, None)
            .await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/users/set_password/ - Change the password
    async fn handle_set_password(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<SetPasswordRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let user = resources
            .database
            .users()
            .get(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        if !verify_password(&body.current_password, &user.password_hash)? {
            return Err(AppError::invalid_input("Incorrect current password"));
        }
        if body.new_password == body.current_password {
            return Err(AppError::invalid_input(
                "New and current passwords are identical",
            ));
        }

        let password_hash = hash_password(&body.new_password)?;
        resources
            .database
            .users()
            .update_password(auth.user_id, &password_hash)
            .await?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/users/subscriptions/ - Followed authors with recipes
    async fn handle_subscriptions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SubscriptionsQuery>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let params = PaginationParams {
            page: query.page,
            limit: query.limit,
        };
        let recipes_limit = query.recipes_limit.unwrap_or(u32::MAX);

        let authors = resources
            .database
            .follows()
            .following(auth.user_id, &params)
            .await?;
        let count = resources
            .database
            .follows()
            .count_following(auth.user_id)
            .await?;

        let mut results = Vec::with_capacity(authors.len());
        for author in &authors {
            results.push(Self::build_author_response(&resources, author, recipes_limit).await?);
        }

        let endpoint = format!("{}/api/users/subscriptions/", resources.config.public_url);
        let page = Page::new(results, count, &params, &endpoint);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle POST /api/users/:id/subscribe/ - Follow an author
    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let author = resources
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        let added = resources
            .database
            .follows()
            .follow(auth.user_id, user_id)
            .await?;
        if !added {
            return Err(AppError::already_exists("Subscription"));
        }

        let response = Self::build_author_response(&resources, &author, u32::MAX).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/:id/subscribe/ - Unfollow an author
    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if resources.database.users().get(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {user_id}")));
        }

        let removed = resources
            .database
            .follows()
            .unfollow(auth.user_id, user_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Subscription"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
