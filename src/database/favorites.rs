// ABOUTME: Database operations for favorite recipes
// ABOUTME: Unique (user, recipe) links with add/remove/contains
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Favorites database operations manager
pub struct FavoritesManager {
    pool: SqlitePool,
}

impl FavoritesManager {
    /// Create a new favorites manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a recipe to a user's favorites
    ///
    /// Returns `false` when the pair already existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn add(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a recipe from a user's favorites
    ///
    /// Returns `false` when the pair did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn remove(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a recipe is in a user's favorites
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn contains(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check favorite: {e}")))?;

        Ok(row.is_some())
    }
}
