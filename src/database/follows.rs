// ABOUTME: Database operations for author subscriptions
// ABOUTME: Unique (follower, followee) links, self-follow forbidden
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use crate::database::users::row_to_user;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::pagination::PaginationParams;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Follows database operations manager
pub struct FollowsManager {
    pool: SqlitePool,
}

impl FollowsManager {
    /// Create a new follows manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Subscribe a user to an author
    ///
    /// Returns `false` when the subscription already existed.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` on self-follow, or a database error otherwise
    pub async fn follow(&self, user_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        if user_id == following_id {
            return Err(AppError::invalid_input("Cannot subscribe to yourself"));
        }

        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO follows (user_id, following_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(following_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to follow: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a subscription
    ///
    /// Returns `false` when the subscription did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn unfollow(&self, user_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND following_id = $2")
            .bind(user_id.to_string())
            .bind(following_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to unfollow: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether `user_id` is subscribed to `following_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn is_following(&self, user_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM follows WHERE user_id = $1 AND following_id = $2")
            .bind(user_id.to_string())
            .bind(following_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check follow: {e}")))?;

        Ok(row.is_some())
    }

    /// List the authors a user is subscribed to, ordered by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn following(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name,
                   u.password_hash, u.avatar, u.created_at
            FROM users u
            JOIN follows f ON f.following_id = u.id
            WHERE f.user_id = $1
            ORDER BY u.username
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(params.limit()))
        .bind(i64::from(params.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subscriptions: {e}")))?;

        rows.iter().map(row_to_user).collect()
    }

    /// Count the authors a user is subscribed to
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count_following(&self, user_id: Uuid) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM follows WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count subscriptions: {e}")))?;

        let count: i64 = row.get("count");
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
