// ABOUTME: Database operations for recipe tags
// ABOUTME: Read-mostly lookups plus creation for seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use crate::errors::{AppError, AppResult};
use crate::models::Tag;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Tag database operations manager
pub struct TagsManager {
    pool: SqlitePool,
}

impl TagsManager {
    /// Create a new tags manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a tag (used by seeding and tests)
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the name or slug is taken
    pub async fn create(&self, name: &str, slug: &str) -> AppResult<Tag> {
        let result = sqlx::query("INSERT INTO tags (name, slug) VALUES ($1, $2)")
            .bind(name)
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") {
                    AppError::already_exists(format!("Tag {slug}"))
                } else {
                    AppError::database(format!("Failed to create tag: {e}"))
                }
            })?;

        Ok(Tag {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
            slug: slug.to_owned(),
        })
    }

    /// Get a tag by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, tag_id: i64) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, slug FROM tags WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get tag: {e}")))?;

        Ok(row.map(|r| row_to_tag(&r)))
    }

    /// List all tags ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, slug FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list tags: {e}")))?;

        Ok(rows.iter().map(row_to_tag).collect())
    }
}

/// Convert a database row to a `Tag`
pub(crate) fn row_to_tag(row: &SqliteRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
    }
}
