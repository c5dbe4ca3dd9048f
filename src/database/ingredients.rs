// ABOUTME: Database operations for the ingredient catalog
// ABOUTME: Prefix search and id lookup, creation for seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use crate::errors::{AppError, AppResult};
use crate::models::Ingredient;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Ingredient database operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an ingredient (used by seeding and tests)
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the (name, unit) pair is taken
    pub async fn create(&self, name: &str, measurement_unit: &str) -> AppResult<Ingredient> {
        let result =
            sqlx::query("INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2)")
                .bind(name)
                .bind(measurement_unit)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    if e.to_string().contains("UNIQUE") {
                        AppError::already_exists(format!("Ingredient {name} ({measurement_unit})"))
                    } else {
                        AppError::database(format!("Failed to create ingredient: {e}"))
                    }
                })?;

        Ok(Ingredient {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
            measurement_unit: measurement_unit.to_owned(),
        })
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, ingredient_id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(ingredient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        Ok(row.map(|r| row_to_ingredient(&r)))
    }

    /// List ingredients, optionally narrowed to a case-insensitive name prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, name_prefix: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let rows = match name_prefix {
            Some(prefix) => {
                // LIKE is case-insensitive for ASCII in SQLite
                let pattern = format!("{}%", escape_like(prefix));
                sqlx::query(
                    r"
                    SELECT id, name, measurement_unit FROM ingredients
                    WHERE name LIKE $1 ESCAPE '\'
                    ORDER BY name
                    ",
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }
}

/// Escape LIKE wildcards in user-supplied search input
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Convert a database row to an `Ingredient`
pub(crate) fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        measurement_unit: row.get("measurement_unit"),
    }
}
