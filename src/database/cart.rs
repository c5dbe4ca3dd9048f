// ABOUTME: Database operations for shopping cart entries
// ABOUTME: Unique (user, recipe) links plus the aggregator projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use crate::errors::{AppError, AppResult};
use crate::shopping_list::{CartRecipe, IngredientAmount};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Shopping cart database operations manager
pub struct CartManager {
    pool: SqlitePool,
}

impl CartManager {
    /// Create a new cart manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a recipe to a user's cart
    ///
    /// Returns `false` when the pair already existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn add(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO cart_entries (user_id, recipe_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add cart entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a recipe from a user's cart
    ///
    /// Returns `false` when the pair did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn remove(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cart_entries WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove cart entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a recipe is in a user's cart
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn contains(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM cart_entries WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check cart entry: {e}")))?;

        Ok(row.is_some())
    }

    /// Project a user's cart into the shape the shopping list aggregator
    /// consumes: every cart recipe with its ingredient amounts and author
    /// display name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn cart_recipes(&self, user_id: Uuid) -> AppResult<Vec<CartRecipe>> {
        let recipe_rows = sqlx::query(
            r"
            SELECT r.id, r.name, u.first_name, u.last_name
            FROM recipes r
            JOIN cart_entries c ON c.recipe_id = r.id
            JOIN users u ON u.id = r.author_id
            WHERE c.user_id = $1
            ORDER BY r.name
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load cart recipes: {e}")))?;

        let mut recipes = Vec::with_capacity(recipe_rows.len());
        for row in &recipe_rows {
            let recipe_id: i64 = row.get("id");
            let name: String = row.get("name");
            let first_name: String = row.get("first_name");
            let last_name: String = row.get("last_name");

            let ingredient_rows = sqlx::query(
                r"
                SELECT i.name, i.measurement_unit, ri.amount
                FROM ingredients i
                JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
                WHERE ri.recipe_id = $1
                ORDER BY i.name
                ",
            )
            .bind(recipe_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load cart ingredients: {e}")))?;

            let ingredients = ingredient_rows
                .iter()
                .map(|r| {
                    let amount: i64 = r.get("amount");
                    IngredientAmount {
                        name: r.get("name"),
                        unit: r.get("measurement_unit"),
                        amount: u64::try_from(amount).unwrap_or(0),
                    }
                })
                .collect();

            recipes.push(CartRecipe {
                name,
                author: format!("{first_name} {last_name}"),
                ingredients,
            });
        }

        Ok(recipes)
    }
}
