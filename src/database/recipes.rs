// ABOUTME: Database operations for recipes and their tag/ingredient associations
// ABOUTME: CRUD with full association replacement and filtered listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use crate::constants::limits;
use crate::database::{ingredients::row_to_ingredient, tags::row_to_tag, users::row_to_user};
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeDetail, RecipeIngredient, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashSet;
use uuid::Uuid;

/// One ingredient reference with its amount, as sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientAmountRequest {
    /// Ingredient id
    pub id: i64,
    /// Amount in the recipe
    pub amount: u32,
}

/// Request to create a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe name
    pub name: String,
    /// Description text
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Optional image as a base64 data URL
    pub image: Option<String>,
    /// Ingredient associations; non-empty, unique ids
    pub ingredients: Vec<IngredientAmountRequest>,
    /// Tag ids; non-empty, unique
    pub tags: Vec<i64>,
}

/// Request to update a recipe
///
/// Scalar fields are optional; ingredient and tag associations are always
/// replaced wholesale, matching the write serializer of the API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    /// New name (if provided)
    pub name: Option<String>,
    /// New description (if provided)
    pub text: Option<String>,
    /// New cooking time (if provided)
    pub cooking_time: Option<u32>,
    /// New image (if provided)
    pub image: Option<String>,
    /// Replacement ingredient associations
    pub ingredients: Vec<IngredientAmountRequest>,
    /// Replacement tag ids
    pub tags: Vec<i64>,
}

/// Filter options for listing recipes
#[derive(Debug, Clone, Default)]
pub struct ListRecipesFilter {
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// Only recipes carrying at least one of these tag slugs
    pub tag_slugs: Vec<String>,
    /// Only recipes favorited by this user
    pub favorited_by: Option<Uuid>,
    /// Only recipes in this user's shopping cart
    pub in_cart_of: Option<Uuid>,
    /// Maximum number of results
    pub limit: u32,
    /// Row offset
    pub offset: u32,
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a recipe with its tag and ingredient associations
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when the payload violates validation rules or
    /// references unknown tags/ingredients, or a database error otherwise
    pub async fn create(
        &self,
        author_id: Uuid,
        request: &CreateRecipeRequest,
    ) -> AppResult<RecipeDetail> {
        validate_payload(
            &request.name,
            request.cooking_time,
            &request.ingredients,
            &request.tags,
        )?;

        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (author_id, name, image, text, cooking_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(author_id.to_string())
        .bind(&request.name)
        .bind(&request.image)
        .bind(&request.text)
        .bind(i64::from(request.cooking_time))
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        let recipe_id = result.last_insert_rowid();

        Self::write_associations(&mut tx, recipe_id, &request.ingredients, &request.tags).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        self.get(recipe_id)
            .await?
            .ok_or_else(|| AppError::internal("Recipe vanished after creation"))
    }

    /// Update a recipe, replacing its associations wholesale
    ///
    /// Ownership is checked by the route layer; this method only touches
    /// persistence.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` on validation failure or a database error
    pub async fn update(
        &self,
        recipe_id: i64,
        request: &UpdateRecipeRequest,
    ) -> AppResult<Option<RecipeDetail>> {
        let Some(existing) = self.get(recipe_id).await? else {
            return Ok(None);
        };

        let name = request.name.as_ref().unwrap_or(&existing.recipe.name);
        let text = request.text.as_ref().unwrap_or(&existing.recipe.text);
        let cooking_time = request.cooking_time.unwrap_or(existing.recipe.cooking_time);
        let image = request.image.clone().or(existing.recipe.image);

        validate_payload(name, cooking_time, &request.ingredients, &request.tags)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            UPDATE recipes SET name = $1, text = $2, cooking_time = $3, image = $4
            WHERE id = $5
            ",
        )
        .bind(name)
        .bind(text)
        .bind(i64::from(cooking_time))
        .bind(&image)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        for table in ["recipe_ingredients", "recipe_tags"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE recipe_id = $1"))
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to clear associations: {e}")))?;
        }

        Self::write_associations(&mut tx, recipe_id, &request.ingredients, &request.tags).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit update: {e}")))?;

        self.get(recipe_id).await
    }

    /// Insert association rows, verifying every referenced id exists
    async fn write_associations(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        recipe_id: i64,
        ingredients: &[IngredientAmountRequest],
        tags: &[i64],
    ) -> AppResult<()> {
        for item in ingredients {
            let known = sqlx::query("SELECT 1 FROM ingredients WHERE id = $1")
                .bind(item.id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to check ingredient: {e}")))?;
            if known.is_none() {
                return Err(AppError::invalid_input(format!(
                    "Unknown ingredient id: {}",
                    item.id
                )));
            }

            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
            )
            .bind(recipe_id)
            .bind(item.id)
            .bind(i64::from(item.amount))
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to link ingredient: {e}")))?;
        }

        for tag_id in tags {
            let known = sqlx::query("SELECT 1 FROM tags WHERE id = $1")
                .bind(tag_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to check tag: {e}")))?;
            if known.is_none() {
                return Err(AppError::invalid_input(format!("Unknown tag id: {tag_id}")));
            }

            sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
                .bind(recipe_id)
                .bind(tag_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to link tag: {e}")))?;
        }

        Ok(())
    }

    /// Get a recipe with author, tags, and ingredients resolved
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, recipe_id: i64) -> AppResult<Option<RecipeDetail>> {
        let row = sqlx::query(
            r"
            SELECT id, author_id, name, image, text, cooking_time, created_at
            FROM recipes WHERE id = $1
            ",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        match row {
            Some(row) => {
                let recipe = row_to_recipe(&row)?;
                Ok(Some(self.load_detail(recipe).await?))
            }
            None => Ok(None),
        }
    }

    /// Check whether a recipe exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn exists(&self, recipe_id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;
        Ok(row.is_some())
    }

    /// Delete a recipe and every row referencing it
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, recipe_id: i64) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        for table in [
            "recipe_ingredients",
            "recipe_tags",
            "favorites",
            "cart_entries",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE recipe_id = $1"))
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to delete references: {e}")))?;
        }

        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// List recipes matching a filter, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, filter: &ListRecipesFilter) -> AppResult<Vec<RecipeDetail>> {
        let sql = format!(
            r"
            SELECT id, author_id, name, image, text, cooking_time, created_at
            FROM recipes
            {}
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            ",
            Self::filter_clause(filter)
        );

        let mut query = sqlx::query(&sql);
        query = Self::bind_filter(query, filter);
        query = query
            .bind(i64::from(filter.limit))
            .bind(i64::from(filter.offset));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut details = Vec::with_capacity(rows.len());
        for row in &rows {
            let recipe = row_to_recipe(row)?;
            details.push(self.load_detail(recipe).await?);
        }
        Ok(details)
    }

    /// Count recipes matching a filter
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count(&self, filter: &ListRecipesFilter) -> AppResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) as count FROM recipes {}",
            Self::filter_clause(filter)
        );

        let mut query = sqlx::query(&sql);
        query = Self::bind_filter(query, filter);

        let row = query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        let count: i64 = row.get("count");
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// List an author's recipes, newest first, bounded by `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_by_author(&self, author_id: Uuid, limit: u32) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, name, image, text, cooking_time, created_at
            FROM recipes
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(author_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list author recipes: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Count an author's recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count_by_author(&self, author_id: Uuid) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM recipes WHERE author_id = $1")
            .bind(author_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count author recipes: {e}")))?;

        let count: i64 = row.get("count");
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// WHERE clause for the list/count filter, `?` placeholders in bind order
    fn filter_clause(filter: &ListRecipesFilter) -> String {
        let mut clauses = Vec::new();

        if filter.author.is_some() {
            clauses.push("author_id = ?".to_owned());
        }
        if !filter.tag_slugs.is_empty() {
            let placeholders = vec!["?"; filter.tag_slugs.len()].join(", ");
            clauses.push(format!(
                "id IN (SELECT rt.recipe_id FROM recipe_tags rt \
                 JOIN tags t ON t.id = rt.tag_id WHERE t.slug IN ({placeholders}))"
            ));
        }
        if filter.favorited_by.is_some() {
            clauses.push("id IN (SELECT recipe_id FROM favorites WHERE user_id = ?)".to_owned());
        }
        if filter.in_cart_of.is_some() {
            clauses.push("id IN (SELECT recipe_id FROM cart_entries WHERE user_id = ?)".to_owned());
        }

        if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        }
    }

    /// Bind filter values in the order `filter_clause` emitted placeholders
    fn bind_filter<'q>(
        mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
        filter: &'q ListRecipesFilter,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        if let Some(author) = filter.author {
            query = query.bind(author.to_string());
        }
        for slug in &filter.tag_slugs {
            query = query.bind(slug);
        }
        if let Some(user) = filter.favorited_by {
            query = query.bind(user.to_string());
        }
        if let Some(user) = filter.in_cart_of {
            query = query.bind(user.to_string());
        }
        query
    }

    /// Resolve author, tags, and ingredients for a recipe row
    async fn load_detail(&self, recipe: Recipe) -> AppResult<RecipeDetail> {
        let author_row = sqlx::query(
            r"
            SELECT id, email, username, first_name, last_name,
                   password_hash, avatar, created_at
            FROM users WHERE id = $1
            ",
        )
        .bind(recipe.author_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe author: {e}")))?;
        let author = row_to_user(&author_row)?;

        let tag_rows = sqlx::query(
            r"
            SELECT t.id, t.name, t.slug FROM tags t
            JOIN recipe_tags rt ON rt.tag_id = t.id
            WHERE rt.recipe_id = $1
            ORDER BY t.name
            ",
        )
        .bind(recipe.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe tags: {e}")))?;
        let tags: Vec<Tag> = tag_rows.iter().map(row_to_tag).collect();

        let ingredient_rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.measurement_unit, ri.amount FROM ingredients i
            JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
            WHERE ri.recipe_id = $1
            ORDER BY i.name
            ",
        )
        .bind(recipe.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

        let ingredients = ingredient_rows
            .iter()
            .map(|row| {
                let ingredient = row_to_ingredient(row);
                let amount: i64 = row.get("amount");
                RecipeIngredient {
                    id: ingredient.id,
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: u32::try_from(amount).unwrap_or(0),
                }
            })
            .collect();

        Ok(RecipeDetail {
            recipe,
            author,
            tags,
            ingredients,
        })
    }
}

/// Validate the writable recipe payload
fn validate_payload(
    name: &str,
    cooking_time: u32,
    ingredients: &[IngredientAmountRequest],
    tags: &[i64],
) -> AppResult<()> {
    if name.is_empty() || name.len() > limits::RECIPE_NAME_MAX_LENGTH {
        return Err(AppError::invalid_input("Invalid recipe name length"));
    }
    if cooking_time < limits::MIN_COOKING_TIME {
        return Err(AppError::invalid_input(format!(
            "Cooking time cannot be less than {} minutes",
            limits::MIN_COOKING_TIME
        )));
    }

    if ingredients.is_empty() {
        return Err(AppError::invalid_input("Ingredient list cannot be empty"));
    }
    let mut seen_ingredients = HashSet::new();
    for item in ingredients {
        if !seen_ingredients.insert(item.id) {
            return Err(AppError::invalid_input(format!(
                "Duplicate ingredient id: {}",
                item.id
            )));
        }
        if item.amount < limits::MIN_INGREDIENT_AMOUNT {
            return Err(AppError::invalid_input(format!(
                "Ingredient amount cannot be less than {}",
                limits::MIN_INGREDIENT_AMOUNT
            )));
        }
    }

    if tags.is_empty() {
        return Err(AppError::invalid_input("Tag list cannot be empty"));
    }
    let mut seen_tags = HashSet::new();
    for tag_id in tags {
        if !seen_tags.insert(*tag_id) {
            return Err(AppError::invalid_input(format!(
                "Duplicate tag id: {tag_id}"
            )));
        }
    }

    Ok(())
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let author_id_str: String = row.get("author_id");
    let created_at_str: String = row.get("created_at");
    let cooking_time: i64 = row.get("cooking_time");

    Ok(Recipe {
        id: row.get("id"),
        author_id: Uuid::parse_str(&author_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        name: row.get("name"),
        image: row.get("image"),
        text: row.get("text"),
        cooking_time: u32::try_from(cooking_time).unwrap_or(0),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(id: i64, amount: u32) -> IngredientAmountRequest {
        IngredientAmountRequest { id, amount }
    }

    #[test]
    fn test_payload_validation() {
        assert!(validate_payload("Soup", 10, &[ingredient(1, 5)], &[1]).is_ok());

        assert!(validate_payload("", 10, &[ingredient(1, 5)], &[1]).is_err());
        assert!(validate_payload("Soup", 0, &[ingredient(1, 5)], &[1]).is_err());
        assert!(validate_payload("Soup", 10, &[], &[1]).is_err());
        assert!(validate_payload("Soup", 10, &[ingredient(1, 0)], &[1]).is_err());
        assert!(
            validate_payload("Soup", 10, &[ingredient(1, 5), ingredient(1, 2)], &[1]).is_err()
        );
        assert!(validate_payload("Soup", 10, &[ingredient(1, 5)], &[]).is_err());
        assert!(validate_payload("Soup", 10, &[ingredient(1, 5)], &[1, 1]).is_err());
    }
}
