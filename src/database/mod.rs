// ABOUTME: Database management for the Foodgram API
// ABOUTME: SQLite pool ownership, idempotent schema creation, manager accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! # Database Layer
//!
//! Owns the `SQLite` connection pool and creates the schema idempotently at
//! startup. Per-resource operations live in dedicated manager structs, one
//! module per table family.

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Shopping cart entries and the aggregator projection
pub mod cart;
/// Favorite recipe links
pub mod favorites;
/// Author subscriptions
pub mod follows;
/// Ingredient catalog lookups
pub mod ingredients;
/// Recipe CRUD with tag and ingredient associations
pub mod recipes;
/// Tag lookups
pub mod tags;
/// User accounts
pub mod users;

/// Database handle owning the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and ensure the schema exists
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails
    pub async fn new(connection_string: &str) -> AppResult<Self> {
        // An in-memory database lives inside a single connection; a wider
        // pool would hand out empty databases
        let max_connections = if connection_string.contains(":memory:") {
            1
        } else {
            8
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(connection_string)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Users manager
    #[must_use]
    pub fn users(&self) -> users::UsersManager {
        users::UsersManager::new(self.pool.clone())
    }

    /// Tags manager
    #[must_use]
    pub fn tags(&self) -> tags::TagsManager {
        tags::TagsManager::new(self.pool.clone())
    }

    /// Ingredients manager
    #[must_use]
    pub fn ingredients(&self) -> ingredients::IngredientsManager {
        ingredients::IngredientsManager::new(self.pool.clone())
    }

    /// Recipes manager
    #[must_use]
    pub fn recipes(&self) -> recipes::RecipesManager {
        recipes::RecipesManager::new(self.pool.clone())
    }

    /// Favorites manager
    #[must_use]
    pub fn favorites(&self) -> favorites::FavoritesManager {
        favorites::FavoritesManager::new(self.pool.clone())
    }

    /// Shopping cart manager
    #[must_use]
    pub fn cart(&self) -> cart::CartManager {
        cart::CartManager::new(self.pool.clone())
    }

    /// Follows manager
    #[must_use]
    pub fn follows(&self) -> follows::FollowsManager {
        follows::FollowsManager::new(self.pool.clone())
    }

    /// Check database reachability
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Create all tables and indexes if they do not exist yet
    async fn migrate(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                username TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                avatar TEXT,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                slug TEXT UNIQUE NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                measurement_unit TEXT NOT NULL,
                UNIQUE (name, measurement_unit)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                image TEXT,
                text TEXT NOT NULL,
                cooking_time INTEGER NOT NULL CHECK (cooking_time >= 1),
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                amount INTEGER NOT NULL CHECK (amount >= 1),
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                PRIMARY KEY (recipe_id, tag_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS cart_entries (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS follows (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                following_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, following_id),
                CHECK (user_id <> following_id)
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)
            ",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Schema migration failed: {e}")))?;
        }

        Ok(())
    }
}
