// ABOUTME: Recipe, tag, and ingredient records
// ABOUTME: Plain data structures assembled by the database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// A recipe tag (e.g. "breakfast")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Unique URL slug
    pub slug: String,
}

/// A catalog ingredient; `(name, measurement_unit)` is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit ("g", "ml", ...)
    pub measurement_unit: String,
}

/// An ingredient association inside a recipe, carrying its amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount used by the recipe, always >= 1
    pub amount: u32,
}

/// A stored recipe row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique numeric identifier (short link codec input)
    pub id: i64,
    /// Author user id
    pub author_id: Uuid,
    /// Recipe name
    pub name: String,
    /// Recipe image as a base64 data URL, if set
    pub image: Option<String>,
    /// Description text
    pub text: String,
    /// Cooking time in minutes, always >= 1
    pub cooking_time: u32,
    /// Publication timestamp
    pub created_at: DateTime<Utc>,
}

/// A recipe with its author, tags, and ingredient amounts resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// The recipe row
    pub recipe: Recipe,
    /// Resolved author record
    pub author: User,
    /// Tags attached to the recipe
    pub tags: Vec<Tag>,
    /// Ingredient associations with amounts
    pub ingredients: Vec<RecipeIngredient>,
}
