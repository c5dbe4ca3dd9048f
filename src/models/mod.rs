// ABOUTME: Core data models for the Foodgram API
// ABOUTME: Plain records for users, recipes, tags, and ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Common data models

/// Recipe, tag, and ingredient records
pub mod recipe;

/// User account records
pub mod user;

pub use recipe::{Ingredient, Recipe, RecipeDetail, RecipeIngredient, Tag};
pub use user::User;

use crate::errors::{AppError, AppResult};

/// Validate that an image payload is a base64 data URL
///
/// Avatars and recipe images are persisted as data URLs; the payload must
/// decode before it is stored.
///
/// # Errors
///
/// Returns an `INVALID_INPUT` error when the payload is not decodable
pub fn validate_data_url(data_url: &str) -> AppResult<()> {
    use base64::{engine::general_purpose, Engine as _};

    let payload = data_url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| AppError::invalid_input("Image must be a base64 data URL"))?;

    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AppError::invalid_input(format!("Image payload is not valid base64: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_validation() {
        assert!(validate_data_url("data:image/png;base64,aGVsbG8=").is_ok());
        assert!(validate_data_url("not a data url").is_err());
        assert!(validate_data_url("data:image/png;base64,!!!").is_err());
    }
}
