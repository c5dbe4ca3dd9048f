// ABOUTME: User account model for authentication and profiles
// ABOUTME: User record plus registration field validation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique email, the login identifier
    pub email: String,
    /// Unique public nickname
    pub username: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Avatar as a base64 data URL, if set
    pub avatar: Option<String>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record with a fresh id and timestamp
    #[must_use]
    pub fn new(
        email: String,
        username: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            first_name,
            last_name,
            password_hash,
            avatar: None,
            created_at: Utc::now(),
        }
    }

    /// Display name used in shopping list reports ("First Last")
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validate registration fields against length and charset rules
///
/// # Errors
///
/// Returns an `INVALID_INPUT` error naming the offending field
pub fn validate_registration(
    email: &str,
    username: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> AppResult<()> {
    if email.is_empty() || email.len() > limits::EMAIL_MAX_LENGTH || !email.contains('@') {
        return Err(AppError::invalid_input("Invalid email address"));
    }
    if username.is_empty() || username.len() > limits::USERNAME_MAX_LENGTH {
        return Err(AppError::invalid_input("Invalid username length"));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
    {
        return Err(AppError::invalid_input(
            "Username may only contain letters, digits and .@+-_",
        ));
    }
    if first_name.is_empty() || first_name.len() > limits::NAME_MAX_LENGTH {
        return Err(AppError::invalid_input("Invalid first name"));
    }
    if last_name.is_empty() || last_name.len() > limits::NAME_MAX_LENGTH {
        return Err(AppError::invalid_input("Invalid last name"));
    }
    if password.len() < limits::MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {} characters",
            limits::MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = User::new(
            "jane@example.com".into(),
            "jane".into(),
            "Jane".into(),
            "Doe".into(),
            "hash".into(),
        );
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn test_registration_validation() {
        assert!(validate_registration("a@b.c", "jane", "Jane", "Doe", "password1").is_ok());
        assert!(validate_registration("not-an-email", "jane", "Jane", "Doe", "password1").is_err());
        assert!(validate_registration("a@b.c", "bad name", "Jane", "Doe", "password1").is_err());
        assert!(validate_registration("a@b.c", "jane", "Jane", "Doe", "short").is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "jane@example.com".into(),
            "jane".into(),
            "Jane".into(),
            "Doe".into(),
            "secret-hash".into(),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
