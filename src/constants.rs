// ABOUTME: System-wide constants and configuration values for the Foodgram API
// ABOUTME: Field limits, pagination defaults, and protocol constants in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Application constants grouped by concern

/// Service identification
pub mod service_names {
    /// Canonical service name used in logs and health responses
    pub const FOODGRAM_API: &str = "foodgram-api";
}

/// Field length and value limits
pub mod limits {
    /// Maximum username length
    pub const USERNAME_MAX_LENGTH: usize = 150;
    /// Maximum email length
    pub const EMAIL_MAX_LENGTH: usize = 254;
    /// Maximum first/last name length
    pub const NAME_MAX_LENGTH: usize = 150;
    /// Maximum recipe name length
    pub const RECIPE_NAME_MAX_LENGTH: usize = 256;
    /// Maximum tag name length
    pub const TAG_MAX_LENGTH: usize = 32;
    /// Maximum tag slug length
    pub const SLUG_MAX_LENGTH: usize = 32;
    /// Maximum ingredient name length
    pub const INGREDIENT_MAX_LENGTH: usize = 128;
    /// Maximum measurement unit length
    pub const UNIT_OF_MEASURE_MAX_LENGTH: usize = 64;
    /// Minimum cooking time in minutes
    pub const MIN_COOKING_TIME: u32 = 1;
    /// Minimum ingredient amount in a recipe
    pub const MIN_INGREDIENT_AMOUNT: u32 = 1;
    /// Minimum password length accepted at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// JWT session expiry in hours
    pub const USER_SESSION_EXPIRY_HOURS: i64 = 24;
}

/// Pagination defaults for list endpoints
pub mod pagination {
    /// Default page size when the client does not pass `limit`
    pub const DEFAULT_PAGE_SIZE: u32 = 6;
    /// Upper bound for the `limit` query parameter
    pub const MAX_PAGE_SIZE: u32 = 100;
}

/// Short link conventions
pub mod shortlink {
    /// Literal prefix carried by recipe short codes in URLs
    pub const SHORT_LINK_PREFIX: &str = "r-";
    /// URL path under which short links are served
    pub const SHORT_LINK_PATH: &str = "/s";
}

/// Environment variable names read by configuration
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// JWT signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT expiry override in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Public base URL used when building absolute links
    pub const PUBLIC_URL: &str = "PUBLIC_URL";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default database URL (file-backed `SQLite`)
    pub const DATABASE_URL: &str = "sqlite:data/foodgram.db";
    /// Default public URL
    pub const PUBLIC_URL: &str = "http://localhost:8080";
}
