// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

#![allow(dead_code, clippy::unwrap_used)]

//! Shared test utilities for `foodgram_api`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use foodgram_api::{
    auth::{hash_password, AuthManager},
    config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    },
    database::Database,
    models::User,
    resources::ServerResources,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (in-memory SQLite with schema applied)
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Server configuration pointing at an in-memory database
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: Some("test-jwt-secret".into()),
            jwt_expiry_hours: 24,
        },
        public_url: "http://localhost:8080".into(),
    }
}

/// Full resource bundle for router tests
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = AuthManager::new(b"test-jwt-secret".to_vec(), 24);
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        test_config(),
    )))
}

/// Create and persist a user, returning the record
pub async fn create_test_user(database: &Database, email: &str, username: &str) -> Result<User> {
    let user = User::new(
        email.to_owned(),
        username.to_owned(),
        "Test".to_owned(),
        "User".to_owned(),
        hash_password("test-password-1")?,
    );
    database.users().create(&user).await?;
    Ok(user)
}
