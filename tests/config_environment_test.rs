// ABOUTME: Tests for environment configuration and database bootstrap
// ABOUTME: Env parsing under serial isolation plus file-backed persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use foodgram_api::config::environment::{DatabaseUrl, Environment, ServerConfig};
use foodgram_api::database::Database;
use serial_test::serial;

fn clear_env() {
    for key in [
        "HTTP_PORT",
        "DATABASE_URL",
        "JWT_SECRET",
        "JWT_EXPIRY_HOURS",
        "PUBLIC_URL",
        "ENVIRONMENT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn from_env_uses_defaults() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.environment, Environment::Development);
    assert!(config.auth.jwt_secret.is_none());
    assert_eq!(config.public_url, "http://localhost:8080");
}

#[test]
#[serial]
fn from_env_reads_overrides() {
    clear_env();
    std::env::set_var("HTTP_PORT", "9000");
    std::env::set_var("ENVIRONMENT", "production");
    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("JWT_SECRET", "sekrit");
    std::env::set_var("JWT_EXPIRY_HOURS", "48");
    std::env::set_var("PUBLIC_URL", "https://foodgram.example/");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9000);
    assert!(config.environment.is_production());
    assert!(matches!(config.database.url, DatabaseUrl::Memory));
    assert_eq!(config.auth.jwt_secret.as_deref(), Some("sekrit"));
    assert_eq!(config.auth.jwt_expiry_hours, 48);
    // Trailing slash is normalized away
    assert_eq!(config.public_url, "https://foodgram.example");

    clear_env();
}

#[test]
#[serial]
fn from_env_rejects_bad_port() {
    clear_env();
    std::env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[tokio::test]
async fn file_backed_database_persists_across_reopen() {
    common::init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("foodgram-test.db"),
    }
    .to_connection_string();

    let user_id = {
        let database = Database::new(&url).await.unwrap();
        let user = common::create_test_user(&database, "jane@example.com", "jane")
            .await
            .unwrap();
        user.id
    };

    // A fresh handle sees the same rows; the schema migration is idempotent
    let reopened = Database::new(&url).await.unwrap();
    let user = reopened.users().get(user_id).await.unwrap().unwrap();
    assert_eq!(user.email, "jane@example.com");
}
