// ABOUTME: Shared server resources for dependency injection into route handlers
// ABOUTME: Bundles the database, auth manager, and configuration behind one Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Focused dependency injection for route handlers

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;

/// Everything a route handler needs, shared behind an `Arc`
pub struct ServerResources {
    /// Database handle
    pub database: Database,
    /// JWT and password management
    pub auth_manager: AuthManager,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle resources for the router
    #[must_use]
    pub const fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        Self {
            database,
            auth_manager,
            config,
        }
    }
}
