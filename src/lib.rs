// ABOUTME: Main library entry point for the Foodgram recipe sharing API
// ABOUTME: Provides REST endpoints for recipes, shopping lists, and short links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

#![deny(unsafe_code)]

//! # Foodgram API
//!
//! A recipe-sharing REST API. Users register, publish recipes with tags and
//! ingredient amounts, favorite recipes, follow other authors, collect
//! recipes into a shopping cart, and download the cart as an aggregated
//! shopping list (plain text or XML). Every recipe also gets a base62
//! short link for sharing.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Plain data records for users, recipes, tags, ingredients
//! - **Database**: `SQLite` persistence with one manager per table family
//! - **Routes**: Axum HTTP handlers, one module per resource
//! - **Shortlink**: Base62 codec behind the `/s/{code}` redirect
//! - **Shopping list**: Pure cart aggregation and report rendering
//! - **Config**: Environment-driven server configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foodgram_api::config::environment::ServerConfig;
//! use foodgram_api::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Foodgram API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and session management
pub mod auth;

/// Configuration management and persistence
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Database management and per-resource managers
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Health checks and monitoring
pub mod health;

/// Production logging and structured output
pub mod logging;

/// Common data models for recipes and users
pub mod models;

/// Page-number pagination for list endpoints
pub mod pagination;

/// Shared server resources for dependency injection
pub mod resources;

/// `HTTP` routes for the REST API surface
pub mod routes;

/// Shopping cart aggregation and report rendering
pub mod shopping_list;

/// Base62 short link codec
pub mod shortlink;
