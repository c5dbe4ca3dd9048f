// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Configuration management

/// Environment-based server configuration
pub mod environment;
