// ABOUTME: Server health monitoring for operational visibility
// ABOUTME: Service info plus a database reachability probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Health check types and probes

use crate::constants::service_names;
use crate::database::Database;
use serde::{Deserialize, Serialize};

/// Overall health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Whether the database answered the probe
    pub database: bool,
}

/// Run the health probes
pub async fn check(database: &Database) -> HealthResponse {
    let database_ok = database.ping().await.is_ok();

    HealthResponse {
        status: if database_ok {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
        service: service_names::FOODGRAM_API.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        database: database_ok,
    }
}
