// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the adminkit framework.

use thiserror::Error;

/// The primary error type used across plugin, rendering, and service lookups.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration errors (invalid values, missing sections).
    #[error("configuration error: {0}")]
    Config(String),

    /// A rendering helper was used before `init_base` populated the plugin.
    #[error("plugin `{plugin}` used before initialization")]
    NotInitialized { plugin: String },

    /// A named service was not present in the service list.
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// The request carries no authenticated principal.
    #[error("request is not authenticated")]
    Unauthenticated,

    /// The configured theme is not registered.
    #[error("theme not found: {0}")]
    ThemeNotFound(String),

    /// Template lookup or execution failed.
    #[error("template `{name}` failed: {message}")]
    Template { name: String, message: String },

    /// Menu construction failed (usually a database error inside the builder).
    #[error("menu error: {message}")]
    Menu {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Remote catalog transport errors.
    #[error("catalog error: {message}")]
    Catalog {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Errors reported by a plugin's own lifecycle hooks.
    #[error("plugin `{name}`: {message}")]
    Plugin { name: String, message: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// HTTP status code a handler should answer with when this error escapes.
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            AdminError::Unauthenticated => http::StatusCode::UNAUTHORIZED,
            AdminError::Timeout { .. } => http::StatusCode::GATEWAY_TIMEOUT,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
