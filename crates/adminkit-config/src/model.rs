// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the adminkit framework.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// A snapshot of this struct is handed to themes on every render.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Site identity, routing prefix, and theme.
    #[serde(default)]
    pub site: SiteConfig,

    /// Plugin loading and remote catalog settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl AdminConfig {
    /// The mount prefix with a leading slash, `/` when unset.
    pub fn prefix(&self) -> String {
        let trimmed = self.site.url_prefix.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Strips the mount prefix from a request path.
    ///
    /// The bare prefix maps to `/`; paths outside the prefix are returned as-is.
    pub fn url_remove_prefix(&self, path: &str) -> String {
        let prefix = self.prefix();
        if prefix == "/" {
            return path.to_string();
        }
        if path == prefix {
            return "/".to_string();
        }
        match path.strip_prefix(&prefix) {
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            _ => path.to_string(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.site.env == Environment::Prod
    }

    /// Serializes the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Deployment environment; production hides error details from pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Test,
    Prod,
}

/// Site identity and routing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Title shown in the browser tab and header.
    #[serde(default = "default_title")]
    pub title: String,

    /// Path segment every admin route is mounted under, without slashes.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Name of the registered theme used for page templates.
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub env: Environment,

    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            url_prefix: default_url_prefix(),
            theme: default_theme(),
            env: Environment::default(),
            language: default_language(),
        }
    }
}

fn default_title() -> String {
    "Admin".to_string()
}

fn default_url_prefix() -> String {
    "admin".to_string()
}

fn default_theme() -> String {
    "adminlte".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Directory whose plugin libraries are loaded at startup.
    #[serde(default)]
    pub dir: Option<String>,

    /// Remote plugin catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Remote plugin catalog endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            timeout_secs: default_catalog_timeout_secs(),
        }
    }
}

fn default_catalog_url() -> String {
    "https://catalog.adminkit.dev".to_string()
}

fn default_catalog_timeout_secs() -> u64 {
    10
}
