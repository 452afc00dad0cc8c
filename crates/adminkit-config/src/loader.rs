// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./adminkit.toml` > `~/.config/adminkit/adminkit.toml` >
//! `/etc/adminkit/adminkit.toml`, with `ADMINKIT_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AdminConfig;

pub const CONFIG_FILE_NAME: &str = "adminkit.toml";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/adminkit/adminkit.toml`
/// 3. `~/.config/adminkit/adminkit.toml`
/// 4. `./adminkit.toml`
/// 5. `ADMINKIT_*` environment variables
pub fn load_config() -> Result<AdminConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AdminConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AdminConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// The layered Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AdminConfig::default()))
        .merge(Toml::file(Path::new("/etc/adminkit").join(CONFIG_FILE_NAME)))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("adminkit").join(CONFIG_FILE_NAME))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// `ADMINKIT_SITE_URL_PREFIX` -> `site.url_prefix`,
/// `ADMINKIT_PLUGINS_CATALOG_TIMEOUT_SECS` -> `plugins.catalog.timeout_secs`.
///
/// Uses `Env::map()` rather than `split("_")` because key names contain
/// underscores.
fn env_provider() -> Env {
    Env::prefixed("ADMINKIT_").map(|key| {
        let key_str = key.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("plugins_catalog_") {
            format!("plugins.catalog.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("plugins_") {
            format!("plugins.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("site_") {
            format!("site.{rest}")
        } else {
            key_str.to_string()
        };
        mapped.into()
    })
}
