// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the adminkit framework.
//!
//! TOML configuration with strict key checking, layered file lookup,
//! `ADMINKIT_` environment overrides, and miette diagnostics.
//!
//! ```no_run
//! use adminkit_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("mounted at {}", config.prefix());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use model::{AdminConfig, CatalogConfig, Environment, PluginsConfig, SiteConfig};

/// Load configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<AdminConfig, Vec<ConfigError>> {
    let config = loader::load_config().map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    tracing::debug!(prefix = %config.prefix(), theme = %config.site.theme, "configuration loaded");
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<AdminConfig, Vec<ConfigError>> {
    let config =
        loader::load_config_from_str(toml_content).map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
