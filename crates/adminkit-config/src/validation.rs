// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::AdminConfig;

/// Collects every semantic problem instead of stopping at the first.
pub fn validate_config(config: &AdminConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.site.theme.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "site.theme must not be empty".to_string(),
        });
    }

    let prefix = &config.site.url_prefix;
    if prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ConfigError::Validation {
            message: format!("site.url_prefix `{prefix}` must not start or end with `/`"),
        });
    }
    if prefix.contains(char::is_whitespace) {
        errors.push(ConfigError::Validation {
            message: format!("site.url_prefix `{prefix}` must not contain whitespace"),
        });
    }

    let url = &config.plugins.catalog.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("plugins.catalog.url `{url}` must be an http(s) URL"),
        });
    }

    if config.plugins.catalog.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "plugins.catalog.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config
        .plugins
        .dir
        .as_deref()
        .is_some_and(|dir| dir.trim().is_empty())
    {
        errors.push(ConfigError::Validation {
            message: "plugins.dir must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AdminConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AdminConfig::default();
        config.site.theme = " ".into();
        config.site.url_prefix = "/admin".into();
        config.plugins.catalog.url = "ftp://catalog".into();
        config.plugins.catalog.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert!(messages.iter().any(|m| m.contains("site.theme")));
        assert!(messages.iter().any(|m| m.contains("site.url_prefix")));
        assert!(messages.iter().any(|m| m.contains("plugins.catalog.url")));
        assert!(messages.iter().any(|m| m.contains("timeout_secs")));
    }

    #[test]
    fn empty_plugin_dir_rejected() {
        let mut config = AdminConfig::default();
        config.plugins.dir = Some(String::new());
        assert!(validate_config(&config).is_err());
    }
}
