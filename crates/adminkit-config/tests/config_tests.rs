// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the adminkit configuration system.

use adminkit_config::diagnostic::ConfigError;
use adminkit_config::{
    load_and_validate_str, load_config, load_config_from_str, AdminConfig, Environment,
};

#[test]
fn valid_toml_deserializes() {
    let toml = r#"
[site]
title = "Back Office"
url_prefix = "backoffice"
theme = "sword"
env = "prod"
language = "fr"

[plugins]
dir = "/opt/plugins"

[plugins.catalog]
url = "https://plugins.example.com"
timeout_secs = 3
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.site.title, "Back Office");
    assert_eq!(config.prefix(), "/backoffice");
    assert_eq!(config.site.theme, "sword");
    assert_eq!(config.site.env, Environment::Prod);
    assert!(config.is_production());
    assert_eq!(config.site.language, "fr");
    assert_eq!(config.plugins.dir.as_deref(), Some("/opt/plugins"));
    assert_eq!(config.plugins.catalog.url, "https://plugins.example.com");
    assert_eq!(config.plugins.catalog.timeout_secs, 3);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    assert_eq!(config, AdminConfig::default());
}

#[test]
fn unknown_field_is_rejected() {
    let toml = r#"
[site]
thme = "dark"
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = err.to_string();
    assert!(
        err_str.contains("unknown field") || err_str.contains("thme"),
        "error should mention the bad key, got: {err_str}"
    );
}

#[test]
fn unknown_field_gets_suggestion() {
    let toml = r#"
[site]
thme = "dark"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. } if key == "thme" && s == "theme"
    )));
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[plugins.catalog]
timeout_secs = "soon"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(!errors.is_empty());
}

#[test]
fn validation_runs_after_parse() {
    let toml = r#"
[site]
url_prefix = "/admin/"
"#;
    let errors = load_and_validate_str(toml).expect_err("slashes are rejected");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn local_file_and_env_override() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "adminkit.toml",
            r#"
[site]
theme = "sword"
url_prefix = "panel"
"#,
        )?;
        jail.set_env("ADMINKIT_SITE_THEME", "adminlte");
        jail.set_env("ADMINKIT_PLUGINS_CATALOG_TIMEOUT_SECS", "30");

        let config = load_config().expect("config should load");
        assert_eq!(config.site.theme, "adminlte");
        assert_eq!(config.site.url_prefix, "panel");
        assert_eq!(config.plugins.catalog.timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn effective_config_dumps_as_loadable_toml() {
    let mut config = AdminConfig::default();
    config.site.env = Environment::Test;
    config.plugins.dir = Some("/var/lib/adminkit/plugins".to_string());

    let dumped = config.to_toml().expect("config serializes");
    assert!(dumped.contains("env = \"test\""));
    let reloaded = load_config_from_str(&dumped).expect("dump reloads");
    assert_eq!(reloaded, config);
}
