// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme registry and the template interface themes implement.

use std::collections::HashMap;
use std::sync::Arc;

use adminkit_config::AdminConfig;
use adminkit_core::{AdminError, Buttons, Menu, Panel, User};
use serde::Serialize;

/// Everything a page template receives.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteParam {
    pub user: User,
    pub template_name: String,
    pub panel: Panel,
    pub config: Arc<AdminConfig>,
    pub menu: Menu,
    pub animation: bool,
    pub buttons: Buttons,
    pub no_compress: bool,
    pub update_menu: bool,
    pub is_pjax: bool,
}

/// A compiled page template set.
pub trait Template: Send + Sync {
    /// Renders the template called `name` into bytes.
    fn execute(&self, name: &str, param: &ExecuteParam) -> Result<Vec<u8>, AdminError>;
}

/// A theme provides a full-page and a pjax template.
pub trait Theme: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the template set and the entry template name for the mode.
    fn get_template(&self, is_pjax: bool) -> (Arc<dyn Template>, String);
}

/// Themes keyed by name.
#[derive(Clone, Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, Arc<dyn Theme>>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a theme under its own name, replacing a previous one.
    pub fn register(&mut self, theme: Arc<dyn Theme>) {
        tracing::debug!(theme = theme.name(), "theme registered");
        self.themes.insert(theme.name().to_string(), theme);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Theme>> {
        self.themes.get(name).cloned()
    }

    /// Like [`get`](Self::get) but reports a missing theme.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Theme>, AdminError> {
        self.get(name)
            .ok_or_else(|| AdminError::ThemeNotFound(name.to_string()))
    }

    /// Registered theme names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl std::fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("themes", &self.names())
            .finish()
    }
}
