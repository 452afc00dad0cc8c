// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme that renders a plain-text summary of what it was given.

use std::sync::{Arc, Mutex, PoisonError};

use adminkit_core::AdminError;
use adminkit_plugin::{ExecuteParam, Template, Theme};

/// Entry template for full-page renders.
pub const LAYOUT_TEMPLATE: &str = "layout";
/// Entry template for pjax renders.
pub const CONTENT_TEMPLATE: &str = "content";

/// Records every [`ExecuteParam`] and renders a one-line summary plus the
/// panel content.
///
/// The summary looks like
/// `template=layout pjax=false update_menu=false animation=true no_compress=false menu=[scope] active=Users/List buttons=New user=admin`.
#[derive(Debug, Default)]
pub struct MockTemplate {
    params: Mutex<Vec<ExecuteParam>>,
    fail_with: Option<String>,
}

impl MockTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A template whose every execution fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            params: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Parameters of every execution so far.
    pub fn params(&self) -> Vec<ExecuteParam> {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_param(&self) -> Option<ExecuteParam> {
        self.params().pop()
    }

    pub fn executions(&self) -> usize {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Template for MockTemplate {
    fn execute(&self, name: &str, param: &ExecuteParam) -> Result<Vec<u8>, AdminError> {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(param.clone());

        if let Some(message) = &self.fail_with {
            return Err(AdminError::Template {
                name: name.to_string(),
                message: message.clone(),
            });
        }

        let buttons: Vec<&str> = param.buttons.iter().map(|b| b.title.as_str()).collect();
        let summary = format!(
            "template={name} pjax={} update_menu={} animation={} no_compress={} menu=[{}] active={} buttons={} user={}",
            param.is_pjax,
            param.update_menu,
            param.animation,
            param.no_compress,
            param.menu.plugin_name,
            param.menu.active_titles().join("/"),
            buttons.join(","),
            param.user.name,
        );
        Ok(format!("{summary}\n{}", param.panel.content).into_bytes())
    }
}

/// Theme serving one [`MockTemplate`] for both modes.
pub struct MockTheme {
    name: String,
    template: Arc<MockTemplate>,
}

impl MockTheme {
    pub fn new(name: impl Into<String>, template: Arc<MockTemplate>) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }
}

impl Theme for MockTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_template(&self, is_pjax: bool) -> (Arc<dyn Template>, String) {
        let name = if is_pjax {
            CONTENT_TEMPLATE
        } else {
            LAYOUT_TEMPLATE
        };
        let template: Arc<dyn Template> = self.template.clone();
        (template, name.to_string())
    }
}
