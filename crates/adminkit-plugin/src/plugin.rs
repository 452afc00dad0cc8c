// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The contract every adminkit plugin satisfies.
//!
//! Only [`Plugin::base`] is required. Everything else has a default that
//! reads from the embedded [`Base`], so a minimal plugin is a struct holding
//! a `Base` plus whatever routes it registers in `init_plugin`.

use std::sync::Arc;

use adminkit_core::{AdminError, Context, Panel, ServiceList};
use async_trait::async_trait;

use crate::app::{App, HandlerMap};
use crate::base::Base;
use crate::info::Info;

/// Installation wizard a plugin may expose before it is usable.
#[derive(Clone, Default)]
pub enum InstallationPage {
    /// No wizard; the plugin is usable right away.
    #[default]
    Skip,
    /// Builds the wizard panel for a request.
    Wizard(Arc<dyn Fn(&Context) -> Panel + Send + Sync>),
}

impl InstallationPage {
    pub fn wizard<F>(generator: F) -> Self
    where
        F: Fn(&Context) -> Panel + Send + Sync + 'static,
    {
        Self::Wizard(Arc::new(generator))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// Renders the wizard, `None` when there is nothing to install.
    pub fn render(&self, ctx: &Context) -> Option<Panel> {
        match self {
            Self::Skip => None,
            Self::Wizard(generator) => Some(generator(ctx)),
        }
    }
}

impl std::fmt::Debug for InstallationPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => f.write_str("Skip"),
            Self::Wizard(_) => f.write_str("Wizard(..)"),
        }
    }
}

/// Result of [`Plugin::check_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCheck {
    pub has_update: bool,
    /// Empty when no newer version is known.
    pub latest_version: String,
}

impl UpdateCheck {
    pub fn available(version: impl Into<String>) -> Self {
        Self {
            has_update: true,
            latest_version: version.into(),
        }
    }
}

/// An admin-panel extension module.
#[async_trait]
pub trait Plugin: Send + Sync + 'static {
    /// The embedded base holding the route table and initialized services.
    fn base(&self) -> &Base;

    /// Identity key; unique within a registry.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// URL segment the plugin's routes are mounted under.
    fn prefix(&self) -> &str {
        self.base().prefix()
    }

    fn get_handler(&self) -> HandlerMap {
        get_handler(self.base().app())
    }

    /// Called once by the host with the shared services.
    async fn init_plugin(&self, _services: &ServiceList) -> Result<(), AdminError> {
        Ok(())
    }

    fn get_info(&self) -> Info {
        Info::default()
    }

    fn get_index_url(&self) -> String {
        String::new()
    }

    fn get_installation_page(&self) -> InstallationPage {
        InstallationPage::Skip
    }

    fn is_installed(&self) -> bool {
        false
    }

    /// Implementations that hit the network bound the call with a timeout.
    async fn check_update(&self) -> UpdateCheck {
        UpdateCheck::default()
    }

    async fn uninstall(&self) -> Result<(), AdminError> {
        Ok(())
    }

    async fn upgrade(&self) -> Result<(), AdminError> {
        Ok(())
    }
}

/// Snapshot of the handlers registered on `app`.
pub fn get_handler(app: &App) -> HandlerMap {
    app.handlers()
}
