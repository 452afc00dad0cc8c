// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin subsystem for the adminkit framework.
//!
//! - [`Plugin`] is the contract every extension satisfies, with defaults
//!   supplied by an embedded [`Base`].
//! - [`Composer`] wraps content panels in the active theme's page shell.
//! - [`PluginRegistry`] tracks active plugins and every plugin seen in the
//!   remote catalog, merged by [`PluginRegistry::get_all`].
//! - [`load_from_plugin`] loads plugins from shared libraries.

pub mod app;
pub mod base;
pub mod catalog;
pub mod info;
pub mod loader;
pub mod plugin;
pub mod registry;
pub mod remote;
pub mod render;
pub mod template;
pub mod theme;

pub use app::{into_router, App, HandlerMap, RouteKey};
pub use base::{plugins_with_infos, Base, BasePlugin};
pub use catalog::{CatalogClient, CatalogError, CatalogQuery, CatalogResponse, Page};
pub use info::Info;
pub use loader::{
    load_from_config, load_from_plugin, plugin_libraries, try_load_from_dir, try_load_from_plugin,
    LoadError, PluginDeclaration,
};
pub use plugin::{get_handler, InstallationPage, Plugin, UpdateCheck};
pub use registry::{PluginRegistry, Plugins};
pub use remote::HttpCatalogClient;
pub use render::{Composer, RenderOptions, COMPOSER_SERVICE};
pub use template::{render_template_files, warning_panel, FileTemplate, RenderedPanel, TemplateError};
pub use theme::{ExecuteParam, Template, Theme, ThemeRegistry};
