// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state and rendering helpers embedded in every plugin.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use adminkit_core::{
    AdminError, Buttons, Connection, Context, Menu, Panel, ServiceList, UiService,
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::Value;

use crate::app::App;
use crate::info::Info;
use crate::plugin::Plugin;
use crate::registry::Plugins;
use crate::render::{Composer, RenderOptions, COMPOSER_SERVICE};
use crate::template::render_template_files;

/// Services captured by [`Base::init_base`].
struct BaseState {
    services: ServiceList,
    conn: Arc<dyn Connection>,
    ui: Arc<UiService>,
    composer: Arc<Composer>,
}

/// Route table, identity, and initialized services of a plugin.
///
/// Clones share the same route table and initialization slot.
#[derive(Clone)]
pub struct Base {
    app: Arc<App>,
    plug_name: String,
    url_prefix: String,
    state: Arc<OnceLock<BaseState>>,
}

impl Base {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            app: Arc::new(App::new()),
            plug_name: name.into(),
            url_prefix: prefix.into(),
            state: Arc::new(OnceLock::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.plug_name
    }

    pub fn prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Captures the connection, UI defaults, and composer from `services`.
    ///
    /// Only the first successful call takes effect. A missing UI service
    /// falls back to no default navigation buttons.
    pub fn init_base(&self, services: &ServiceList) -> Result<(), AdminError> {
        if self.state.get().is_some() {
            tracing::warn!(plugin = %self.plug_name, "init_base called twice, keeping first services");
            return Ok(());
        }

        let conn = services.connection()?;
        let composer = services.require::<Composer>(COMPOSER_SERVICE)?;
        let ui = services.ui().unwrap_or_else(|_| {
            tracing::debug!(plugin = %self.plug_name, "no ui service, using empty nav buttons");
            Arc::new(UiService::default())
        });

        let state = BaseState {
            services: services.clone(),
            conn,
            ui,
            composer,
        };
        if self.state.set(state).is_err() {
            tracing::warn!(plugin = %self.plug_name, "concurrent init_base, keeping first services");
        } else {
            tracing::debug!(plugin = %self.plug_name, services = services.len(), "plugin base initialized");
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    fn state(&self) -> Result<&BaseState, AdminError> {
        self.state.get().ok_or_else(|| AdminError::NotInitialized {
            plugin: self.plug_name.clone(),
        })
    }

    pub fn services(&self) -> Result<&ServiceList, AdminError> {
        self.state().map(|s| &s.services)
    }

    pub fn conn(&self) -> Result<Arc<dyn Connection>, AdminError> {
        self.state().map(|s| Arc::clone(&s.conn))
    }

    pub fn ui(&self) -> Result<Arc<UiService>, AdminError> {
        self.state().map(|s| Arc::clone(&s.ui))
    }

    pub fn composer(&self) -> Result<Arc<Composer>, AdminError> {
        self.state().map(|s| Arc::clone(&s.composer))
    }

    /// Renders `panel` with the global menu and the default nav buttons.
    pub async fn execute_tmpl(
        &self,
        ctx: &Context,
        panel: Panel,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let state = self.state()?;
        self.execute_tmpl_with_nav_buttons(ctx, panel, &state.ui.nav_buttons, opts)
            .await
    }

    pub async fn execute_tmpl_with_nav_buttons(
        &self,
        ctx: &Context,
        panel: Panel,
        buttons: &Buttons,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let state = self.state()?;
        let user = state.composer.auth(ctx)?;
        state
            .composer
            .execute(ctx, state.conn.as_ref(), buttons, &user, panel, opts)
            .await
    }

    /// Renders `panel` with the menu scoped to this plugin.
    pub async fn execute_tmpl_with_menu(
        &self,
        ctx: &Context,
        panel: Panel,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let state = self.state()?;
        let user = state.composer.auth(ctx)?;
        state
            .composer
            .execute_with_menu(
                ctx,
                state.conn.as_ref(),
                &state.ui.nav_buttons,
                &user,
                panel,
                &self.plug_name,
                opts,
            )
            .await
    }

    pub fn execute_tmpl_with_custom_menu(
        &self,
        ctx: &Context,
        panel: Panel,
        menu: Menu,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let state = self.state()?;
        self.execute_tmpl_with_menu_and_nav_buttons(ctx, panel, menu, &state.ui.nav_buttons, opts)
    }

    /// Renders with both a caller-built menu and caller-chosen buttons.
    pub fn execute_tmpl_with_menu_and_nav_buttons(
        &self,
        ctx: &Context,
        panel: Panel,
        menu: Menu,
        buttons: &Buttons,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let state = self.state()?;
        let user = state.composer.auth(ctx)?;
        state
            .composer
            .execute_with_custom_menu(ctx, buttons, &user, panel, menu, opts)
    }

    /// 200 HTML page; the menu is scoped to this plugin iff `opts.update_menu`.
    pub async fn html(&self, ctx: &Context, panel: Panel, opts: RenderOptions) -> Response {
        let result = if opts.update_menu {
            self.execute_tmpl_with_menu(ctx, panel, opts).await
        } else {
            self.execute_tmpl(ctx, panel, opts).await
        };
        self.respond(ctx, result)
    }

    pub fn html_custom_menu(
        &self,
        ctx: &Context,
        panel: Panel,
        menu: Menu,
        opts: RenderOptions,
    ) -> Response {
        let result = self.execute_tmpl_with_custom_menu(ctx, panel, menu, opts);
        self.respond(ctx, result)
    }

    pub async fn html_menu(&self, ctx: &Context, panel: Panel, opts: RenderOptions) -> Response {
        let result = self.execute_tmpl_with_menu(ctx, panel, opts).await;
        self.respond(ctx, result)
    }

    pub async fn html_btns(
        &self,
        ctx: &Context,
        panel: Panel,
        buttons: &Buttons,
        opts: RenderOptions,
    ) -> Response {
        let result = self
            .execute_tmpl_with_nav_buttons(ctx, panel, buttons, opts)
            .await;
        self.respond(ctx, result)
    }

    pub fn html_menu_with_btns(
        &self,
        ctx: &Context,
        panel: Panel,
        menu: Menu,
        buttons: &Buttons,
        opts: RenderOptions,
    ) -> Response {
        let result = self.execute_tmpl_with_menu_and_nav_buttons(ctx, panel, menu, buttons, opts);
        self.respond(ctx, result)
    }

    /// Renders the template at `path` against `data` inside the page shell.
    ///
    /// A template that fails to parse or execute shows a warning panel.
    pub async fn html_file(
        &self,
        ctx: &Context,
        path: impl AsRef<Path>,
        data: &Value,
        opts: RenderOptions,
    ) -> Response {
        self.html_files(ctx, data, &[path], opts).await
    }

    /// Like [`html_file`](Self::html_file) with includable sibling templates.
    pub async fn html_files<P: AsRef<Path>>(
        &self,
        ctx: &Context,
        data: &Value,
        files: &[P],
        opts: RenderOptions,
    ) -> Response {
        let production = match self.composer() {
            Ok(composer) => composer.config().is_production(),
            Err(e) => return self.respond(ctx, Err(e)),
        };
        let panel = render_template_files(files, data, production).into_panel();
        self.html(ctx, panel, opts).await
    }

    fn respond(&self, ctx: &Context, result: Result<Vec<u8>, AdminError>) -> Response {
        match result {
            Ok(body) => (StatusCode::OK, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(plugin = %self.plug_name, path = ctx.path(), error = %e, "page render failed");
                (e.status_code(), e.to_string()).into_response()
            }
        }
    }
}

impl std::fmt::Debug for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Base")
            .field("name", &self.plug_name)
            .field("prefix", &self.url_prefix)
            .field("app", &self.app)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// A plugin known only by its metadata, e.g. a remote catalog entry.
#[derive(Debug, Clone)]
pub struct BasePlugin {
    base: Base,
    info: Info,
}

impl BasePlugin {
    pub fn with_info(info: Info) -> Self {
        Self {
            base: Base::new(info.name.clone(), ""),
            info,
        }
    }

    pub fn info(&self) -> &Info {
        &self.info
    }
}

#[async_trait]
impl Plugin for BasePlugin {
    fn base(&self) -> &Base {
        &self.base
    }

    fn name(&self) -> &str {
        &self.info.name
    }

    fn get_info(&self) -> Info {
        self.info.clone()
    }
}

/// Wraps each descriptor in a [`BasePlugin`], keeping order.
pub fn plugins_with_infos(infos: Vec<Info>) -> Plugins {
    infos
        .into_iter()
        .map(|info| Arc::new(BasePlugin::with_info(info)) as Arc<dyn Plugin>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Uri};

    fn ctx() -> Context {
        Context::new(Method::GET, Uri::from_static("/admin/demo"))
    }

    #[tokio::test]
    async fn helpers_fail_before_init() {
        let base = Base::new("demo", "demo");
        assert!(!base.is_initialized());

        let err = base
            .execute_tmpl(&ctx(), Panel::default(), RenderOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::NotInitialized { ref plugin } if plugin == "demo"));

        let res = base
            .html(&ctx(), Panel::default(), RenderOptions::default())
            .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn init_requires_connection() {
        let base = Base::new("demo", "demo");
        let err = base.init_base(&ServiceList::new()).unwrap_err();
        assert!(matches!(err, AdminError::ServiceNotFound(_)));
        assert!(!base.is_initialized());
    }

    #[test]
    fn base_plugin_uses_info() {
        let mut info = Info::new("filemanager");
        info.title = "File Manager".into();
        let plugin = BasePlugin::with_info(info.clone());
        assert_eq!(plugin.name(), "filemanager");
        assert_eq!(plugin.get_info(), info);
        assert!(plugin.get_handler().is_empty());
    }

    #[test]
    fn wraps_infos_in_order() {
        let plugins = plugins_with_infos(vec![Info::new("b"), Info::new("a")]);
        assert_eq!(plugins.names(), vec!["b", "a"]);
    }

    #[test]
    fn clones_share_route_table() {
        let base = Base::new("demo", "demo");
        let clone = base.clone();
        clone.app().get("/x", || async { "x" });
        assert_eq!(base.app().len(), 1);
    }
}
