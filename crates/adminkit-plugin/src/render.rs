// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page composition: wraps a content panel in the theme's shell.
//!
//! The [`Composer`] is shared read-only across requests. Its configuration
//! lives behind an [`ArcSwap`] so the host can publish a new snapshot without
//! blocking renders in flight.

use std::sync::Arc;

use adminkit_config::AdminConfig;
use adminkit_core::{
    AdminError, Authenticator, Buttons, Connection, Context, Menu, MenuBuilder, Panel, User,
};
use arc_swap::ArcSwap;

use crate::theme::{ExecuteParam, ThemeRegistry};

/// Service name the composer is registered under in a `ServiceList`.
pub const COMPOSER_SERVICE: &str = "composer";

/// Per-render switches forwarded to the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub animation: bool,
    pub no_compress: bool,
    /// Ask the client to refresh its cached sidebar.
    pub update_menu: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            animation: true,
            no_compress: false,
            update_menu: false,
        }
    }
}

impl RenderOptions {
    /// Positional flags: `[animation, no_compress, update_menu]`.
    ///
    /// Animation is on when no flag is given at all.
    pub fn from_flags(flags: &[bool]) -> Self {
        Self {
            animation: flags.first().copied().unwrap_or(flags.is_empty()),
            no_compress: flags.get(1).copied().unwrap_or(false),
            update_menu: flags.get(2).copied().unwrap_or(false),
        }
    }

    pub fn with_animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_no_compress(mut self, no_compress: bool) -> Self {
        self.no_compress = no_compress;
        self
    }

    pub fn with_update_menu(mut self, update_menu: bool) -> Self {
        self.update_menu = update_menu;
        self
    }
}

/// Renders full pages from a panel, a menu, and navigation buttons.
#[derive(Clone)]
pub struct Composer {
    themes: Arc<ThemeRegistry>,
    auth: Arc<dyn Authenticator>,
    menus: Arc<dyn MenuBuilder>,
    config: Arc<ArcSwap<AdminConfig>>,
}

impl Composer {
    pub fn new(
        themes: ThemeRegistry,
        auth: Arc<dyn Authenticator>,
        menus: Arc<dyn MenuBuilder>,
        config: AdminConfig,
    ) -> Self {
        Self::with_shared_config(
            Arc::new(themes),
            auth,
            menus,
            Arc::new(ArcSwap::from_pointee(config)),
        )
    }

    /// Builds a composer reading from a config handle the host also writes to.
    pub fn with_shared_config(
        themes: Arc<ThemeRegistry>,
        auth: Arc<dyn Authenticator>,
        menus: Arc<dyn MenuBuilder>,
        config: Arc<ArcSwap<AdminConfig>>,
    ) -> Self {
        Self {
            themes,
            auth,
            menus,
            config,
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<AdminConfig> {
        self.config.load_full()
    }

    /// Publishes a new configuration for subsequent renders.
    pub fn update_config(&self, config: AdminConfig) {
        self.config.store(Arc::new(config));
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Resolves the principal of the request.
    pub fn auth(&self, ctx: &Context) -> Result<User, AdminError> {
        self.auth.auth(ctx)
    }

    /// Renders with the global menu. `update_menu` follows `opts`.
    pub async fn execute(
        &self,
        ctx: &Context,
        conn: &dyn Connection,
        nav_buttons: &Buttons,
        user: &User,
        panel: Panel,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let config = self.config();
        let menu = self.build_menu(ctx, &config, conn, user, None).await?;
        self.render(ctx, config, user, panel, menu, nav_buttons, opts, opts.update_menu)
    }

    /// Renders with the menu scoped to plugin `name`; always updates the menu.
    #[allow(clippy::too_many_arguments)]
    pub async fn execute_with_menu(
        &self,
        ctx: &Context,
        conn: &dyn Connection,
        nav_buttons: &Buttons,
        user: &User,
        panel: Panel,
        name: &str,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let config = self.config();
        let menu = self
            .build_menu(ctx, &config, conn, user, Some(name))
            .await?;
        self.render(ctx, config, user, panel, menu, nav_buttons, opts, true)
    }

    /// Renders with a caller-supplied menu, used as given.
    pub fn execute_with_custom_menu(
        &self,
        ctx: &Context,
        nav_buttons: &Buttons,
        user: &User,
        panel: Panel,
        menu: Menu,
        opts: RenderOptions,
    ) -> Result<Vec<u8>, AdminError> {
        let config = self.config();
        self.render(ctx, config, user, panel, menu, nav_buttons, opts, true)
    }

    async fn build_menu(
        &self,
        ctx: &Context,
        config: &AdminConfig,
        conn: &dyn Connection,
        user: &User,
        scope: Option<&str>,
    ) -> Result<Menu, AdminError> {
        let menu = self.menus.global_menu(user, conn, scope).await?;
        Ok(menu.set_active_class(&config.url_remove_prefix(ctx.path())))
    }

    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        ctx: &Context,
        config: Arc<AdminConfig>,
        user: &User,
        panel: Panel,
        menu: Menu,
        nav_buttons: &Buttons,
        opts: RenderOptions,
        update_menu: bool,
    ) -> Result<Vec<u8>, AdminError> {
        let is_pjax = ctx.is_pjax();
        let theme = self.themes.require(&config.site.theme)?;
        let (template, template_name) = theme.get_template(is_pjax);

        tracing::debug!(
            theme = theme.name(),
            template = %template_name,
            path = ctx.path(),
            is_pjax,
            update_menu,
            "rendering page"
        );

        let param = ExecuteParam {
            user: user.clone(),
            template_name: template_name.clone(),
            panel,
            config,
            menu,
            animation: opts.animation,
            buttons: nav_buttons.check_permission(user),
            no_compress: opts.no_compress,
            update_menu,
            is_pjax,
        };
        template.execute(&template_name, &param)
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("themes", &self.themes)
            .field("theme", &self.config.load().site.theme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = RenderOptions::default();
        assert!(opts.animation);
        assert!(!opts.no_compress);
        assert!(!opts.update_menu);
        assert_eq!(RenderOptions::from_flags(&[]), opts);
    }

    #[test]
    fn positional_flags() {
        let opts = RenderOptions::from_flags(&[false]);
        assert!(!opts.animation);

        let opts = RenderOptions::from_flags(&[true, true]);
        assert!(opts.animation && opts.no_compress && !opts.update_menu);

        let opts = RenderOptions::from_flags(&[false, false, true]);
        assert!(!opts.animation && !opts.no_compress && opts.update_menu);
    }

    #[test]
    fn builders_chain() {
        let opts = RenderOptions::default()
            .with_animation(false)
            .with_no_compress(true)
            .with_update_menu(true);
        assert_eq!(opts, RenderOptions::from_flags(&[false, true, true]));
    }
}
