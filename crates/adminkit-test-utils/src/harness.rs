// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring mock collaborators into a ready-to-render stack.
//!
//! `TestHarness` builds the `ServiceList` a host would hand to plugins:
//! a mock connection, default nav buttons, and a `Composer` over a
//! recording theme.

use std::sync::Arc;

use adminkit_config::AdminConfig;
use adminkit_core::{
    AdminError, Authenticator, Buttons, Context, Menu, Panel, ServiceList, UiService, User,
    PJAX_HEADER,
};
use adminkit_plugin::{
    Base, Composer, ExecuteParam, Plugin, RenderOptions, ThemeRegistry, COMPOSER_SERVICE,
};
use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{Method, Uri};

use crate::mock_services::{super_admin, MockAuthenticator, MockConnection, MockMenuBuilder};
use crate::mock_theme::{MockTemplate, MockTheme};

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    config: AdminConfig,
    user: Option<User>,
    menu: Menu,
    nav_buttons: Buttons,
    template: MockTemplate,
    failing_menu: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: AdminConfig::default(),
            user: Some(super_admin()),
            menu: Menu::default(),
            nav_buttons: Buttons::default(),
            template: MockTemplate::new(),
            failing_menu: false,
        }
    }

    pub fn with_config(mut self, config: AdminConfig) -> Self {
        self.config = config;
        self
    }

    /// Authenticate requests as `user` instead of the super admin.
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Reject every request that carries no user of its own.
    pub fn unauthenticated(mut self) -> Self {
        self.user = None;
        self
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = menu;
        self
    }

    pub fn with_nav_buttons(mut self, buttons: Buttons) -> Self {
        self.nav_buttons = buttons;
        self
    }

    pub fn with_failing_template(mut self, message: &str) -> Self {
        self.template = MockTemplate::failing(message);
        self
    }

    pub fn with_failing_menu(mut self) -> Self {
        self.failing_menu = true;
        self
    }

    pub fn build(self) -> TestHarness {
        let template = Arc::new(self.template);
        let menus = Arc::new(if self.failing_menu {
            MockMenuBuilder::failing()
        } else {
            MockMenuBuilder::new(self.menu)
        });
        let auth: Arc<dyn Authenticator> = Arc::new(match self.user {
            Some(user) => MockAuthenticator::with_user(user),
            None => MockAuthenticator::rejecting(),
        });

        let mut themes = ThemeRegistry::new();
        themes.register(Arc::new(MockTheme::new(
            self.config.site.theme.clone(),
            Arc::clone(&template),
        )));
        let composer = Arc::new(Composer::new(themes, auth, menus.clone(), self.config));

        let mut services = ServiceList::new();
        services.add_connection(Arc::new(MockConnection));
        services.add_ui(UiService::new(self.nav_buttons));
        services.add_shared(COMPOSER_SERVICE, Arc::clone(&composer));

        TestHarness {
            template,
            menus,
            composer,
            services,
        }
    }
}

/// A mock-backed rendering stack.
pub struct TestHarness {
    pub template: Arc<MockTemplate>,
    pub menus: Arc<MockMenuBuilder>,
    pub composer: Arc<Composer>,
    pub services: ServiceList,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with defaults: super admin, empty menu, no nav buttons.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// A full-page GET request for `uri`.
    pub fn request(&self, uri: &str) -> Context {
        let uri: Uri = uri.parse().expect("test URI must be valid");
        Context::new(Method::GET, uri)
    }

    /// A pjax GET request for `uri`.
    pub fn pjax_request(&self, uri: &str) -> Context {
        self.request(uri).with_header(PJAX_HEADER, "true")
    }

    pub fn last_param(&self) -> ExecuteParam {
        self.template
            .last_param()
            .expect("template was never executed")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A plugin that serves one rendered page at `/index`.
#[derive(Debug, Clone)]
pub struct TestPlugin {
    base: Base,
}

impl TestPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            base: Base::new(name, name),
        }
    }
}

#[async_trait]
impl Plugin for TestPlugin {
    fn base(&self) -> &Base {
        &self.base
    }

    async fn init_plugin(&self, services: &ServiceList) -> Result<(), AdminError> {
        self.base.init_base(services)?;

        let base = self.base.clone();
        self.base.app().get("/index", move |request: Request| {
            let base = base.clone();
            async move {
                let (parts, _body) = request.into_parts();
                let ctx = Context::from_parts(&parts);
                let panel = Panel::from_content(format!("{} index", base.name()))
                    .with_title(base.name().to_string());
                base.html(&ctx, panel, RenderOptions::default()).await
            }
        });
        Ok(())
    }

    fn get_index_url(&self) -> String {
        format!("/{}/index", self.base.prefix())
    }
}
