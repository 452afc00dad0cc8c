// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock request collaborators: auth, menu builder, and database handle.

use std::any::Any;
use std::sync::{Mutex, PoisonError};

use adminkit_core::user::SUPER_PERMISSION;
use adminkit_core::{
    AdminError, Authenticator, Connection, Context, Menu, MenuBuilder, Permission, User,
};
use async_trait::async_trait;

/// A user holding the super permission.
pub fn super_admin() -> User {
    User {
        id: 1,
        name: "admin".to_string(),
        roles: vec!["administrator".to_string()],
        permissions: vec![Permission {
            slug: SUPER_PERMISSION.to_string(),
            ..Permission::default()
        }],
        ..User::default()
    }
}

/// Authenticates every request as a fixed user, or rejects them all.
///
/// A user attached to the request context takes precedence.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    user: Option<User>,
}

impl MockAuthenticator {
    pub fn with_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn rejecting() -> Self {
        Self { user: None }
    }
}

impl Authenticator for MockAuthenticator {
    fn auth(&self, ctx: &Context) -> Result<User, AdminError> {
        ctx.user()
            .or(self.user.as_ref())
            .cloned()
            .ok_or(AdminError::Unauthenticated)
    }
}

/// Returns a fixed menu and records which scope each call asked for.
#[derive(Debug, Default)]
pub struct MockMenuBuilder {
    menu: Menu,
    fail: bool,
    scopes: Mutex<Vec<Option<String>>>,
}

impl MockMenuBuilder {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            ..Self::default()
        }
    }

    /// A builder whose every call fails like a broken menu table.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Scope argument of every call so far; `None` is the global menu.
    pub fn scopes(&self) -> Vec<Option<String>> {
        self.scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MenuBuilder for MockMenuBuilder {
    async fn global_menu(
        &self,
        _user: &User,
        _conn: &dyn Connection,
        plugin_name: Option<&str>,
    ) -> Result<Menu, AdminError> {
        self.scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(plugin_name.map(str::to_string));

        if self.fail {
            return Err(AdminError::Menu {
                message: "menu table unavailable".to_string(),
                source: None,
            });
        }

        let mut menu = self.menu.clone();
        menu.plugin_name = plugin_name.unwrap_or_default().to_string();
        Ok(menu)
    }
}

/// Opaque database handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockConnection;

impl Connection for MockConnection {
    fn name(&self) -> &str {
        "mock"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
