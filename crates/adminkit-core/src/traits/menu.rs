// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the sidebar menu for a user.

use async_trait::async_trait;

use crate::error::AdminError;
use crate::menu::Menu;
use crate::traits::connection::Connection;
use crate::user::User;

/// Produces the menu tree visible to `user`.
///
/// `plugin_name` scopes the menu to one plugin's entries; `None` yields the
/// global menu. Implementations usually query the database through `conn`.
#[async_trait]
pub trait MenuBuilder: Send + Sync {
    async fn global_menu(
        &self,
        user: &User,
        conn: &dyn Connection,
        plugin_name: Option<&str>,
    ) -> Result<Menu, AdminError>;
}
