// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolves the principal of a request.

use crate::context::Context;
use crate::error::AdminError;
use crate::user::User;

/// Returns the current user for a request context.
///
/// Called once per render; implementations should be cheap (session lookup
/// happens in middleware, not here).
pub trait Authenticator: Send + Sync {
    fn auth(&self, ctx: &Context) -> Result<User, AdminError>;
}

/// Reads the `User` the auth middleware stored in the request extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionAuthenticator;

impl Authenticator for ExtensionAuthenticator {
    fn auth(&self, ctx: &Context) -> Result<User, AdminError> {
        ctx.user().cloned().ok_or(AdminError::Unauthenticated)
    }
}
