// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only view of the incoming request used by rendering and auth.

use http::request::Parts;
use http::{HeaderMap, HeaderValue, Method, Uri};

use crate::user::User;

/// Header set by pjax clients on partial navigations (`X-PJAX`).
pub const PJAX_HEADER: &str = "x-pjax";

/// The parts of a request the plugin layer looks at.
#[derive(Debug, Clone)]
pub struct Context {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    user: Option<User>,
}

impl Context {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            user: None,
        }
    }

    /// Builds a context from request parts; a `User` extension set by the
    /// auth middleware becomes the principal.
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            user: parts.extensions.get::<User>().cloned(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True for partial (pjax) navigations.
    pub fn is_pjax(&self) -> bool {
        self.header(PJAX_HEADER) == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pjax_detection() {
        let uri: Uri = "/admin/info/users?page=1".parse().unwrap();
        let ctx = Context::new(Method::GET, uri.clone());
        assert!(!ctx.is_pjax());
        assert_eq!(ctx.path(), "/admin/info/users");

        let ctx = Context::new(Method::GET, uri).with_header(PJAX_HEADER, "true");
        assert!(ctx.is_pjax());
    }

    #[test]
    fn from_parts_picks_up_user_extension() {
        let mut req = http::Request::builder()
            .uri("/admin")
            .header(PJAX_HEADER, "true")
            .body(())
            .unwrap();
        req.extensions_mut().insert(User {
            id: 7,
            name: "seven".into(),
            ..User::default()
        });
        let (parts, _) = req.into_parts();

        let ctx = Context::from_parts(&parts);
        assert!(ctx.is_pjax());
        assert_eq!(ctx.user().map(|u| u.id), Some(7));
    }
}
