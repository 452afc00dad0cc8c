// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The authenticated principal and its HTTP permissions.

use serde::{Deserialize, Serialize};

/// Slug that grants every path and method.
pub const SUPER_PERMISSION: &str = "*";

/// A permission grants a set of HTTP methods on a set of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub slug: String,
    /// Allowed methods; empty allows any method.
    #[serde(default)]
    pub http_method: Vec<String>,
    /// Allowed paths; `*` matches everything, a trailing `*` matches a prefix.
    #[serde(default)]
    pub http_path: Vec<String>,
}

impl Permission {
    fn allows(&self, path: &str, method: &str) -> bool {
        if self.slug == SUPER_PERMISSION {
            return true;
        }
        let method_ok = self.http_method.is_empty()
            || self
                .http_method
                .iter()
                .any(|m| m.eq_ignore_ascii_case(method));
        method_ok && self.http_path.iter().any(|p| path_matches(p, path))
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim();
    if pattern == "*" {
        return true;
    }
    match pattern.strip_suffix('*') {
        Some(prefix) => path.starts_with(prefix),
        None => pattern == path,
    }
}

/// The current user/session principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl User {
    /// True if some permission allows `method` on `path` (query string ignored).
    pub fn check_permission(&self, path: &str, method: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.permissions.iter().any(|p| p.allows(path, method))
    }

    pub fn is_super_admin(&self) -> bool {
        self.permissions.iter().any(|p| p.slug == SUPER_PERMISSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(perms: Vec<Permission>) -> User {
        User {
            id: 1,
            name: "admin".into(),
            permissions: perms,
            ..User::default()
        }
    }

    #[test]
    fn super_permission_allows_everything() {
        let u = user(vec![Permission {
            slug: "*".into(),
            ..Permission::default()
        }]);
        assert!(u.is_super_admin());
        assert!(u.check_permission("/anything", "DELETE"));
    }

    #[test]
    fn prefix_and_exact_paths() {
        let u = user(vec![Permission {
            slug: "reports".into(),
            http_method: vec!["get".into()],
            http_path: vec!["/admin/reports/*".into(), "/admin/info".into()],
        }]);
        assert!(u.check_permission("/admin/reports/daily", "GET"));
        assert!(u.check_permission("/admin/info?tab=2", "GET"));
        assert!(!u.check_permission("/admin/info/more", "GET"));
        assert!(!u.check_permission("/admin/reports/daily", "POST"));
    }

    #[test]
    fn no_permissions_denies() {
        assert!(!User::default().check_permission("/", "GET"));
    }
}
