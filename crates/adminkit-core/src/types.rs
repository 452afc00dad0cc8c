// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page fragments and navigation buttons shared by plugins and themes.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// A pre-rendered content fragment plus the metadata a theme needs to frame it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Panel {
    /// HTML body of the panel. Trusted: themes insert it without escaping.
    pub content: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    /// Seconds between automatic reloads, 0 to disable.
    pub auto_refresh: u32,
}

impl Panel {
    /// Panel with the given HTML content and no metadata.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A navigation button rendered in the page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    pub title: String,
    pub icon: String,
    /// Target URL; empty for buttons that only open a dropdown.
    pub url: String,
    /// HTTP method used for the permission check, empty meaning GET.
    pub method: String,
}

impl Button {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Ordered list of navigation buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Buttons(pub Vec<Button>);

impl Buttons {
    /// Buttons the given user is allowed to follow, order preserved.
    pub fn check_permission(&self, user: &User) -> Buttons {
        Buttons(
            self.0
                .iter()
                .filter(|b| {
                    let method = if b.method.is_empty() { "GET" } else { b.method.as_str() };
                    b.url.is_empty() || user.check_permission(&b.url, method)
                })
                .cloned()
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Button> {
        self.0.iter()
    }
}

impl From<Vec<Button>> for Buttons {
    fn from(buttons: Vec<Button>) -> Self {
        Buttons(buttons)
    }
}

/// UI service registered in the service list; carries the default nav buttons.
#[derive(Debug, Clone, Default)]
pub struct UiService {
    pub nav_buttons: Buttons,
}

impl UiService {
    pub fn new(nav_buttons: Buttons) -> Self {
        Self { nav_buttons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Permission;

    fn user_with_paths(paths: &[&str]) -> User {
        User {
            id: 2,
            name: "operator".into(),
            permissions: vec![Permission {
                slug: "ops".into(),
                http_method: vec![],
                http_path: paths.iter().map(|p| p.to_string()).collect(),
            }],
            ..User::default()
        }
    }

    #[test]
    fn check_permission_keeps_allowed_and_urlless_buttons() {
        let buttons = Buttons(vec![
            Button::new("Dashboard", "/admin/dashboard"),
            Button::new("Settings", "/admin/settings"),
            Button::new("More", ""),
        ]);
        let filtered = buttons.check_permission(&user_with_paths(&["/admin/dashboard"]));

        let titles: Vec<&str> = filtered.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dashboard", "More"]);
    }

    #[test]
    fn check_permission_respects_method() {
        let mut user = user_with_paths(&["/admin/logs"]);
        user.permissions[0].http_method = vec!["GET".into()];
        let buttons = Buttons(vec![Button {
            title: "Purge".into(),
            url: "/admin/logs".into(),
            method: "POST".into(),
            ..Button::default()
        }]);
        assert!(buttons.check_permission(&user).is_empty());
    }

    #[test]
    fn panel_builders() {
        let panel = Panel::from_content("<p>hi</p>")
            .with_title("Title")
            .with_description("Desc");
        assert_eq!(panel.content, "<p>hi</p>");
        assert_eq!(panel.title, "Title");
        assert_eq!(panel.description, "Desc");
        assert_eq!(panel.auto_refresh, 0);
    }
}
