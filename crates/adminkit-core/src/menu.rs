// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sidebar menu tree handed to themes.

use serde::{Deserialize, Serialize};

/// A single menu entry, possibly with nested children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub url: String,
    /// Section header rendered above this item, if any.
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: i64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    fn clear_active(&mut self) {
        self.active = false;
        self.children.iter_mut().for_each(MenuItem::clear_active);
    }

    /// Marks the first leaf matching `path` and every ancestor on the way.
    fn mark_active(&mut self, path: &str) -> bool {
        if self.children.is_empty() {
            if self.url == path {
                self.active = true;
            }
            return self.active;
        }
        for child in &mut self.children {
            if child.mark_active(path) {
                self.active = true;
                return true;
            }
        }
        false
    }
}

/// The menu tree for one page render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub list: Vec<MenuItem>,
    /// Plugin the menu was scoped to; empty for the global menu.
    #[serde(default)]
    pub plugin_name: String,
    /// Ask the client to replace its cached sidebar.
    #[serde(default)]
    pub force_update: bool,
}

impl Menu {
    pub fn new(list: Vec<MenuItem>) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    /// Highlights the entry for `path`, ignoring any query string.
    pub fn set_active_class(mut self, path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        self.list.iter_mut().for_each(MenuItem::clear_active);
        for item in &mut self.list {
            if item.mark_active(path) {
                break;
            }
        }
        self
    }

    /// Titles of the active chain, outermost first.
    pub fn active_titles(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut level = &self.list;
        while let Some(item) = level.iter().find(|i| i.active) {
            out.push(item.title.as_str());
            level = &item.children;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Menu {
        Menu::new(vec![
            MenuItem::new(1, "Dashboard", "/"),
            MenuItem::new(2, "Users", "").with_children(vec![
                MenuItem::new(3, "List", "/info/users"),
                MenuItem::new(4, "Roles", "/info/roles"),
            ]),
        ])
    }

    #[test]
    fn marks_leaf_and_parent() {
        let menu = sample().set_active_class("/info/roles?page=2");
        assert_eq!(menu.active_titles(), vec!["Users", "Roles"]);
        assert!(!menu.list[0].active);
    }

    #[test]
    fn clears_previous_state() {
        let menu = sample()
            .set_active_class("/info/users")
            .set_active_class("/");
        assert_eq!(menu.active_titles(), vec!["Dashboard"]);
        assert!(!menu.list[1].children[0].active);
    }

    #[test]
    fn unknown_path_marks_nothing() {
        let menu = sample().set_active_class("/nowhere");
        assert!(menu.active_titles().is_empty());
    }
}
