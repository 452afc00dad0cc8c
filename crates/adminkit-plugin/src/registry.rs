// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry.
//!
//! The registry keeps two ordered lists, both unique by plugin name:
//! the *active* plugins mounted by the host, and *all seen* plugins, which
//! adds every plugin discovered through the remote catalog. All-seen is
//! always a superset of active.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::plugin::Plugin;

/// Ordered list of plugins.
///
/// [`add`](Plugins::add) keeps names unique; collecting from an iterator
/// keeps whatever it is given.
#[derive(Clone, Default)]
pub struct Plugins(Vec<Arc<dyn Plugin>>);

impl Plugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `plugin` unless one with the same name is present.
    ///
    /// Returns whether it was appended.
    pub fn add(&mut self, plugin: Arc<dyn Plugin>) -> bool {
        if self.exist(plugin.as_ref()) {
            return false;
        }
        self.0.push(plugin);
        true
    }

    /// Puts `plugin` in place of the same-named entry, or appends it.
    ///
    /// Returns the entry it replaced.
    pub fn replace(&mut self, plugin: Arc<dyn Plugin>) -> Option<Arc<dyn Plugin>> {
        match self.0.iter_mut().find(|p| p.name() == plugin.name()) {
            Some(slot) => Some(std::mem::replace(slot, plugin)),
            None => {
                self.0.push(plugin);
                None
            }
        }
    }

    /// Name-based membership.
    pub fn exist(&self, plugin: &dyn Plugin) -> bool {
        self.contains_name(plugin.name())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.0.iter().any(|p| p.name() == name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.0.iter().find(|p| p.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Plugin>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Arc<dyn Plugin>> {
        self.0
    }
}

impl FromIterator<Arc<dyn Plugin>> for Plugins {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Plugin>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Plugins {
    type Item = Arc<dyn Plugin>;
    type IntoIter = std::vec::IntoIter<Arc<dyn Plugin>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plugins {
    type Item = &'a Arc<dyn Plugin>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Plugin>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Debug for Plugins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Active and all-seen plugin lists shared across the host.
#[derive(Default)]
pub struct PluginRegistry {
    active: RwLock<Plugins>,
    pub(crate) all_seen: Mutex<Plugins>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plugin` as active; a name already active is left alone.
    ///
    /// The plugin is also recorded in the all-seen list, taking the place of
    /// a catalog entry of the same name.
    pub async fn add(&self, plugin: Arc<dyn Plugin>) -> bool {
        let added = self.active.write().await.add(Arc::clone(&plugin));
        if added {
            self.all_seen.lock().await.replace(Arc::clone(&plugin));
            tracing::debug!(plugin = %plugin.name(), prefix = %plugin.prefix(), "plugin registered");
        } else {
            tracing::debug!(plugin = %plugin.name(), "plugin already registered, ignoring");
        }
        added
    }

    /// Whether a plugin with the same name is active.
    pub async fn exist(&self, plugin: &dyn Plugin) -> bool {
        self.active.read().await.exist(plugin)
    }

    /// Looks `name` up among all seen plugins, active or remote.
    pub async fn find_by_name(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.all_seen.lock().await.find_by_name(name)
    }

    /// Snapshot of the active plugins in registration order.
    pub async fn get(&self) -> Plugins {
        self.active.read().await.clone()
    }

    /// Snapshot of every plugin seen so far.
    pub async fn all_seen(&self) -> Plugins {
        self.all_seen.lock().await.clone()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self
            .active
            .try_read()
            .map(|p| p.names().join(","))
            .unwrap_or_else(|_| "<locked>".to_string());
        f.debug_struct("PluginRegistry")
            .field("active", &active)
            .finish_non_exhaustive()
    }
}
