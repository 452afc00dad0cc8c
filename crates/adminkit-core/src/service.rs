// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service locator handed to plugins during initialization.
//!
//! Services are stored by name and retrieved by concrete type. Two names are
//! well known: [`CONNECTION_SERVICE`] holds the database handle and
//! [`UI_SERVICE`] holds the default navigation buttons.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AdminError;
use crate::traits::connection::Connection;
use crate::types::UiService;

pub const CONNECTION_SERVICE: &str = "conn";
pub const UI_SERVICE: &str = "ui";

/// Wrapper so a `dyn Connection` can live in the `Any` map.
struct ConnectionService(Arc<dyn Connection>);

/// Name-keyed, type-checked service container.
#[derive(Clone, Default)]
pub struct ServiceList {
    services: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ServiceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` under `name`, replacing any previous entry.
    pub fn add<T: Any + Send + Sync>(&mut self, name: impl Into<String>, service: T) {
        self.add_shared(name, Arc::new(service));
    }

    pub fn add_shared<T: Any + Send + Sync>(&mut self, name: impl Into<String>, service: Arc<T>) {
        self.services.insert(name.into(), service);
    }

    /// Looks up `name` and downcasts it to `T`.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.services
            .get(name)
            .cloned()
            .and_then(|s| s.downcast::<T>().ok())
    }

    /// Like [`get`](Self::get) but reports a missing or mistyped entry.
    pub fn require<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, AdminError> {
        self.get(name)
            .ok_or_else(|| AdminError::ServiceNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn add_connection(&mut self, conn: Arc<dyn Connection>) {
        self.add(CONNECTION_SERVICE, ConnectionService(conn));
    }

    pub fn connection(&self) -> Result<Arc<dyn Connection>, AdminError> {
        self.require::<ConnectionService>(CONNECTION_SERVICE)
            .map(|c| Arc::clone(&c.0))
    }

    pub fn add_ui(&mut self, ui: UiService) {
        self.add(UI_SERVICE, ui);
    }

    pub fn ui(&self) -> Result<Arc<UiService>, AdminError> {
        self.require(UI_SERVICE)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.services.keys().collect();
        names.sort();
        f.debug_struct("ServiceList").field("services", &names).finish()
    }
}
