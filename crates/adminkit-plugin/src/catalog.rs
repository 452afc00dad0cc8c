// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconciliation of the local plugin list with the remote catalog.
//!
//! [`PluginRegistry::get_all`] never fails: transport problems, bad payloads,
//! and rejections all degrade to an empty list. Callers that need to tell
//! these apart use [`PluginRegistry::try_get_all`].

use std::sync::Arc;

use adminkit_core::AdminError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base::plugins_with_infos;
use crate::info::{null_as_default, Info};
use crate::registry::{PluginRegistry, Plugins};

/// Presentation fragments the catalog sends along with a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub css: String,
    pub html: String,
    pub js: String,
}

/// Envelope of a catalog listing; `code != 0` means the server refused.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogResponse {
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: CatalogData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    #[serde(deserialize_with = "null_as_default")]
    pub list: Vec<Info>,
    pub count: i64,
    pub has_more: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub page: Page,
}

/// Listing filters sent to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            free: None,
            filter: String::new(),
            order: String::new(),
            lang: String::new(),
            category_id: None,
        }
    }
}

/// Fetches raw catalog listings.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn get_online(&self, query: &CatalogQuery, token: &str) -> Result<Vec<u8>, AdminError>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[source] AdminError),

    #[error("catalog response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("catalog rejected the request (code {code}): {msg}")]
    Rejected { code: i64, msg: String },
}

impl PluginRegistry {
    /// Fetches the catalog and merges it into the registry.
    ///
    /// Returned entries keep catalog order. A name that is active resolves to
    /// the active instance; every other entry is a [`BasePlugin`](crate::BasePlugin)
    /// over the catalog info. Entries not yet seen are appended to the
    /// all-seen list.
    pub async fn try_get_all(
        &self,
        client: &dyn CatalogClient,
        query: &CatalogQuery,
        token: &str,
    ) -> Result<(Plugins, Page), CatalogError> {
        let raw = client
            .get_online(query, token)
            .await
            .map_err(CatalogError::Transport)?;
        let response: CatalogResponse =
            serde_json::from_slice(&raw).map_err(CatalogError::Decode)?;
        if response.code != 0 {
            return Err(CatalogError::Rejected {
                code: response.code,
                msg: response.msg,
            });
        }

        let active = self.get().await;
        let plugins: Plugins = plugins_with_infos(response.data.list)
            .into_iter()
            .map(|remote| active.find_by_name(remote.name()).unwrap_or(remote))
            .collect();

        let mut all_seen = self.all_seen.lock().await;
        let mut discovered = 0usize;
        for plugin in &plugins {
            if all_seen.add(Arc::clone(plugin)) {
                discovered += 1;
            }
        }
        drop(all_seen);

        tracing::debug!(
            listed = plugins.len(),
            discovered,
            count = response.data.count,
            has_more = response.data.has_more,
            "catalog merged"
        );
        Ok((plugins, response.data.page))
    }

    /// Like [`try_get_all`](Self::try_get_all), but any failure yields an
    /// empty list and an empty page and leaves the registry untouched.
    pub async fn get_all(
        &self,
        client: &dyn CatalogClient,
        query: &CatalogQuery,
        token: &str,
    ) -> (Plugins, Page) {
        match self.try_get_all(client, query, token).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "plugin catalog unavailable, showing local plugins only");
                (Plugins::default(), Page::default())
            }
        }
    }
}
