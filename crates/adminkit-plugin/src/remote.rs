// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote plugin catalog.

use std::time::Duration;

use adminkit_config::CatalogConfig;
use adminkit_core::AdminError;
use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{CatalogClient, CatalogQuery};

/// Listing endpoint, relative to the catalog base URL.
const LIST_PATH: &str = "/api/v1/plugin/list";

/// Header carrying the marketplace token.
pub const TOKEN_HEADER: &str = "X-Admin-Token";

/// Catalog client over reqwest.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, AdminError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdminError::Catalog {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Points the client at another catalog, e.g. a mock server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self) -> String {
        format!("{}{LIST_PATH}", self.base_url)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_online(&self, query: &CatalogQuery, token: &str) -> Result<Vec<u8>, AdminError> {
        let mut request = self.client.get(self.list_url()).query(query);
        if !token.is_empty() {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AdminError::Timeout {
                    duration: self.timeout,
                }
            } else {
                AdminError::Catalog {
                    message: format!("catalog request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let status = response.status();
        debug!(status = %status, page = query.page, "catalog response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminError::Catalog {
                message: format!("catalog returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.bytes().await.map_err(|e| AdminError::Catalog {
            message: format!("failed to read catalog response: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(body.to_vec())
    }
}
