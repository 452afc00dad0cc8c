// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted remote catalog.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use adminkit_core::AdminError;
use adminkit_plugin::{CatalogClient, CatalogQuery, Info, Page};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

/// A catalog client that replays queued responses in order.
///
/// Once the queue is drained every call fails with a transport error.
#[derive(Debug, Default)]
pub struct MockCatalogClient {
    responses: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    tokens: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockCatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful listing of `infos`.
    pub async fn push_listing(&self, infos: &[Info], page: Page) {
        self.push_body(listing_body(0, "ok", infos, page)).await;
    }

    /// Queues a well-formed response carrying a non-zero `code`.
    pub async fn push_rejection(&self, code: i64, msg: &str) {
        self.push_body(listing_body(code, msg, &[], Page::default()))
            .await;
    }

    /// Queues a raw response body.
    pub async fn push_body(&self, body: Vec<u8>) {
        self.responses.lock().await.push_back(Ok(body));
    }

    /// Queues a transport failure.
    pub async fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .await
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Tokens passed to every call so far.
    pub async fn tokens(&self) -> Vec<String> {
        self.tokens.lock().await.clone()
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn get_online(&self, _query: &CatalogQuery, token: &str) -> Result<Vec<u8>, AdminError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().await.push(token.to_string());

        let next = self.responses.lock().await.pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(AdminError::Catalog {
                message,
                source: None,
            }),
            None => Err(AdminError::Catalog {
                message: "no scripted catalog response".to_string(),
                source: None,
            }),
        }
    }
}

/// Serializes a catalog response envelope.
pub fn listing_body(code: i64, msg: &str, infos: &[Info], page: Page) -> Vec<u8> {
    json!({
        "code": code,
        "msg": msg,
        "data": {
            "list": infos,
            "count": infos.len(),
            "has_more": false,
            "page": page,
        }
    })
    .to_string()
    .into_bytes()
}
