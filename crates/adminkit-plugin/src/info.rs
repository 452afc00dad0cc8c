// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin metadata as shown in the marketplace and plugin list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Metadata snapshot of a plugin, local or from the remote catalog.
///
/// `name` is the identity key everywhere; `uuid` is informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub banners: Vec<String>,
    pub url: String,
    pub cover: String,
    pub mini_cover: String,
    pub website: String,
    pub agreement: String,
    pub create_date: Option<DateTime<Utc>>,
    pub update_date: Option<DateTime<Utc>>,
    /// Import path of the plugin's source package.
    pub module_path: String,
    pub name: String,
    pub uuid: String,
    pub downloaded: bool,
    /// Price tiers, e.g. `["9.99"]`; empty for free plugins.
    #[serde(deserialize_with = "null_as_default")]
    pub price: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub good_uuids: Vec<String>,
    pub good_num: i64,
    pub comment_num: i64,
    pub order: i64,
    pub features: String,
    #[serde(deserialize_with = "null_as_default")]
    pub questions: Vec<String>,
    pub has_bought: bool,
}

impl Info {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True iff there is no price tier.
    pub fn is_free(&self) -> bool {
        self.price.is_empty()
    }
}

/// Reads an explicit JSON `null` as the type's default.
///
/// The catalog server encodes nil lists and objects as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
