// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the adminkit framework.
//!
//! This crate provides the error type, the page types exchanged between
//! plugins and themes, the service locator, and the collaborator traits the
//! plugin layer consumes (auth, menu construction, database handle).

pub mod context;
pub mod error;
pub mod menu;
pub mod service;
pub mod traits;
pub mod types;
pub mod user;

// Re-export key items at crate root for ergonomic imports.
pub use context::{Context, PJAX_HEADER};
pub use error::AdminError;
pub use menu::{Menu, MenuItem};
pub use service::ServiceList;
pub use types::{Button, Buttons, Panel, UiService};
pub use user::{Permission, User};

pub use traits::{Authenticator, Connection, ExtensionAuthenticator, MenuBuilder};
