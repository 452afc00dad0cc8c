// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the plugin layer consumes.
//!
//! The surrounding application provides implementations; the plugin layer
//! only ever sees these narrow interfaces.

pub mod auth;
pub mod connection;
pub mod menu;

pub use auth::{Authenticator, ExtensionAuthenticator};
pub use connection::Connection;
pub use menu::MenuBuilder;
