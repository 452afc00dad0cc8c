// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for adminkit integration tests.
//!
//! Mock collaborators for every seam the plugin layer consumes, plus a
//! harness that wires them into a `ServiceList` and `Composer`.
//!
//! # Components
//!
//! - [`MockTemplate`] / [`MockTheme`] - theme that records what it renders
//! - [`MockAuthenticator`], [`MockMenuBuilder`], [`MockConnection`] - request collaborators
//! - [`MockCatalogClient`] - scripted remote catalog
//! - [`TestPlugin`] - minimal plugin with one rendered route
//! - [`TestHarness`] - everything above wired together

pub mod harness;
pub mod mock_catalog;
pub mod mock_services;
pub mod mock_theme;

pub use harness::{TestHarness, TestHarnessBuilder, TestPlugin};
pub use mock_catalog::MockCatalogClient;
pub use mock_services::{super_admin, MockAuthenticator, MockConnection, MockMenuBuilder};
pub use mock_theme::{MockTemplate, MockTheme};
