// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque database connection handle.

use std::any::Any;

/// A database handle passed through to menu construction.
///
/// The plugin layer performs no queries itself; menu builders downcast via
/// [`as_any`](Connection::as_any) to their concrete driver type.
pub trait Connection: Send + Sync + std::fmt::Debug {
    /// Driver name, e.g. "sqlite" or "postgres".
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}
