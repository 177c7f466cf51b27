// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! This crate embeds a single hosted video presentation into a host page.
//! It validates the embedding page's configuration, fetches the presentation
//! metadata and mounts an inline or modal player into a host element.

/// Types common to multiple modules.
pub mod common;
pub use common::*;

/// Validation, sanitization and defaults for widget configurations.
pub mod configuration;
pub use configuration::*;

/// Thread-safe logging.
pub mod log;
pub use log::*;

/// Presentation metadata and the services that provide it.
pub mod presentations;
pub use presentations::*;

/// Macros used with `serde` serialization and serialization.
pub mod serde_utils;
pub use serde_utils::*;

#[cfg(feature = "widget")]
/// The presentation widget and the host document it is mounted into.
pub mod widget;
#[cfg(feature = "widget")]
pub use widget::*;
