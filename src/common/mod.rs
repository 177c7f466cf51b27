// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(feature = "toml")]
mod config;
/// Handles to host document elements.
mod element;
/// An enum that encapsulates a variety of error types.
mod error;

#[cfg(feature = "toml")]
pub use self::config::{EmbedConfig, EmbedConfigBuilder, CONFIG_PATH_VAR};
pub use self::element::{ElementId, IframeHandle};
pub use self::error::Error;
