// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Error;
use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;

/// Environment variable naming a toml file used by `EmbedConfig::builder().toml_env()`.
pub const CONFIG_PATH_VAR: &str = "PRESENTATION_WIDGET_CONFIG";

/// Host-side settings for the widget's collaborators, e.g. the REST client.
#[derive(Debug)]
pub struct EmbedConfig {
    debug_enabled: bool,
    toml: String,
}

impl EmbedConfig {
    /// Creates a configuration builder.
    pub fn builder() -> EmbedConfigBuilder {
        EmbedConfigBuilder {
            debug_enabled: false,
            toml: None,
            error: None,
        }
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }

    /// Returns configuration parameters.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        toml::from_str(&self.toml).map_err(|e: toml::de::Error| Error::String(format!("toml: {e}")))
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            debug_enabled: false,
            toml: String::default(),
        }
    }
}

/// Builds an `EmbedConfig` from a toml string or file.
pub struct EmbedConfigBuilder {
    debug_enabled: bool,
    toml: Option<String>,
    error: Option<Error>,
}

impl EmbedConfigBuilder {
    /// Finish building, reporting the first read error, if any.
    pub fn build(self) -> Result<EmbedConfig, Error> {
        if let Some(error) = self.error {
            Err(error)
        } else if let Some(toml) = self.toml {
            Ok(EmbedConfig {
                debug_enabled: self.debug_enabled,
                toml,
            })
        } else {
            Err(Error::String("config not set".to_string()))
        }
    }

    /// Echo log lines to stdout.
    pub fn debug(self, debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            ..self
        }
    }

    /// Read toml from `path`.
    pub fn toml_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match read_to_string(path) {
            Ok(toml) => Self {
                toml: Some(toml),
                error: None,
                ..self
            },
            Err(e) => Self {
                toml: None,
                error: Some(Error::String(format!("{}: cannot read: {e}", path.display()))),
                ..self
            },
        }
    }

    /// Read toml from the file named by `PRESENTATION_WIDGET_CONFIG`, falling
    /// back to an empty configuration when the variable is unset.
    pub fn toml_env(self) -> Self {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => self.toml_file(path),
            Err(_) => self.toml_str(""),
        }
    }

    /// Use `toml` as the configuration text.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Use `toml` as the configuration text.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            toml: Some(toml),
            error: None,
            ..self
        }
    }
}
