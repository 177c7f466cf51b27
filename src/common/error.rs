// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use hyper::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
/// An enum that encapsulates a variety of error types.
///
/// # Example
///
/// Error::Configuration("`guid` cannot be an empty string".to_string())
pub enum Error {
    /// The widget configuration is invalid and must be corrected by the caller.
    Configuration(String),
    /// HTTP (or miscellaneous network) error
    Http(StatusCode, String),
    /// The widget cannot be mounted into the host document.
    Mount(String),
    /// String error.
    String(String),
}

impl Error {
    /// Shorthand for a configuration error.
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Returns `true` for errors caused by an invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Returns the HTTP status, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::Configuration(mesg) | Error::Mount(mesg) | Error::String(mesg) => {
                Display::fmt(mesg, f)
            }
            Error::Http(status_code, mesg) => Display::fmt(&format!("{status_code}: {mesg}"), f),
        }
    }
}

impl std::error::Error for Error {}
