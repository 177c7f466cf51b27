// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Presentation record and source trait
mod presentation_source;

#[cfg(feature = "rest")]
/// Support for the widgets REST endpoint.
mod rest;


pub use self::presentation_source::{
    Presentation, PresentationGuid, PresentationQuery, PresentationSource, Thumbnail,
};
#[cfg(feature = "rest")]
pub use self::rest::RestPresentations;
