// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Option records and their string enums.
mod options;
/// Allow-lists and typed field readers.
mod sanitize;
/// Validation and defaults.
mod service;
/// Unit tests
mod tests;
/// Raw and validated configurations.
mod widget_configuration;

pub use self::options::{
    IframeLoadHandler, PlayIcon, PlaybackMode, PlayerLayout, PlayerParameters, Position, Quality,
    SortOrder, ThumbnailClickHandler, WidgetHandlers, WidgetOptions,
};
pub use self::service::ConfigurationService;
pub use self::widget_configuration::{
    Locales, RawConfiguration, Selector, StringTree, WidgetConfiguration,
};
