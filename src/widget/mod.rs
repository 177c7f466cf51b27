// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Yew components the widget is rendered with.
mod components;
/// Host document contract and an in-memory implementation.
mod document;
/// Widget messages.
mod i18n;
mod presentation_widget;
/// Style overrides as custom properties.
mod style;

pub use self::document::{HostDocument, MemoryDocument};
pub use self::i18n::{Translations, DEFAULT_LOCALE};
pub use self::presentation_widget::{PresentationWidget, WidgetContext, WidgetState};
pub use self::style::style_properties;
