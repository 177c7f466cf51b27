// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use crate::log::StringLogger;
use serde_json::{Map, Value};
use std::str::FromStr;

pub(crate) const CONFIGURATION_FIELDS: &[&str] = &[
    "selector",
    "host",
    "guid",
    "widgetOptions",
    "playerParameters",
    "sortBy",
    "sortOrder",
    "locales",
];

pub(crate) const WIDGET_OPTION_FIELDS: &[&str] = &[
    "playbackMode",
    "playIcon",
    "style",
    "onIframeLoad",
    "onThumbnailClick",
];

pub(crate) const PLAY_ICON_FIELDS: &[&str] = &["height", "position", "url", "width"];

pub(crate) const PLAYER_PARAMETER_FIELDS: &[&str] = &[
    "captions",
    "debug",
    "loop",
    "playerConfigurationGuid",
    "pv",
    "quality",
    "reporting",
    "reportingId",
    "showControlPanel",
    "sidebar",
    "speech",
    "speechTerm",
    "start",
    "volume",
];

/// Style values that apply to the widget as a whole.
pub(crate) const STYLE_LEAF_FIELDS: &[&str] = &["borderRadius", "height", "width"];

/// Style groups and the values each one accepts.
pub(crate) const STYLE_GROUP_FIELDS: &[(&str, &[&str])] = &[
    (
        "closeButton",
        &[
            "activeBackgroundColor",
            "activeColor",
            "backgroundColor",
            "boxShadow",
            "color",
            "hoverBackgroundColor",
            "hoverColor",
            "iconSize",
            "padding",
        ],
    ),
    (
        "dialog",
        &[
            "backdropColor",
            "backgroundColor",
            "border",
            "borderRadius",
            "maxWidth",
            "padding",
            "width",
        ],
    ),
    (
        "notFound",
        &["backgroundColor", "border", "color", "iconColor"],
    ),
    (
        "playButton",
        &[
            "activeBackgroundColor",
            "activeColor",
            "backgroundColor",
            "color",
            "height",
            "hoverBackgroundColor",
            "hoverColor",
            "margin",
            "padding",
            "position",
            "width",
        ],
    ),
    ("thumbnail", &["imageFit"]),
];

/// `field` qualified by the dotted `path` of its parent, e.g. `widgetOptions.playIcon`.
pub(crate) fn qualified(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

/// A copy of `object` holding only the `supported` keys, with one warning
/// per dropped key.
pub(crate) fn retain_supported(
    object: &Map<String, Value>,
    supported: &[&str],
    path: &str,
    logger: &StringLogger,
) -> Map<String, Value> {
    object
        .iter()
        .filter(|(field, _)| {
            let keep = supported.contains(&field.as_str());
            if !keep {
                logger.warn(format!(
                    "Unsupported field `{}` in configuration",
                    qualified(path, field)
                ));
            }
            keep
        })
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

/// Typed access to the fields of one (already sanitized) configuration level.
/// A present field of the wrong type is an error, an absent field is `None`.
pub(crate) struct Fields<'a> {
    object: &'a Map<String, Value>,
    path: &'a str,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(object: &'a Map<String, Value>, path: &'a str) -> Self {
        Self { object, path }
    }

    pub(crate) fn contains(&self, field: &str) -> bool {
        self.object.contains_key(field)
    }

    pub(crate) fn get(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field)
    }

    fn wrong_type(&self, field: &str, expected: &str) -> Error {
        Error::configuration(format!(
            "`{}` must be {expected}",
            qualified(self.path, field)
        ))
    }

    pub(crate) fn boolean(&self, field: &str) -> Result<Option<bool>, Error> {
        self.get(field)
            .map(|v| v.as_bool().ok_or_else(|| self.wrong_type(field, "a boolean")))
            .transpose()
    }

    pub(crate) fn number(&self, field: &str) -> Result<Option<f64>, Error> {
        self.get(field)
            .map(|v| v.as_f64().ok_or_else(|| self.wrong_type(field, "a number")))
            .transpose()
    }

    pub(crate) fn non_negative(&self, field: &str) -> Result<Option<f64>, Error> {
        self.get(field)
            .map(|v| {
                v.as_f64()
                    .filter(|n| n.is_finite() && *n >= 0.0)
                    .ok_or_else(|| self.wrong_type(field, "a non-negative number"))
            })
            .transpose()
    }

    pub(crate) fn string(&self, field: &str) -> Result<Option<String>, Error> {
        self.get(field)
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(field, "a string"))
            })
            .transpose()
    }

    /// A nested object. `null` counts as absent.
    pub(crate) fn object(&self, field: &str) -> Result<Option<&'a Map<String, Value>>, Error> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(object)) => Ok(Some(object)),
            Some(_) => Err(self.wrong_type(field, "an object")),
        }
    }

    /// A string parsed with `FromStr`. Anything else, `null` included, fails with `message`.
    pub(crate) fn parsed<T: FromStr>(
        &self,
        field: &str,
        message: impl FnOnce() -> String,
    ) -> Result<Option<T>, Error> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .and_then(|s| T::from_str(s).ok())
                .map(Some)
                .ok_or_else(|| Error::configuration(message())),
        }
    }
}
