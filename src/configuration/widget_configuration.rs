// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::options::{PlaybackMode, PlayerParameters, SortOrder, WidgetHandlers, WidgetOptions};
use crate::common::{ElementId, IframeHandle};
use crate::presentations::{Presentation, PresentationGuid};
use crate::serde_utils::is_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A string, or a map of nested `StringTree`s. Used for translation messages
/// and style overrides.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringTree {
    /// A single value.
    Leaf(String),
    /// Named children.
    Branch(BTreeMap<String, StringTree>),
}

impl StringTree {
    /// Converts `value` if it only contains strings and objects of strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(StringTree::Leaf(s.clone())),
            Value::Object(object) => object
                .iter()
                .map(|(k, v)| Self::from_value(v).map(|tree| (k.clone(), tree)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(StringTree::Branch),
            _ => None,
        }
    }

    /// Looks up a dot-separated path, e.g. `common.Play`.
    pub fn get(&self, path: &str) -> Option<&str> {
        path.split('.')
            .try_fold(self, |tree, segment| match tree {
                StringTree::Branch(children) => children.get(segment),
                StringTree::Leaf(_) => None,
            })
            .and_then(|tree| match tree {
                StringTree::Leaf(s) => Some(s.as_str()),
                StringTree::Branch(_) => None,
            })
    }

    /// Every leaf with the path of keys leading to it, depth first in key order.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &str)> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, path: &mut Vec<&'a str>, leaves: &mut Vec<(Vec<&'a str>, &'a str)>) {
        match self {
            StringTree::Leaf(s) => leaves.push((path.clone(), s.as_str())),
            StringTree::Branch(children) => {
                for (key, child) in children {
                    path.push(key.as_str());
                    child.collect_leaves(path, leaves);
                    path.pop();
                }
            }
        }
    }
}

/// Translation overrides, keyed by locale (e.g. `en`, `fr-FR`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locales(pub BTreeMap<String, StringTree>);

/// Where the widget is mounted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Selector {
    /// CSS selector resolved against the host document.
    Css(String),
    /// Element supplied directly by the embedding code.
    Element(ElementId),
}

/// A configuration as supplied by the embedding page, before validation.
#[derive(Clone, Debug)]
pub struct RawConfiguration {
    element: Option<ElementId>,
    handlers: WidgetHandlers,
    value: Value,
}

impl RawConfiguration {
    /// Wrap the JSON configuration object.
    pub fn new(value: Value) -> Self {
        Self {
            element: None,
            handlers: WidgetHandlers::default(),
            value,
        }
    }

    /// Mount into `element` instead of resolving a `selector`.
    pub fn element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// Register the iframe load callback.
    pub fn on_iframe_load(mut self, handler: impl Fn(&IframeHandle) + Send + Sync + 'static) -> Self {
        self.handlers.on_iframe_load = Some(Arc::new(handler));
        self
    }

    /// Register the thumbnail click callback.
    pub fn on_thumbnail_click(
        mut self,
        handler: impl Fn(&Presentation) + Send + Sync + 'static,
    ) -> Self {
        self.handlers.on_thumbnail_click = Some(Arc::new(handler));
        self
    }

    /// Callbacks registered so far.
    pub fn handlers(&self) -> &WidgetHandlers {
        &self.handlers
    }

    /// Element supplied with `element()`, if any.
    pub fn supplied_element(&self) -> Option<ElementId> {
        self.element
    }

    /// The JSON configuration object.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for RawConfiguration {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// A validated configuration. After `ConfigurationService::set_defaults`
/// every defaulted field is populated and `host` is a bare authority.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfiguration {
    /// Presentation to show.
    pub guid: PresentationGuid,
    /// API host.
    pub host: String,
    /// Mount target.
    pub selector: Selector,
    /// Player query parameters.
    pub player_parameters: PlayerParameters,
    /// Widget options.
    pub widget_options: WidgetOptions,
    /// Fetch ordering field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Fetch ordering direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Translation overrides.
    #[serde(skip_serializing_if = "is_default")]
    pub locales: Locales,
}

impl WidgetConfiguration {
    /// Default height and width of the play icon.
    pub const DEFAULT_PLAY_ICON_SIZE: f64 = 44.0;
    /// Default fetch ordering field.
    pub const DEFAULT_SORT_BY: &'static str = "created";

    /// Playback mode, `inline` if unset.
    pub fn playback_mode(&self) -> PlaybackMode {
        self.widget_options
            .playback_mode
            .unwrap_or(PlaybackMode::Inline)
    }
}
