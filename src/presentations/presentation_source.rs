// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use crate::configuration::{SortOrder, WidgetConfiguration};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Presentation identifier, e.g. the `guid` of a widget configuration.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PresentationGuid(pub String);
crate::impl_wrapper_str!(PresentationGuid);

/// Everything needed to look up the presentation shown by one widget.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresentationQuery {
    /// Presentation to fetch.
    pub guid: PresentationGuid,
    /// API host without scheme or path.
    pub host: String,
    /// Field to sort by, e.g. `created`.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl PresentationQuery {
    /// Query for a configuration that has already been through `set_defaults`.
    pub fn from_configuration(configuration: &WidgetConfiguration) -> Self {
        Self {
            guid: configuration.guid.clone(),
            host: configuration.host.clone(),
            sort_by: configuration
                .sort_by
                .clone()
                .unwrap_or_else(|| WidgetConfiguration::DEFAULT_SORT_BY.to_string()),
            sort_order: configuration.sort_order.unwrap_or_default(),
        }
    }
}

/// Source of presentation metadata.
#[async_trait]
pub trait PresentationSource {
    /// Fetch the presentation matching `query`.
    async fn get_presentation(&self, query: &PresentationQuery) -> Result<Presentation, Error>;

    /// Provider name.  For example, "rest".
    fn provider_name(&self) -> &'static str;
}

/// Presentation thumbnail.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// CDN copy of the thumbnail, preferred when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_url: Option<String>,
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Presentation metadata. Fields the widget doesn't interpret are kept in `other`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Presentation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<PresentationGuid>,
    /// Presentation title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Creation timestamp as sent by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Display height of the media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_display_height: Option<f64>,
    /// Display width of the media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_display_width: Option<f64>,
    /// URL of the embeddable player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Thumbnail image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Presentation {
    /// Width and height of the media, if both are known and positive.
    pub fn display_dimensions(&self) -> Option<(f64, f64)> {
        match (self.media_display_width, self.media_display_height) {
            (Some(width), Some(height)) if width > 0.0 && height > 0.0 => Some((width, height)),
            _ => None,
        }
    }

    /// Preferred thumbnail URL.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.cdn_url.as_deref().or(t.url.as_deref()))
            .filter(|url| !url.is_empty())
    }

    /// Build guid.
    pub fn guid(mut self, value: &str) -> Self {
        self.guid = Some(PresentationGuid(value.to_string()));
        self
    }

    /// Build display dimensions.
    pub fn media_display(mut self, width: f64, height: f64) -> Self {
        self.media_display_width = Some(width);
        self.media_display_height = Some(height);
        self
    }

    /// Build player URL.
    pub fn player(mut self, value: &str) -> Self {
        self.player = Some(value.to_string());
        self
    }

    /// Build thumbnail URL.
    pub fn thumbnail(mut self, value: &str) -> Self {
        self.thumbnail = Some(Thumbnail {
            cdn_url: None,
            url: Some(value.to_string()),
        });
        self
    }

    /// Build title.
    pub fn title(mut self, value: &str) -> Self {
        self.title = Some(value.to_string());
        self
    }
}
