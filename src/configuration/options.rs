// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::widget_configuration::StringTree;
use crate::common::IframeHandle;
use crate::presentations::Presentation;
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Declares a string-valued enum with `FromStr`, `Display` and serde support.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value, in the order used by error messages.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Returns the wire spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Returns e.g. `"a", "b" or "c"`.
            #[allow(dead_code)]
            pub(crate) fn either_list() -> String {
                let quoted: Vec<String> = Self::ALL.iter().map(|v| format!("\"{v}\"")).collect();
                match quoted.split_last() {
                    Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
                    _ => quoted.join(""),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("{s}: not a valid {}", stringify!($name))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        crate::serde_str!($name);
    };
}

string_enum! {
    /// Whether playback happens inline or in a modal dialog.
    PlaybackMode {
        /// Thumbnail first, player replaces it on click.
        Inline => "inline",
        /// Player loaded immediately, without autoplay.
        InlineAutoload => "inline-autoload",
        /// Player loaded immediately and starts playing.
        InlineAutoplay => "inline-autoplay",
        /// Thumbnail first, player opens in a dialog on click.
        Modal => "modal",
    }
}

string_enum! {
    /// Placement of the play icon over the thumbnail.
    Position {
        /// Top left corner.
        TopLeft => "top-left",
        /// Top edge.
        Top => "top",
        /// Top right corner.
        TopRight => "top-right",
        /// Left edge.
        Left => "left",
        /// Center.
        Center => "center",
        /// Right edge.
        Right => "right",
        /// Bottom left corner.
        BottomLeft => "bottom-left",
        /// Bottom edge.
        Bottom => "bottom",
        /// Bottom right corner.
        BottomRight => "bottom-right",
    }
}

string_enum! {
    /// Player video quality.
    Quality {
        /// 240p
        P240 => "240p",
        /// 480p
        P480 => "480p",
        /// 720p
        P720 => "720p",
        /// 1080p
        P1080 => "1080p",
        /// 1440p
        P1440 => "1440p",
        /// Chosen by the player.
        Auto => "auto",
        /// Highest available.
        Best => "best",
    }
}

string_enum! {
    /// Player view layout (`pv`).
    PlayerLayout {
        /// Picture in picture, large.
        Pipls => "pipls",
        /// Picture in picture, small.
        Pipss => "pipss",
        /// Side by side.
        Sbs => "sbs",
    }
}

string_enum! {
    /// Sort direction used when fetching a presentation.
    #[derive(Default)]
    SortOrder {
        /// Oldest (or lowest) first.
        Ascending => "ASCENDING",
        /// Newest (or highest) first.
        #[default]
        Descending => "DESCENDING",
    }
}

impl Position {
    /// CSS `place-items` alignment as `(vertical, horizontal)`.
    pub fn place_items(&self) -> (&'static str, &'static str) {
        let s = self.as_str();
        let x = if s.contains("left") {
            "start"
        } else if s.contains("right") {
            "end"
        } else {
            "center"
        };
        let y = if s.contains("top") {
            "start"
        } else if s.contains("bottom") {
            "end"
        } else {
            "center"
        };
        (y, x)
    }
}

/// Play icon drawn over the thumbnail.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayIcon {
    /// Height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Placement over the thumbnail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Custom icon image; the built-in icon is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Parameters forwarded to the player as query parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerParameters {
    /// Captions language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<String>,
    /// Player debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// Restart when playback ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#loop: Option<bool>,
    /// Player configuration to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_configuration_guid: Option<String>,
    /// Layout of the player view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pv: Option<PlayerLayout>,
    /// Video quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Playback reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting: Option<bool>,
    /// Identifier attached to reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_id: Option<String>,
    /// Show the control panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_control_panel: Option<bool>,
    /// Show the sidebar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<bool>,
    /// Speech track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    /// Speech search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_term: Option<String>,
    /// Start offset in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Initial volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PlayerParameters {
    /// The parameters that are set, as `(name, value)` query pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let flag = |b: &bool| b.to_string();
        let number = |n: &f64| n.to_string();
        [
            ("captions", self.captions.clone()),
            ("debug", self.debug.as_ref().map(flag)),
            ("loop", self.r#loop.as_ref().map(flag)),
            (
                "playerConfigurationGuid",
                self.player_configuration_guid.clone(),
            ),
            ("pv", self.pv.map(|pv| pv.to_string())),
            ("quality", self.quality.map(|q| q.to_string())),
            ("reporting", self.reporting.as_ref().map(flag)),
            ("reportingId", self.reporting_id.clone()),
            ("showControlPanel", self.show_control_panel.as_ref().map(flag)),
            ("sidebar", self.sidebar.as_ref().map(flag)),
            ("speech", self.speech.clone()),
            ("speechTerm", self.speech_term.clone()),
            ("start", self.start.as_ref().map(number)),
            ("volume", self.volume.as_ref().map(number)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Called with the player iframe once it has loaded.
pub type IframeLoadHandler = Arc<dyn Fn(&IframeHandle) + Send + Sync>;

/// Called instead of opening the player when the thumbnail is clicked.
pub type ThumbnailClickHandler = Arc<dyn Fn(&Presentation) + Send + Sync>;

/// Callbacks supplied by the embedding code.
#[derive(Clone, Default)]
pub struct WidgetHandlers {
    /// See `IframeLoadHandler`.
    pub on_iframe_load: Option<IframeLoadHandler>,
    /// See `ThumbnailClickHandler`. Only used in `inline` playback mode.
    pub on_thumbnail_click: Option<ThumbnailClickHandler>,
}

impl Debug for WidgetHandlers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetHandlers")
            .field("on_iframe_load", &self.on_iframe_load.is_some())
            .field("on_thumbnail_click", &self.on_thumbnail_click.is_some())
            .finish()
    }
}

/// Widget presentation options.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Inline or modal playback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_mode: Option<PlaybackMode>,
    /// Play icon appearance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_icon: Option<PlayIcon>,
    /// Style overrides, applied as CSS custom properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StringTree>,
    /// Callbacks.
    #[serde(skip)]
    pub handlers: WidgetHandlers,
}
