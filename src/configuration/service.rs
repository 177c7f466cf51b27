// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::options::{
    PlayIcon, PlaybackMode, PlayerLayout, PlayerParameters, Position, Quality, SortOrder,
    WidgetHandlers, WidgetOptions,
};
use super::sanitize::{
    qualified, retain_supported, Fields, CONFIGURATION_FIELDS, PLAYER_PARAMETER_FIELDS,
    PLAY_ICON_FIELDS, STYLE_GROUP_FIELDS, STYLE_LEAF_FIELDS, WIDGET_OPTION_FIELDS,
};
use super::widget_configuration::{
    Locales, RawConfiguration, Selector, StringTree, WidgetConfiguration,
};
use crate::common::{ElementId, Error};
use crate::log::StringLogger;
use crate::presentations::PresentationGuid;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;

const HTTPS_PREFIX: &str = "https://";

/// Turns an untrusted configuration into a safe, fully defaulted one, or fails fast.
///
/// Fatal problems are returned as `Error::Configuration`. Non-fatal ones
/// (unsupported fields, options that don't apply to the playback mode) are
/// written to the logger as warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigurationService;

impl ConfigurationService {
    /// `validate_and_sanitize` followed by `set_defaults`.
    pub fn create_configuration(
        &self,
        raw: &RawConfiguration,
        logger: &StringLogger,
    ) -> Result<WidgetConfiguration, Error> {
        self.validate_and_sanitize(raw, logger)
            .map(|configuration| self.set_defaults(configuration))
    }

    /// Validate `raw`, dropping unsupported fields. `raw` is never modified.
    pub fn validate_and_sanitize(
        &self,
        raw: &RawConfiguration,
        logger: &StringLogger,
    ) -> Result<WidgetConfiguration, Error> {
        let Some(object) = raw.value().as_object() else {
            return Err(Error::configuration("Configuration must be a valid object"));
        };
        let mut configuration = retain_supported(object, CONFIGURATION_FIELDS, "", logger);

        let selector = match raw.supplied_element() {
            Some(element) => Self::supplied_selector(&mut configuration, element, logger),
            None => Selector::Css(Self::required_string(&configuration, "selector")?),
        };
        let host = Self::required_string(&configuration, "host")?;
        let guid = Self::required_string(&configuration, "guid")?;
        Self::validate_host(&host)?;

        let fields = Fields::new(&configuration, "");
        let sort_by = fields.string("sortBy")?;
        if sort_by.as_deref().map(|s| s.trim().is_empty()) == Some(true) {
            return Err(Error::configuration("`sortBy` cannot be an empty string"));
        }
        let sort_order = fields.parsed::<SortOrder>("sortOrder", || {
            format!("`sortOrder` must be either {}", SortOrder::either_list())
        })?;

        let player_parameters = match fields.object("playerParameters")? {
            Some(object) => Self::validate_player_parameters(object, logger)?,
            None => PlayerParameters::default(),
        };
        let widget_options = Self::validate_widget_options(
            fields.object("widgetOptions")?,
            raw.handlers(),
            logger,
        )?;
        let locales = match fields.get("locales") {
            None | Some(Value::Null) => Locales::default(),
            Some(value) => Self::validate_locales(value)?,
        };

        Ok(WidgetConfiguration {
            guid: PresentationGuid(guid),
            host,
            selector,
            player_parameters,
            widget_options,
            sort_by,
            sort_order,
            locales,
        })
    }

    /// Fill in defaults under the caller's values and normalize `host`.
    pub fn set_defaults(&self, configuration: WidgetConfiguration) -> WidgetConfiguration {
        let WidgetConfiguration {
            guid,
            host,
            selector,
            player_parameters,
            widget_options,
            sort_by,
            sort_order,
            locales,
        } = configuration;
        let play_icon = widget_options.play_icon.unwrap_or_default();
        WidgetConfiguration {
            guid,
            host: Self::normalize_host(&host),
            selector,
            player_parameters,
            widget_options: WidgetOptions {
                playback_mode: widget_options
                    .playback_mode
                    .or(Some(PlaybackMode::Inline)),
                play_icon: Some(PlayIcon {
                    height: play_icon
                        .height
                        .or(Some(WidgetConfiguration::DEFAULT_PLAY_ICON_SIZE)),
                    position: play_icon.position.or(Some(Position::Center)),
                    url: play_icon.url,
                    width: play_icon
                        .width
                        .or(Some(WidgetConfiguration::DEFAULT_PLAY_ICON_SIZE)),
                }),
                ..widget_options
            },
            sort_by: sort_by.or_else(|| Some(WidgetConfiguration::DEFAULT_SORT_BY.to_string())),
            sort_order: sort_order.or(Some(SortOrder::Descending)),
            locales,
        }
    }

    /// Trim surrounding whitespace, then strip a leading `https://` and anything from the
    /// first `/` on.
    pub fn normalize_host(host: &str) -> String {
        let host = host.trim().replacen(HTTPS_PREFIX, "", 1);
        match host.find('/') {
            Some(index) => host[..index].to_string(),
            None => host,
        }
    }

    fn supplied_selector(
        configuration: &mut Map<String, Value>,
        element: ElementId,
        logger: &StringLogger,
    ) -> Selector {
        if configuration.remove("selector").is_some() {
            logger.warn("`selector` is ignored when an element is supplied".to_string());
        }
        Selector::Element(element)
    }

    fn required_string(configuration: &Map<String, Value>, field: &str) -> Result<String, Error> {
        match configuration.get(field) {
            None => Err(Error::configuration(format!(
                "`{field}` is not defined in the configuration"
            ))),
            Some(Value::Null) => Err(Error::configuration(format!(
                "`{field}` is undefined or null"
            ))),
            Some(Value::String(s)) if s.trim().is_empty() => Err(Error::configuration(format!(
                "`{field}` cannot be an empty string"
            ))),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) if field == "selector" => Err(Error::configuration(
                "`selector` must be a string or an element handle",
            )),
            Some(_) => Err(Error::configuration(format!("`{field}` must be a string"))),
        }
    }

    fn validate_host(host: &str) -> Result<(), Error> {
        let invalid = || Error::configuration("`host` must be a valid domain name");
        let host = host.trim().replacen(HTTPS_PREFIX, "", 1);
        if host.contains("://") {
            return Err(invalid());
        }
        Url::parse(&format!("{HTTPS_PREFIX}{host}"))
            .map(|_| ())
            .map_err(|_| invalid())
    }

    fn validate_player_parameters(
        object: &Map<String, Value>,
        logger: &StringLogger,
    ) -> Result<PlayerParameters, Error> {
        const PATH: &str = "playerParameters";
        let parameters = retain_supported(object, PLAYER_PARAMETER_FIELDS, PATH, logger);
        let fields = Fields::new(&parameters, PATH);
        Ok(PlayerParameters {
            pv: fields.parsed::<PlayerLayout>("pv", || {
                format!("`{PATH}.pv` must be either {}", PlayerLayout::either_list())
            })?,
            quality: fields.parsed::<Quality>("quality", || {
                format!("`{PATH}.quality` must be either {}", Quality::either_list())
            })?,
            captions: fields.string("captions")?,
            debug: fields.boolean("debug")?,
            r#loop: fields.boolean("loop")?,
            player_configuration_guid: fields.string("playerConfigurationGuid")?,
            reporting: fields.boolean("reporting")?,
            reporting_id: fields.string("reportingId")?,
            show_control_panel: fields.boolean("showControlPanel")?,
            sidebar: fields.boolean("sidebar")?,
            speech: fields.string("speech")?,
            speech_term: fields.string("speechTerm")?,
            start: fields.number("start")?,
            volume: fields.number("volume")?,
        })
    }

    fn validate_widget_options(
        object: Option<&Map<String, Value>>,
        handlers: &WidgetHandlers,
        logger: &StringLogger,
    ) -> Result<WidgetOptions, Error> {
        const PATH: &str = "widgetOptions";
        let options = object
            .map(|o| retain_supported(o, WIDGET_OPTION_FIELDS, PATH, logger))
            .unwrap_or_default();
        let fields = Fields::new(&options, PATH);

        let playback_mode = fields.parsed::<PlaybackMode>("playbackMode", || {
            format!(
                "`{PATH}.playbackMode` must be either {}",
                PlaybackMode::either_list()
            )
        })?;

        let play_icon = match fields.object("playIcon")? {
            Some(object) => Some(Self::validate_play_icon(object, logger)?),
            None => None,
        };

        let style = match fields.object("style")? {
            Some(object) => Some(Self::validate_style(object, logger)?),
            None => None,
        };

        // Callables can't be expressed in JSON; they are registered as handlers.
        for callback in ["onIframeLoad", "onThumbnailClick"] {
            if fields.contains(callback) {
                return Err(Error::configuration(format!(
                    "`{}` must be a function",
                    qualified(PATH, callback)
                )));
            }
        }

        if play_icon.is_some()
            && !matches!(
                playback_mode,
                Some(PlaybackMode::Inline) | Some(PlaybackMode::Modal)
            )
        {
            logger.warn(format!(
                "`{PATH}.playIcon` is only applicable when `{PATH}.playbackMode` is either \"modal\" or \"inline\""
            ));
        }

        let mut handlers = handlers.clone();
        if handlers.on_thumbnail_click.is_some() && playback_mode != Some(PlaybackMode::Inline) {
            logger.warn(format!(
                "`{PATH}.onThumbnailClick` is only applicable when `{PATH}.playbackMode` is \"inline\""
            ));
            handlers.on_thumbnail_click = None;
        }

        Ok(WidgetOptions {
            playback_mode,
            play_icon,
            style,
            handlers,
        })
    }

    fn validate_play_icon(
        object: &Map<String, Value>,
        logger: &StringLogger,
    ) -> Result<PlayIcon, Error> {
        const PATH: &str = "widgetOptions.playIcon";
        let play_icon = retain_supported(object, PLAY_ICON_FIELDS, PATH, logger);
        let fields = Fields::new(&play_icon, PATH);
        Ok(PlayIcon {
            position: fields.parsed::<Position>("position", || {
                format!("`{PATH}.position` must be a valid position value")
            })?,
            height: fields.non_negative("height")?,
            url: fields.string("url")?,
            width: fields.non_negative("width")?,
        })
    }

    fn validate_style(
        object: &Map<String, Value>,
        logger: &StringLogger,
    ) -> Result<StringTree, Error> {
        const PATH: &str = "widgetOptions.style";
        let supported: Vec<&str> = STYLE_LEAF_FIELDS
            .iter()
            .copied()
            .chain(STYLE_GROUP_FIELDS.iter().map(|(group, _)| *group))
            .collect();
        let style = retain_supported(object, &supported, PATH, logger);
        let fields = Fields::new(&style, PATH);

        let mut tree = BTreeMap::new();
        for leaf in STYLE_LEAF_FIELDS {
            if let Some(value) = fields.string(leaf)? {
                tree.insert(leaf.to_string(), StringTree::Leaf(value));
            }
        }
        for (group, group_fields) in STYLE_GROUP_FIELDS {
            let Some(object) = fields.object(group)? else {
                continue;
            };
            let path = qualified(PATH, group);
            let values = retain_supported(object, group_fields, &path, logger);
            let group_values = Fields::new(&values, &path);
            let mut children = BTreeMap::new();
            for field in values.keys() {
                if let Some(value) = group_values.string(field)? {
                    children.insert(field.clone(), StringTree::Leaf(value));
                }
            }
            tree.insert(group.to_string(), StringTree::Branch(children));
        }
        Ok(StringTree::Branch(tree))
    }

    fn validate_locales(value: &Value) -> Result<Locales, Error> {
        let invalid =
            || Error::configuration("`locales` must be an object of strings or nested objects of strings");
        match StringTree::from_value(value) {
            Some(StringTree::Branch(locales)) => Ok(Locales(locales)),
            _ => Err(invalid()),
        }
    }
}
