// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod configuration_tests {
    use crate::common::{ElementId, Error};
    use crate::configuration::{
        ConfigurationService, PlaybackMode, PlayerLayout, PlayerParameters, Position, Quality,
        RawConfiguration, Selector, SortOrder, WidgetConfiguration,
    };
    use crate::log::StringLogger;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn minimal() -> Value {
        json!({
            "selector": "#widget",
            "host": "demo.example.com",
            "guid": "test-guid-123",
        })
    }

    fn with(mut base: Value, field: &str, value: Value) -> Value {
        if let Some(object) = base.as_object_mut() {
            object.insert(field.to_string(), value);
        }
        base
    }

    fn validate(value: Value) -> (Result<WidgetConfiguration, Error>, StringLogger) {
        let logger = StringLogger::default();
        let result =
            ConfigurationService.validate_and_sanitize(&RawConfiguration::new(value), &logger);
        (result, logger)
    }

    fn message(value: Value) -> String {
        match validate(value).0 {
            Ok(configuration) => panic!("expected an error, got {configuration:?}"),
            Err(e) => {
                assert!(e.is_configuration(), "{e}");
                e.to_string()
            }
        }
    }

    #[test]
    fn valid_configuration_tests() {
        let (result, logger) = validate(minimal());
        let configuration = result.expect("valid");
        assert_eq!(configuration.guid, "test-guid-123");
        assert_eq!(configuration.host, "demo.example.com");
        assert_eq!(configuration.selector, Selector::Css("#widget".to_string()));
        assert_eq!(configuration.player_parameters, PlayerParameters::default());
        assert_eq!(configuration.sort_by, None);
        assert_eq!(configuration.sort_order, None);
        assert!(!logger.contains_warnings());
    }

    #[test]
    fn not_an_object_tests() {
        for value in [json!(null), json!("config"), json!(42), json!([1, 2])] {
            assert_eq!(message(value), "Configuration must be a valid object");
        }
    }

    #[test]
    fn required_field_tests() {
        assert_eq!(
            message(json!({})),
            "`selector` is not defined in the configuration"
        );
        assert_eq!(
            message(json!({"selector": "#a"})),
            "`host` is not defined in the configuration"
        );
        assert_eq!(
            message(json!({"selector": "#a", "host": "demo.example.com"})),
            "`guid` is not defined in the configuration"
        );
        assert_eq!(
            message(json!({"host": "demo.example.com", "guid": "g"})),
            "`selector` is not defined in the configuration"
        );

        assert_eq!(
            message(with(minimal(), "selector", json!(null))),
            "`selector` is undefined or null"
        );
        assert_eq!(
            message(with(minimal(), "host", json!(null))),
            "`host` is undefined or null"
        );
        assert_eq!(
            message(with(minimal(), "guid", json!(null))),
            "`guid` is undefined or null"
        );

        assert_eq!(
            message(with(minimal(), "selector", json!(5))),
            "`selector` must be a string or an element handle"
        );
        assert_eq!(
            message(with(minimal(), "host", json!(["demo.example.com"]))),
            "`host` must be a string"
        );
        assert_eq!(
            message(with(minimal(), "guid", json!(true))),
            "`guid` must be a string"
        );

        assert_eq!(
            message(with(minimal(), "selector", json!("  "))),
            "`selector` cannot be an empty string"
        );
        assert_eq!(
            message(with(minimal(), "host", json!(""))),
            "`host` cannot be an empty string"
        );
        assert_eq!(
            message(with(minimal(), "guid", json!("\t"))),
            "`guid` cannot be an empty string"
        );
    }

    #[test]
    fn host_tests() {
        assert_eq!(
            message(with(minimal(), "host", json!("bad host"))),
            "`host` must be a valid domain name"
        );
        assert_eq!(
            message(with(minimal(), "host", json!("https://[::1"))),
            "`host` must be a valid domain name"
        );
        for host in ["http://demo.example.com", "ftp://demo.example.com"] {
            assert_eq!(
                message(with(minimal(), "host", json!(host))),
                "`host` must be a valid domain name"
            );
        }
        for host in [
            "demo.example.com",
            "https://demo.example.com",
            "demo.example.com/some/path",
            "localhost:8080",
            "demo.example.com ",
            " https://demo.example.com",
        ] {
            assert!(validate(with(minimal(), "host", json!(host))).0.is_ok(), "{host}");
        }

        let logger = StringLogger::default();
        let value = with(minimal(), "host", json!("https://demo.example.com "));
        let configuration = ConfigurationService
            .create_configuration(&RawConfiguration::new(value), &logger)
            .expect("valid");
        assert_eq!(configuration.host, "demo.example.com");
    }

    #[test]
    fn element_selector_tests() {
        let logger = StringLogger::default();
        let raw = RawConfiguration::new(json!({"host": "demo.example.com", "guid": "g"}))
            .element(ElementId(3));
        let configuration = ConfigurationService
            .validate_and_sanitize(&raw, &logger)
            .expect("valid");
        assert_eq!(configuration.selector, Selector::Element(ElementId(3)));
        assert!(!logger.contains_warnings());

        let raw = RawConfiguration::new(minimal()).element(ElementId(4));
        let configuration = ConfigurationService
            .validate_and_sanitize(&raw, &logger)
            .expect("valid");
        assert_eq!(configuration.selector, Selector::Element(ElementId(4)));
        assert_eq!(
            logger.warnings(),
            vec!["`selector` is ignored when an element is supplied".to_string()]
        );
    }

    #[test]
    fn unsupported_field_tests() {
        let value = json!({
            "selector": "#widget",
            "host": "demo.example.com",
            "guid": "g",
            "extra": 1,
            "playerParameters": {"autoplay": true, "volume": 50},
            "widgetOptions": {
                "playbackMode": "modal",
                "theme": "dark",
                "playIcon": {"color": "red", "width": 30},
            },
        });
        let before = value.clone();
        let raw = RawConfiguration::new(value);
        let logger = StringLogger::default();
        let configuration = ConfigurationService
            .validate_and_sanitize(&raw, &logger)
            .expect("valid");

        assert_eq!(raw.value(), &before);
        assert_eq!(
            logger.warnings(),
            vec![
                "Unsupported field `extra` in configuration".to_string(),
                "Unsupported field `playerParameters.autoplay` in configuration".to_string(),
                "Unsupported field `widgetOptions.theme` in configuration".to_string(),
                "Unsupported field `widgetOptions.playIcon.color` in configuration".to_string(),
            ]
        );
        assert_eq!(configuration.player_parameters.volume, Some(50.0));
        let serialized = serde_json::to_value(&configuration).expect("serialize");
        assert_eq!(
            serialized,
            json!({
                "guid": "g",
                "host": "demo.example.com",
                "selector": "#widget",
                "playerParameters": {"volume": 50.0},
                "widgetOptions": {
                    "playbackMode": "modal",
                    "playIcon": {"width": 30.0},
                },
            })
        );
    }

    #[test]
    fn player_parameter_tests() {
        assert_eq!(
            message(with(minimal(), "playerParameters", json!({"pv": "pip"}))),
            "`playerParameters.pv` must be either \"pipls\", \"pipss\" or \"sbs\""
        );
        assert_eq!(
            message(with(minimal(), "playerParameters", json!({"quality": "360p"}))),
            "`playerParameters.quality` must be either \"240p\", \"480p\", \"720p\", \"1080p\", \"1440p\", \"auto\" or \"best\""
        );
        assert_eq!(
            message(with(minimal(), "playerParameters", json!({"quality": null}))),
            "`playerParameters.quality` must be either \"240p\", \"480p\", \"720p\", \"1080p\", \"1440p\", \"auto\" or \"best\""
        );
        assert_eq!(
            message(with(minimal(), "playerParameters", json!({"start": "ten"}))),
            "`playerParameters.start` must be a number"
        );
        assert_eq!(
            message(with(minimal(), "playerParameters", json!({"loop": "yes"}))),
            "`playerParameters.loop` must be a boolean"
        );
        assert_eq!(
            message(with(minimal(), "playerParameters", json!({"captions": 1}))),
            "`playerParameters.captions` must be a string"
        );
        assert_eq!(
            message(with(minimal(), "playerParameters", json!("sbs"))),
            "`playerParameters` must be an object"
        );

        for quality in Quality::ALL {
            let value = with(minimal(), "playerParameters", json!({"quality": quality.as_str()}));
            let configuration = validate(value).0.expect("valid quality");
            assert_eq!(configuration.player_parameters.quality, Some(*quality));
        }

        let value = with(
            minimal(),
            "playerParameters",
            json!({"pv": "sbs", "loop": true, "start": 12, "captions": "en"}),
        );
        let configuration = validate(value).0.expect("valid");
        assert_eq!(configuration.player_parameters.pv, Some(PlayerLayout::Sbs));
        assert_eq!(
            configuration.player_parameters.query_pairs(),
            vec![
                ("captions", "en".to_string()),
                ("loop", "true".to_string()),
                ("pv", "sbs".to_string()),
                ("start", "12".to_string()),
            ]
        );

        let configuration = validate(with(minimal(), "playerParameters", json!(null)))
            .0
            .expect("null parameters");
        assert_eq!(configuration.player_parameters, PlayerParameters::default());
    }

    #[test]
    fn widget_option_tests() {
        assert_eq!(
            message(with(minimal(), "widgetOptions", json!({"playbackMode": "popup"}))),
            "`widgetOptions.playbackMode` must be either \"inline\", \"inline-autoload\", \"inline-autoplay\" or \"modal\""
        );
        assert_eq!(
            message(with(
                minimal(),
                "widgetOptions",
                json!({"playbackMode": "modal", "playIcon": {"position": "upper-left"}})
            )),
            "`widgetOptions.playIcon.position` must be a valid position value"
        );
        assert_eq!(
            message(with(
                minimal(),
                "widgetOptions",
                json!({"playbackMode": "modal", "playIcon": {"width": -1}})
            )),
            "`widgetOptions.playIcon.width` must be a non-negative number"
        );
        assert_eq!(
            message(with(minimal(), "widgetOptions", json!({"onIframeLoad": "alert(1)"}))),
            "`widgetOptions.onIframeLoad` must be a function"
        );
        assert_eq!(
            message(with(minimal(), "widgetOptions", json!({"onThumbnailClick": null}))),
            "`widgetOptions.onThumbnailClick` must be a function"
        );
        assert_eq!(
            message(with(minimal(), "widgetOptions", json!(true))),
            "`widgetOptions` must be an object"
        );

        for mode in PlaybackMode::ALL {
            let value = with(minimal(), "widgetOptions", json!({"playbackMode": mode.as_str()}));
            let configuration = validate(value).0.expect("valid mode");
            assert_eq!(configuration.playback_mode(), *mode);
        }
        for position in Position::ALL {
            let value = with(
                minimal(),
                "widgetOptions",
                json!({"playbackMode": "inline", "playIcon": {"position": position.as_str()}}),
            );
            let (result, logger) = validate(value);
            let configuration = result.expect("valid position");
            assert_eq!(
                configuration
                    .widget_options
                    .play_icon
                    .and_then(|p| p.position),
                Some(*position)
            );
            assert!(!logger.contains_warnings());
        }
    }

    #[test]
    fn advisory_tests() {
        const PLAY_ICON: &str = "`widgetOptions.playIcon` is only applicable when `widgetOptions.playbackMode` is either \"modal\" or \"inline\"";
        const THUMBNAIL_CLICK: &str = "`widgetOptions.onThumbnailClick` is only applicable when `widgetOptions.playbackMode` is \"inline\"";

        for (options, warned) in [
            (json!({"playIcon": {"width": 30}}), true),
            (json!({"playbackMode": "inline-autoplay", "playIcon": {}}), true),
            (json!({"playbackMode": "modal", "playIcon": {}}), false),
            (json!({"playbackMode": "inline", "playIcon": {}}), false),
            (json!({"playbackMode": "inline-autoload"}), false),
        ] {
            let (result, logger) = validate(with(minimal(), "widgetOptions", options.clone()));
            assert!(result.is_ok());
            assert_eq!(
                logger.warnings(),
                if warned {
                    vec![PLAY_ICON.to_string()]
                } else {
                    Vec::new()
                },
                "{options}"
            );
        }

        let clicks = Arc::new(AtomicUsize::new(0));
        for (mode, kept) in [
            (Some("inline"), true),
            (Some("modal"), false),
            (Some("inline-autoload"), false),
            (None, false),
        ] {
            let options = match mode {
                Some(mode) => json!({"playbackMode": mode}),
                None => json!({}),
            };
            let counter = Arc::clone(&clicks);
            let raw = RawConfiguration::new(with(minimal(), "widgetOptions", options))
                .on_thumbnail_click(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            let logger = StringLogger::default();
            let configuration = ConfigurationService
                .validate_and_sanitize(&raw, &logger)
                .expect("valid");
            assert_eq!(
                configuration.widget_options.handlers.on_thumbnail_click.is_some(),
                kept,
                "{mode:?}"
            );
            assert_eq!(
                logger.warnings(),
                if kept {
                    Vec::new()
                } else {
                    vec![THUMBNAIL_CLICK.to_string()]
                }
            );
            assert!(raw.handlers().on_thumbnail_click.is_some());
        }
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sort_tests() {
        assert_eq!(
            message(with(minimal(), "sortOrder", json!("asc"))),
            "`sortOrder` must be either \"ASCENDING\" or \"DESCENDING\""
        );
        assert_eq!(
            message(with(minimal(), "sortBy", json!(3))),
            "`sortBy` must be a string"
        );
        assert_eq!(
            message(with(minimal(), "sortBy", json!(" "))),
            "`sortBy` cannot be an empty string"
        );
        let value = with(with(minimal(), "sortBy", json!("title")), "sortOrder", json!("ASCENDING"));
        let configuration = validate(value).0.expect("valid");
        assert_eq!(configuration.sort_by.as_deref(), Some("title"));
        assert_eq!(configuration.sort_order, Some(SortOrder::Ascending));
    }

    #[test]
    fn style_tests() {
        let value = with(
            minimal(),
            "widgetOptions",
            json!({
                "playbackMode": "modal",
                "style": {
                    "borderRadius": "8px",
                    "font": "serif",
                    "playButton": {"hoverColor": "red", "glow": "yes"},
                    "dialog": null,
                },
            }),
        );
        let (result, logger) = validate(value);
        let configuration = result.expect("valid");
        let style = configuration.widget_options.style.expect("style");
        assert_eq!(style.get("borderRadius"), Some("8px"));
        assert_eq!(style.get("playButton.hoverColor"), Some("red"));
        assert_eq!(style.get("playButton.glow"), None);
        assert_eq!(style.get("dialog"), None);
        assert_eq!(
            logger.warnings(),
            vec![
                "Unsupported field `widgetOptions.style.font` in configuration".to_string(),
                "Unsupported field `widgetOptions.style.playButton.glow` in configuration"
                    .to_string(),
            ]
        );

        assert_eq!(
            message(with(
                minimal(),
                "widgetOptions",
                json!({"style": {"height": 300}})
            )),
            "`widgetOptions.style.height` must be a string"
        );
        assert_eq!(
            message(with(
                minimal(),
                "widgetOptions",
                json!({"style": {"dialog": "wide"}})
            )),
            "`widgetOptions.style.dialog` must be an object"
        );
        assert_eq!(
            message(with(
                minimal(),
                "widgetOptions",
                json!({"style": {"notFound": {"color": false}}})
            )),
            "`widgetOptions.style.notFound.color` must be a string"
        );
    }

    #[test]
    fn locales_tests() {
        let value = with(
            minimal(),
            "locales",
            json!({"fr": {"common": {"Play": "Lire"}}, "de": {"common": {"Play": "Abspielen"}}}),
        );
        let configuration = validate(value).0.expect("valid");
        let fr = configuration.locales.0.get("fr").expect("fr");
        assert_eq!(fr.get("common.Play"), Some("Lire"));

        const MESSAGE: &str = "`locales` must be an object of strings or nested objects of strings";
        for locales in [
            json!("fr"),
            json!(["fr"]),
            json!({"fr": {"common": 5}}),
            json!({"fr": [1]}),
        ] {
            assert_eq!(message(with(minimal(), "locales", locales)), MESSAGE);
        }
        assert!(validate(with(minimal(), "locales", json!(null))).0.is_ok());
    }

    #[test]
    fn defaults_tests() {
        let logger = StringLogger::default();
        let value = with(minimal(), "host", json!("https://demo.example.com/x"));
        let configuration = ConfigurationService
            .create_configuration(&RawConfiguration::new(value), &logger)
            .expect("valid");
        assert_eq!(configuration.host, "demo.example.com");
        assert_eq!(configuration.sort_by.as_deref(), Some("created"));
        assert_eq!(configuration.sort_order, Some(SortOrder::Descending));
        assert_eq!(
            serde_json::to_value(&configuration.widget_options).expect("serialize"),
            json!({
                "playbackMode": "inline",
                "playIcon": {"height": 44.0, "position": "center", "width": 44.0},
            })
        );

        let value = with(
            minimal(),
            "widgetOptions",
            json!({"playbackMode": "modal", "playIcon": {"height": 10, "position": "top-left"}}),
        );
        let configuration = ConfigurationService
            .create_configuration(&RawConfiguration::new(value), &logger)
            .expect("valid");
        assert_eq!(
            serde_json::to_value(&configuration.widget_options).expect("serialize"),
            json!({
                "playbackMode": "modal",
                "playIcon": {"height": 10.0, "position": "top-left", "width": 44.0},
            })
        );
        assert!(!logger.contains_warnings());
    }

    #[test]
    fn normalize_host_tests() {
        for (host, normalized) in [
            ("demo.example.com", "demo.example.com"),
            ("https://demo.example.com", "demo.example.com"),
            ("https://demo.example.com/x/y", "demo.example.com"),
            ("demo.example.com:8443/", "demo.example.com:8443"),
            ("http://demo.example.com", "http:"),
            ("demo.example.com ", "demo.example.com"),
            ("\thttps://demo.example.com/x \n", "demo.example.com"),
        ] {
            assert_eq!(ConfigurationService::normalize_host(host), normalized);
        }
    }

    #[test]
    fn enum_tests() {
        assert_eq!("top-left".parse::<Position>(), Ok(Position::TopLeft));
        assert!("upper-left".parse::<Position>().is_err());
        assert_eq!(Position::TopLeft.place_items(), ("start", "start"));
        assert_eq!(Position::Bottom.place_items(), ("end", "center"));
        assert_eq!(Position::Right.place_items(), ("center", "end"));
        assert_eq!(SortOrder::default(), SortOrder::Descending);
        assert_eq!(PlaybackMode::InlineAutoplay.to_string(), "inline-autoplay");
        assert_eq!(
            serde_json::to_value(Quality::P1080).expect("serialize"),
            json!("1080p")
        );
        assert_eq!(
            serde_json::from_value::<PlayerLayout>(json!("pipss")).expect("deserialize"),
            PlayerLayout::Pipss
        );
        assert!(serde_json::from_value::<PlayerLayout>(json!("pip")).is_err());
    }
}
