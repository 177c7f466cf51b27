// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::components::{
    DialogView, PlayIconView, PlayerView, ThumbnailView, WidgetRoot, WidgetRootProps, WidgetView,
};
use super::document::HostDocument;
use super::i18n::{Translations, DEFAULT_LOCALE};
use super::style::style_properties;
use crate::common::{ElementId, Error, IframeHandle};
use crate::configuration::{
    ConfigurationService, PlaybackMode, Position, RawConfiguration, Selector, WidgetConfiguration,
};
use crate::log::StringLogger;
use crate::presentations::{Presentation, PresentationQuery, PresentationSource};
use std::sync::Arc;
use url::Url;
use yew::ServerRenderer;

const DEFAULT_ASPECT_RATIO: &str = "16 / 9";

/// Lifecycle state of a `PresentationWidget`. There is no way back from `Destroyed`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WidgetState {
    /// Configuration validated, nothing fetched or rendered.
    Constructed,
    /// Fetching presentation metadata.
    Loading,
    /// Rendered with a playable presentation.
    MountedWithData,
    /// Rendered the not-found placeholder.
    MountedNotFound,
    /// Container cleared, all further calls are no-ops.
    Destroyed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Playback {
    Thumbnail,
    Player,
    Dialog,
}

/// Services a widget depends on.
#[derive(Clone)]
pub struct WidgetContext {
    /// Document the widget is mounted into.
    pub document: Arc<dyn HostDocument>,
    /// Where presentation metadata comes from.
    pub source: Arc<dyn PresentationSource + Send + Sync>,
    /// Receives configuration warnings and lifecycle traces.
    pub logger: StringLogger,
}

impl WidgetContext {
    /// Context with a fresh, quiet logger.
    pub fn new(
        document: Arc<dyn HostDocument>,
        source: Arc<dyn PresentationSource + Send + Sync>,
    ) -> Self {
        Self {
            document,
            source,
            logger: StringLogger::default(),
        }
    }

    /// Replace the logger.
    pub fn logger(mut self, logger: StringLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Context fetching from the widgets REST endpoint, configured by `embed_config`.
    #[cfg(feature = "rest")]
    pub fn rest(
        document: Arc<dyn HostDocument>,
        embed_config: &crate::common::EmbedConfig,
    ) -> Result<Self, Error> {
        let source = crate::presentations::RestPresentations::new(embed_config)?;
        Ok(Self::new(document, Arc::new(source)).logger(StringLogger::new(embed_config.debug())))
    }
}

/// One embedded presentation, from validation to teardown.
///
/// ```ignore
/// let widget = PresentationWidget::create(&raw, context).await?;
/// widget.click_thumbnail().await?;
/// ```
pub struct PresentationWidget {
    configuration: WidgetConfiguration,
    container: Option<ElementId>,
    context: WidgetContext,
    playback: Playback,
    presentation: Option<Presentation>,
    state: WidgetState,
    styled: Vec<String>,
    translations: Translations,
}

impl PresentationWidget {
    /// Validate `raw` and apply defaults. Fails with `Error::Configuration`,
    /// warnings go to the context's logger.
    pub fn new(raw: &RawConfiguration, context: WidgetContext) -> Result<Self, Error> {
        let configuration = ConfigurationService.create_configuration(raw, &context.logger)?;
        Ok(Self {
            configuration,
            container: None,
            context,
            playback: Playback::Thumbnail,
            presentation: None,
            state: WidgetState::Constructed,
            styled: Vec::new(),
            translations: Translations::default(),
        })
    }

    /// `new`, `load` and `mount`. A failed fetch still mounts (the not-found
    /// view), only configuration and mount errors are returned.
    pub async fn create(raw: &RawConfiguration, context: WidgetContext) -> Result<Self, Error> {
        let mut widget = Self::new(raw, context)?;
        widget.load().await;
        widget.mount().await?;
        Ok(widget)
    }

    /// Fetch presentation metadata. Errors are logged and leave no presentation.
    pub async fn load(&mut self) {
        if self.state == WidgetState::Destroyed {
            return;
        }
        self.state = WidgetState::Loading;
        let query = PresentationQuery::from_configuration(&self.configuration);
        let source = Arc::clone(&self.context.source);
        let result = source.get_presentation(&query).await;
        self.presentation = self
            .context
            .logger
            .call(
                format!(
                    "fetch presentation \"{}\" from {} host \"{}\"",
                    query.guid,
                    source.provider_name(),
                    query.host
                ),
                result,
            )
            .ok();
    }

    /// Resolve the container and render into it, replacing its content.
    pub async fn mount(&mut self) -> Result<(), Error> {
        if self.state == WidgetState::Destroyed {
            return Ok(());
        }
        let container = self.resolve_container()?;
        self.clear_style();
        self.container = Some(container);

        let locale = self
            .context
            .document
            .language(container)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        self.translations = Translations::new(locale, &self.configuration.locales);
        self.apply_style(container)?;

        self.state = if self.player_url().is_some() {
            WidgetState::MountedWithData
        } else {
            if self.presentation.is_some() {
                self.context
                    .logger
                    .warn("presentation has no valid player URL".to_string());
            }
            WidgetState::MountedNotFound
        };
        self.playback = match self.configuration.playback_mode() {
            PlaybackMode::InlineAutoload | PlaybackMode::InlineAutoplay => Playback::Player,
            PlaybackMode::Inline | PlaybackMode::Modal => Playback::Thumbnail,
        };
        self.render().await
    }

    /// Clear the container and release the presentation. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.state == WidgetState::Destroyed {
            return;
        }
        self.clear_style();
        if let Some(container) = self.container.take() {
            if let Err(e) = self.context.document.replace_children(container, "") {
                self.context
                    .logger
                    .warn(format!("cannot clear {container}: {e}"));
            }
        }
        self.presentation = None;
        self.state = WidgetState::Destroyed;
        self.context.logger.trace("widget destroyed".to_string());
    }

    /// React to a click on the thumbnail: call the thumbnail click handler,
    /// or start inline playback, or open the dialog.
    pub async fn click_thumbnail(&mut self) -> Result<(), Error> {
        if self.state != WidgetState::MountedWithData || self.playback != Playback::Thumbnail {
            return Ok(());
        }
        if self.configuration.playback_mode() == PlaybackMode::Modal {
            self.playback = Playback::Dialog;
        } else {
            if let (Some(handler), Some(presentation)) = (
                &self.configuration.widget_options.handlers.on_thumbnail_click,
                &self.presentation,
            ) {
                handler(presentation);
                return Ok(());
            }
            self.playback = Playback::Player;
        }
        self.render().await
    }

    /// Close the modal dialog, if open.
    pub async fn close_dialog(&mut self) -> Result<(), Error> {
        if self.state != WidgetState::MountedWithData || self.playback != Playback::Dialog {
            return Ok(());
        }
        self.playback = Playback::Thumbnail;
        self.render().await
    }

    /// The player iframe, while one is rendered.
    pub fn iframe(&self) -> Option<IframeHandle> {
        if self.state != WidgetState::MountedWithData || self.playback == Playback::Thumbnail {
            return None;
        }
        Some(IframeHandle {
            container: self.container?,
            src: self.player_url()?,
        })
    }

    /// Called by the host when the player iframe finished loading.
    pub fn notify_iframe_loaded(&self) {
        let Some(iframe) = self.iframe() else {
            return;
        };
        self.context.logger.trace(format!("iframe loaded: {}", iframe.src));
        if let Some(handler) = &self.configuration.widget_options.handlers.on_iframe_load {
            handler(&iframe);
        }
    }

    /// The validated, defaulted configuration.
    pub fn configuration(&self) -> &WidgetConfiguration {
        &self.configuration
    }

    /// Element the widget is rendered into.
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    /// Logger shared with the context.
    pub fn logger(&self) -> &StringLogger {
        &self.context.logger
    }

    /// Fetched presentation, if any.
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    fn resolve_container(&self) -> Result<ElementId, Error> {
        let document = &self.context.document;
        match &self.configuration.selector {
            Selector::Css(selector) => document.query_selector(selector).ok_or_else(|| {
                Error::Mount(format!("Element for selector \"{selector}\" not found"))
            }),
            Selector::Element(element) if document.is_connected(*element) => Ok(*element),
            Selector::Element(element) => Err(Error::Mount(format!(
                "Element for selector \"{element}\" not found"
            ))),
        }
    }

    fn apply_style(&mut self, container: ElementId) -> Result<(), Error> {
        let Some(style) = &self.configuration.widget_options.style else {
            return Ok(());
        };
        for (name, value) in style_properties(style) {
            self.context
                .document
                .set_style_property(container, &name, &value)?;
            self.styled.push(name);
        }
        Ok(())
    }

    fn clear_style(&mut self) {
        let styled = std::mem::take(&mut self.styled);
        let Some(container) = self.container else {
            return;
        };
        for name in styled {
            if let Err(e) = self
                .context
                .document
                .remove_style_property(container, &name)
            {
                self.context
                    .logger
                    .warn(format!("cannot remove {name} from {container}: {e}"));
            }
        }
    }

    async fn render(&self) -> Result<(), Error> {
        let Some(container) = self.container else {
            return Ok(());
        };
        let props = WidgetRootProps {
            aspect_ratio: self.aspect_ratio(),
            view: self.view(),
        };
        let html = ServerRenderer::<WidgetRoot>::with_props(move || props)
            .hydratable(false)
            .render()
            .await;
        self.context.document.replace_children(container, &html)
    }

    fn aspect_ratio(&self) -> String {
        match self
            .presentation
            .as_ref()
            .and_then(Presentation::display_dimensions)
        {
            Some((width, height)) => format!("{width} / {height}"),
            None => DEFAULT_ASPECT_RATIO.to_string(),
        }
    }

    fn view(&self) -> WidgetView {
        let not_found = || WidgetView::NotFound {
            message: self.translations.t("common.Presentation not found"),
        };
        let (WidgetState::MountedWithData, Some(presentation), Some(src)) =
            (self.state, &self.presentation, self.player_url())
        else {
            return not_found();
        };
        let player = PlayerView {
            src,
            title: presentation.title.clone().unwrap_or_default(),
        };
        match (self.configuration.playback_mode(), self.playback) {
            (PlaybackMode::Modal, playback) => WidgetView::Modal {
                thumbnail: self.thumbnail_view(presentation),
                dialog: (playback == Playback::Dialog).then(|| DialogView {
                    close_label: self.translations.t("common.Close"),
                    player,
                }),
            },
            (_, Playback::Thumbnail) => WidgetView::Thumbnail(self.thumbnail_view(presentation)),
            _ => WidgetView::Player(player),
        }
    }

    fn thumbnail_view(&self, presentation: &Presentation) -> ThumbnailView {
        let play_icon = self
            .configuration
            .widget_options
            .play_icon
            .clone()
            .unwrap_or_default();
        let (y, x) = play_icon.position.unwrap_or(Position::Center).place_items();
        let alt = format!(
            "{} {}",
            self.translations.t("common.Thumbnail for"),
            presentation.title.as_deref().unwrap_or_default()
        );
        ThumbnailView {
            alt: alt.trim_end().to_string(),
            place_items: format!("{y} {x}"),
            play_icon: PlayIconView {
                alt: self.translations.t("common.Play"),
                height: play_icon
                    .height
                    .unwrap_or(WidgetConfiguration::DEFAULT_PLAY_ICON_SIZE),
                url: play_icon.url,
                width: play_icon
                    .width
                    .unwrap_or(WidgetConfiguration::DEFAULT_PLAY_ICON_SIZE),
            },
            src: presentation.thumbnail_url().unwrap_or_default().to_string(),
        }
    }

    /// The presentation's player URL with `autoplay` and the player parameters set.
    fn player_url(&self) -> Option<String> {
        let player = self.presentation.as_ref()?.player.as_deref()?;
        let mut url = Url::parse(player).ok()?;
        let autoplay = self.configuration.playback_mode() != PlaybackMode::InlineAutoload;
        let pairs: Vec<(&str, String)> = std::iter::once(("autoplay", autoplay.to_string()))
            .chain(self.configuration.player_parameters.query_pairs())
            .collect();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| !pairs.iter().any(|(n, _)| &**name == *n))
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .extend_pairs(pairs);
        Some(url.into())
    }
}
