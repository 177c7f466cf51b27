// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use yew::{function_component, html, Html, Properties};

const CLOSE_ICON: &str = "M19 6.41 17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z";
const IMAGE_BROKEN_ICON: &str = "M21 5v6.59l-3-3.01-4 4.01-4-4-4 4-3-3.01V5c0-1.1.9-2 2-2h14c1.1 0 2 .9 2 2zm-3 6.42 3 3.01V19c0 1.1-.9 2-2 2H5c-1.1 0-2-.9-2-2v-6.58l3 2.99 4-4 4 4 4-3.99z";
const PLAY_ICON: &str = "M8 5v14l11-7z";

/// Play icon drawn over a thumbnail.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlayIconView {
    pub alt: String,
    pub height: f64,
    /// Custom image, otherwise the built-in icon.
    pub url: Option<String>,
    pub width: f64,
}

/// Clickable thumbnail.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ThumbnailView {
    pub alt: String,
    /// CSS `place-items` of the play icon.
    pub place_items: String,
    pub play_icon: PlayIconView,
    pub src: String,
}

/// Player iframe.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlayerView {
    pub src: String,
    pub title: String,
}

/// Open modal dialog.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DialogView {
    pub close_label: String,
    pub player: PlayerView,
}

/// What a mounted widget shows.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum WidgetView {
    NotFound {
        message: String,
    },
    /// Inline, before playback.
    Thumbnail(ThumbnailView),
    /// Inline, playing.
    Player(PlayerView),
    Modal {
        thumbnail: ThumbnailView,
        dialog: Option<DialogView>,
    },
}

#[derive(PartialEq, Properties)]
pub(crate) struct WidgetRootProps {
    /// CSS `aspect-ratio`, e.g. `16 / 9`.
    pub aspect_ratio: String,
    pub view: WidgetView,
}

#[function_component(WidgetRoot)]
pub(crate) fn widget_root(props: &WidgetRootProps) -> Html {
    let content = match &props.view {
        WidgetView::NotFound { message } => not_found(message),
        WidgetView::Thumbnail(thumbnail) => thumbnail_html(thumbnail),
        WidgetView::Player(player) => player_html(player),
        WidgetView::Modal { thumbnail, dialog } => html! {
            <div class="qc-dialog">
                {thumbnail_html(thumbnail)}
                {dialog.as_ref().map(dialog_html)}
            </div>
        },
    };
    html! {
        <div class="qc-widget" style={format!("aspect-ratio: {}", props.aspect_ratio)}>
            {content}
        </div>
    }
}

fn icon(class: &'static str, width: String, height: String, path: &'static str) -> Html {
    html! {
        <svg {class} {width} {height} viewBox="0 0 24 24" fill="currentColor" aria-hidden="true">
            <path d={path}/>
        </svg>
    }
}

fn not_found(message: &str) -> Html {
    html! {
        <div class="qc-not-found">
            {icon("qc-icon", "48".to_string(), "48".to_string(), IMAGE_BROKEN_ICON)}
            <div>{message.to_string()}</div>
        </div>
    }
}

fn thumbnail_html(thumbnail: &ThumbnailView) -> Html {
    let play_icon = &thumbnail.play_icon;
    let play_button = match &play_icon.url {
        Some(url) => html! {
            <img
                alt={play_icon.alt.clone()}
                class="qc-thumbnail__play-button"
                src={url.clone()}
                style={format!("width: {}px; height: {}px", play_icon.width, play_icon.height)}
            />
        },
        None => icon(
            "qc-icon qc-thumbnail__play-button qc-thumbnail__play-button--default",
            play_icon.width.to_string(),
            play_icon.height.to_string(),
            PLAY_ICON,
        ),
    };
    html! {
        <button type="button" class="qc-thumbnail" style={format!("place-items: {}", thumbnail.place_items)}>
            <img class="qc-thumbnail__image" src={thumbnail.src.clone()} alt={thumbnail.alt.clone()}/>
            {play_button}
        </button>
    }
}

fn player_html(player: &PlayerView) -> Html {
    html! {
        <iframe
            src={player.src.clone()}
            width="100%"
            height="100%"
            allow="autoplay; fullscreen"
            frameborder="0"
            title={player.title.clone()}
        />
    }
}

fn dialog_html(dialog: &DialogView) -> Html {
    html! {
        <dialog class="qc-dialog__dialog" open=true>
            {player_html(&dialog.player)}
            <button type="button" class="qc-dialog__close-button" aria-label={dialog.close_label.clone()}>
                {icon("qc-icon", "24".to_string(), "24".to_string(), CLOSE_ICON)}
            </button>
        </dialog>
    }
}
