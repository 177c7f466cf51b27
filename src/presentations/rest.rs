// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Presentation, PresentationQuery, PresentationSource};
use crate::common::{EmbedConfig, Error};
use crate::log::StringLogger;
use async_trait::async_trait;
use hyper::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const WIDGETS_PATH: [&str; 4] = ["api", "2.2", "rest", "widgets"];

/// Presentation metadata from the widgets REST endpoint of a host.
pub struct RestPresentations {
    client: Client,
    debug: bool,
    scheme: String,
}

impl RestPresentations {
    const DEFAULT_SCHEME: &'static str = "https";
    const TIMEOUT_SECS: u64 = 5;

    /// Create a `PresentationSource` from the optional `[presentations]` table:
    ///
    /// ```toml
    /// [presentations]
    /// timeout_secs = 5
    /// scheme = "https"
    /// ```
    pub fn new(embed_config: &EmbedConfig) -> Result<Self, Error> {
        #[derive(Default, Deserialize)]
        struct PresentationsConfig {
            scheme: Option<String>,
            timeout_secs: Option<u64>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            presentations: PresentationsConfig,
        }
        let ConfigToml {
            presentations:
                PresentationsConfig {
                    scheme,
                    timeout_secs,
                },
        } = embed_config.get()?;

        let scheme = scheme.unwrap_or_else(|| Self::DEFAULT_SCHEME.to_string());
        if scheme != "https" && scheme != "http" {
            return Err(Error::String(format!(
                "{scheme}: presentations scheme must be \"https\" or \"http\""
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(
                timeout_secs.unwrap_or(Self::TIMEOUT_SECS),
            ))
            .build()
            .map_err(|e| Error::String(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            debug: embed_config.debug(),
            scheme,
        })
    }

    /// Create a `PresentationSource` with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(&EmbedConfig::default())
    }

    /// The endpoint URL for `query`, e.g.
    /// `https://{host}/api/2.2/rest/widgets/{guid}.json?offset=0&limit=1&sortBy=created%2CDESCENDING&useUserAuth=false`.
    pub fn presentation_url(&self, query: &PresentationQuery) -> Result<Url, Error> {
        let invalid = || {
            Error::Http(
                StatusCode::BAD_REQUEST,
                format!("Invalid URL for host \"{}\"", query.host),
            )
        };
        if query.host.is_empty() || query.guid.is_empty() {
            return Err(invalid());
        }
        let mut url = Url::parse(&format!("{}://{}/", self.scheme, query.host))
            .map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(WIDGETS_PATH)
            .push(&format!("{}.json", query.guid));
        url.query_pairs_mut()
            .append_pair("offset", "0")
            .append_pair("limit", "1")
            .append_pair("sortBy", &format!("{},{}", query.sort_by, query.sort_order))
            .append_pair("useUserAuth", "false");
        Ok(url)
    }

    /// Interpret a response body. A non-success status or an empty result list
    /// means the presentation was not found.
    pub(crate) fn parse_result(
        status: StatusCode,
        text: &str,
        query: &PresentationQuery,
    ) -> Result<Presentation, Error> {
        let not_found = || {
            format!(
                "Failed to fetch presentation with guid \"{}\" from host \"{}\"",
                query.guid, query.host
            )
        };
        let parsed = serde_json::from_str::<PresentationResponse>(text);
        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(not_found);
            return Err(Error::Http(status, message));
        }
        let response = parsed.map_err(|e| {
            Error::Http(
                StatusCode::FAILED_DEPENDENCY,
                format!(
                    "cannot parse presentation response from host \"{}\": {e}",
                    query.host
                ),
            )
        })?;
        let PresentationResponse { kulus, error, .. } = response;
        kulus.into_iter().next().ok_or_else(|| {
            Error::Http(
                StatusCode::NOT_FOUND,
                error.and_then(|e| e.message).unwrap_or_else(not_found),
            )
        })
    }
}

#[async_trait]
impl PresentationSource for RestPresentations {
    async fn get_presentation(&self, query: &PresentationQuery) -> Result<Presentation, Error> {
        let logger = StringLogger::new(self.debug);
        let url = self.presentation_url(query)?;
        logger.trace(format!("GET {url}"));

        let map_error = |e: reqwest::Error| {
            Error::Http(
                StatusCode::SERVICE_UNAVAILABLE,
                format!(
                    "Failed to fetch presentation from host \"{}\": {e}",
                    query.host
                ),
            )
        };
        let response = self.client.get(url).send().await.map_err(map_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_error)?;
        logger.trace(format!("{status}: {} bytes", text.len()));

        Self::parse_result(status, &text, query)
    }

    fn provider_name(&self) -> &'static str {
        "rest"
    }
}

#[derive(Debug, Deserialize)]
struct PresentationResponse {
    #[serde(default)]
    kulus: Vec<Presentation>,
    #[serde(default)]
    #[allow(unused)]
    total: Option<u64>,
    #[serde(default)]
    error: Option<PresentationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresentationError {
    #[serde(default)]
    #[allow(unused)]
    code: Option<String>,
    #[serde(default)]
    #[allow(unused)]
    http_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}
