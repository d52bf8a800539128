use config::BackendConfig;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{error::ToolError, tool::temperature::TemperatureQuery};

/// HTTP client for the temperature service.
pub(crate) struct Backend {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
}

impl Backend {
    pub(crate) fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        if config.api_key.is_some() {
            log::debug!("Using the API key from the configuration file");
        } else {
            log::debug!("Reading the API key from the '{}' environment variable", config.api_key_env);
        }

        let api_key = match config.resolve_api_key() {
            Some(key) => key,
            None => {
                log::warn!(
                    "{} is not set, requests to the temperature service will carry an empty API key",
                    config.api_key_env
                );

                SecretString::from(String::new())
            }
        };

        Ok(Self {
            client: Client::builder().build()?,
            endpoint: config.url.clone(),
            api_key,
        })
    }

    pub(crate) fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// The full request URL, API key included.
    pub(crate) fn request_url(&self, query: &TemperatureQuery) -> Url {
        build_url(&self.endpoint, query, self.api_key.expose_secret())
    }

    /// The request URL as it appears in logs.
    pub(crate) fn redacted_url(&self, query: &TemperatureQuery) -> Url {
        let api_key = if self.has_api_key() { "***" } else { "" };
        build_url(&self.endpoint, query, api_key)
    }

    /// Fetches the raw temperature body for the query.
    ///
    /// Exactly one GET is sent. Cancelling the token drops the in-flight request.
    pub(crate) async fn fetch(&self, query: &TemperatureQuery, ct: &CancellationToken) -> Result<String, ToolError> {
        if !self.has_api_key() {
            log::warn!("Calling the temperature service without an API key");
        }

        log::info!("Requesting URL: {}", self.redacted_url(query));

        let request = self.client.get(self.request_url(query)).send();

        let response = tokio::select! {
            _ = ct.cancelled() => {
                log::info!("Temperature request for '{}' was cancelled", query.location);
                return Err(ToolError::Cancelled);
            }
            response = request => response.map_err(|err| {
                log::error!("Failed to query temperature service: {err}");
                ToolError::UpstreamUnreachable(err)
            })?,
        };

        let status = status_line(&response);
        log::info!("HTTP response status: {status}");

        if response.status() != StatusCode::OK {
            return Err(ToolError::UpstreamError { status });
        }

        let body = tokio::select! {
            _ = ct.cancelled() => {
                log::info!("Temperature request for '{}' was cancelled while reading the body", query.location);
                return Err(ToolError::Cancelled);
            }
            body = response.bytes() => body.map_err(|err| {
                log::error!("Failed to read temperature service response: {err}");
                ToolError::UpstreamReadError(err)
            })?,
        };

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// The status line as the backend sent it, e.g. `500 Database Down`.
///
/// hyper only keeps the reason phrase when it differs from the canonical one.
fn status_line(response: &Response) -> String {
    let status = response.status();

    let reason = match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_string(),
    };

    if reason.is_empty() {
        status.as_str().to_string()
    } else {
        format!("{} {reason}", status.as_str())
    }
}

fn build_url(endpoint: &Url, query: &TemperatureQuery, api_key: &str) -> Url {
    let mut url = endpoint.clone();

    url.query_pairs_mut()
        .append_pair("location", &query.location)
        .append_pair("units", query.unit.as_str())
        .append_pair("appid", api_key);

    url
}
