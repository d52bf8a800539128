//! Temperature backend configuration.

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Endpoint used when the configuration does not name one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/temperature";

/// Environment variable the API key is read from by default.
pub const DEFAULT_API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Where tool calls are forwarded and how they authenticate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// The temperature endpoint. Query parameters are appended to it.
    pub url: Url,
    /// API key sent as the `appid` query parameter. Takes precedence over `api_key_env`.
    pub api_key: Option<SecretString>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl BackendConfig {
    /// Resolves the API key from the configuration or the environment.
    ///
    /// Returns `None` when neither is set or the value is empty. The caller is expected
    /// to keep going with an empty key and let the backend reject the request.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        use secrecy::ExposeSecret;

        if let Some(key) = &self.api_key
            && !key.expose_secret().is_empty()
        {
            return Some(key.clone());
        }

        std::env::var(&self.api_key_env)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    }
}
