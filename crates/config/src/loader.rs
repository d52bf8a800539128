use std::path::Path;

use anyhow::{Context, bail};
use indoc::formatdoc;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config at {}", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse config at {}", path.display()))?;

    validate_backend(&config)?;

    Ok(config)
}

pub(crate) fn validate_backend(config: &Config) -> anyhow::Result<()> {
    let url = &config.backend.url;

    if !matches!(url.scheme(), "http" | "https") {
        bail!(formatdoc! {r#"
            The backend url must use http or https, got '{url}'.

            Example configuration:

              [backend]
              url = "http://localhost:8080/temperature"
        "#});
    }

    if url.query().is_some() {
        bail!("The backend url must not carry a query string, got '{url}'. Query parameters are added per call.");
    }

    if config.backend.api_key_env.is_empty() {
        bail!("backend.api_key_env must name an environment variable");
    }

    Ok(())
}
