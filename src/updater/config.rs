use crate::error::{Result, UpdaterError};
use crate::github::Endpoint;
use crate::updater::Validator;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Configuration of self-update.
///
/// Can be built in code or loaded from TOML:
///
/// ```toml
/// enterprise_base_url = "https://ghe.example.com/api/v3/"
/// filters = ["linux-amd64", "\\.tar\\.gz$"]
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Base URL of a GitHub Enterprise API, e.g. `https://ghe.example.com/api/v3/`.
    /// Unset means github.com.
    pub enterprise_base_url: Option<String>,
    /// Upload URL of the enterprise instance. Defaults to `enterprise_base_url`.
    pub enterprise_upload_url: Option<String>,
    /// Regular expressions selecting among several assets of one release.
    /// An asset is selected if it matches any of them.
    pub filters: Vec<String>,
    /// API token. Falls back to `$GITHUB_TOKEN`.
    pub api_token: Option<String>,
    #[serde(skip)]
    pub validator: Option<Arc<dyn Validator>>,
    /// Custom HTTP client for API requests.
    #[serde(skip)]
    pub http_client: Option<Client>,
}

impl UpdaterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| UpdaterError::ConfigFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn with_enterprise_base_url(mut self, url: impl Into<String>) -> Self {
        self.enterprise_base_url = Some(url.into());
        self
    }

    pub fn with_enterprise_upload_url(mut self, url: impl Into<String>) -> Self {
        self.enterprise_upload_url = Some(url.into());
        self
    }

    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filters.push(pattern.into());
        self
    }

    pub fn with_filters<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Values set in `other` replace the ones in `self`; filters are appended.
    pub fn merge(mut self, other: UpdaterConfig) -> Self {
        if other.enterprise_base_url.is_some() {
            self.enterprise_base_url = other.enterprise_base_url;
        }
        if other.enterprise_upload_url.is_some() {
            self.enterprise_upload_url = other.enterprise_upload_url;
        }
        if other.api_token.is_some() {
            self.api_token = other.api_token;
        }
        if other.validator.is_some() {
            self.validator = other.validator;
        }
        if other.http_client.is_some() {
            self.http_client = other.http_client;
        }
        self.filters.extend(other.filters);
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::resolve(
            self.enterprise_base_url.as_deref(),
            self.enterprise_upload_url.as_deref(),
        )
    }
}

impl fmt::Debug for UpdaterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdaterConfig")
            .field("enterprise_base_url", &self.enterprise_base_url)
            .field("enterprise_upload_url", &self.enterprise_upload_url)
            .field("filters", &self.filters)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("validator", &self.validator.is_some())
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_toml() {
        let config = UpdaterConfig::from_toml_str(
            r#"
enterprise_base_url = "https://ghe.example.com/api/v3/"
filters = ["linux", "amd64"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.enterprise_base_url.as_deref(),
            Some("https://ghe.example.com/api/v3/")
        );
        assert!(config.enterprise_upload_url.is_none());
        assert_eq!(config.filters, vec!["linux", "amd64"]);
        assert!(config.endpoint().is_enterprise());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = UpdaterConfig::from_toml_str("").unwrap();
        assert_eq!(config.endpoint(), Endpoint::Public);
        assert!(config.filters.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = UpdaterConfig::from_toml_str("enterprise_url = \"x\"").unwrap_err();
        assert!(matches!(err, UpdaterError::Toml(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("selfupdate.toml");
        fs::write(&path, "filters = [\"^tool-\"]\napi_token = \"abc\"\n").unwrap();

        let config = UpdaterConfig::from_path(&path).unwrap();
        assert_eq!(config.filters, vec!["^tool-"]);
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert!(!format!("{config:?}").contains("abc"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = UpdaterConfig::from_path(dir.path().join("missing.toml")).unwrap_err();
        match &err {
            UpdaterError::ConfigFile { path, source } => {
                assert!(path.ends_with("missing.toml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<std::io::Error>().is_some());
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn merge_prefers_overrides_and_appends_filters() {
        let file = UpdaterConfig::new()
            .with_enterprise_base_url("https://ghe.example.com/api/v3/")
            .with_filter("linux");
        let flags = UpdaterConfig::new()
            .with_enterprise_upload_url("https://ghe.example.com/api/uploads/")
            .with_filters(["amd64"]);

        let merged = file.merge(flags);
        assert_eq!(
            merged.endpoint(),
            Endpoint::Enterprise {
                base: "https://ghe.example.com/api/v3/".to_string(),
                upload: "https://ghe.example.com/api/uploads/".to_string(),
            }
        );
        assert_eq!(merged.filters, vec!["linux", "amd64"]);
    }
}
