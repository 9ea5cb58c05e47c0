use crate::error::ClientError;
use url::Url;

pub const PUBLIC_API_URL: &str = "https://api.github.com/";
pub const PUBLIC_UPLOAD_URL: &str = "https://uploads.github.com/";

/// Which GitHub installation the API client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// github.com
    Public,
    /// A GitHub Enterprise instance. `upload` is often the same as `base`.
    Enterprise { base: String, upload: String },
}

impl Endpoint {
    /// Picks the endpoint from the enterprise URLs of a configuration.
    ///
    /// Without a base URL the public API is used and the upload URL is
    /// ignored. With a base URL but no upload URL, the base URL serves both.
    /// Empty strings count as unset.
    pub fn resolve(base_url: Option<&str>, upload_url: Option<&str>) -> Self {
        let Some(base) = base_url.filter(|u| !u.is_empty()) else {
            return Endpoint::Public;
        };
        let upload = upload_url.filter(|u| !u.is_empty()).unwrap_or(base);

        Endpoint::Enterprise {
            base: base.to_string(),
            upload: upload.to_string(),
        }
    }

    pub fn is_enterprise(&self) -> bool {
        matches!(self, Endpoint::Enterprise { .. })
    }
}

/// Parses an API endpoint URL, requiring http(s) and a trailing slash on the
/// path so relative API paths resolve underneath it.
pub(crate) fn normalize_endpoint_url(raw: &str) -> Result<String, ClientError> {
    let mut parsed = Url::parse(raw).map_err(|source| ClientError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "https" | "http" => {}
        scheme => {
            return Err(ClientError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: scheme.to_string(),
            });
        }
    }

    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }

    Ok(parsed.to_string())
}
