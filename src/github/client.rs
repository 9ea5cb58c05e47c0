use crate::error::ClientError;
use crate::github::endpoint::{Endpoint, PUBLIC_API_URL, PUBLIC_UPLOAD_URL, normalize_endpoint_url};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Environment variable holding the API token used when none is configured.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("gh-selfupdate/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Set explicitly through the updater configuration.
    Config,
    /// Read from `$GITHUB_TOKEN`.
    Environment,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    source: TokenSource,
}

impl Credential {
    /// An explicit token wins; otherwise `$GITHUB_TOKEN` is used if set and non-empty.
    pub fn resolve(explicit: Option<&str>) -> Option<Self> {
        if let Some(token) = explicit.filter(|t| !t.is_empty()) {
            return Some(Self {
                token: token.to_string(),
                source: TokenSource::Config,
            });
        }

        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .map(|token| Self {
                token,
                source: TokenSource::Environment,
            })
    }

    pub fn source(&self) -> TokenSource {
        self.source
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// GitHub REST API client bound to one endpoint.
///
/// Building the client performs no I/O. Requests are created through
/// [`request`](Self::request) and [`upload_request`](Self::upload_request),
/// which resolve a relative API path and attach the media type, user agent
/// and credentials.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    endpoint: Endpoint,
    api_url: String,
    upload_url: String,
    credential: Option<Credential>,
}

impl GitHubClient {
    /// Client for the public github.com API.
    pub fn new(http: Client) -> Self {
        Self {
            http,
            endpoint: Endpoint::Public,
            api_url: PUBLIC_API_URL.to_string(),
            upload_url: PUBLIC_UPLOAD_URL.to_string(),
            credential: None,
        }
    }

    /// Client for a GitHub Enterprise instance, e.g.
    /// `https://ghe.example.com/api/v3/`.
    pub fn enterprise(base_url: &str, upload_url: &str, http: Client) -> Result<Self, ClientError> {
        let api_url = normalize_endpoint_url(base_url)?;
        let upload_url = normalize_endpoint_url(upload_url)?;

        Ok(Self {
            http,
            endpoint: Endpoint::Enterprise {
                base: api_url.clone(),
                upload: upload_url.clone(),
            },
            api_url,
            upload_url,
            credential: None,
        })
    }

    pub fn for_endpoint(endpoint: &Endpoint, http: Client) -> Result<Self, ClientError> {
        match endpoint {
            Endpoint::Public => Ok(Self::new(http)),
            Endpoint::Enterprise { base, upload } => Self::enterprise(base, upload, http),
        }
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// The HTTP client used when the caller does not supply one.
    pub fn build_http_client() -> Result<Client, ClientError> {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Transport)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn base_url(&self) -> &str {
        &self.api_url
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn token_source(&self) -> Option<TokenSource> {
        self.credential.as_ref().map(Credential::source)
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Prepares an API request for `path`, relative to the base URL
    /// (e.g. `repos/owner/name/releases/latest`). Paths resolving outside the
    /// endpoint, such as absolute URLs, are rejected.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = Self::resolve(&self.api_url, path)?;
        Ok(self.prepare(method, url))
    }

    /// Prepares a request against the upload URL.
    pub fn upload_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ClientError> {
        let url = Self::resolve(&self.upload_url, path)?;
        Ok(self.prepare(method, url))
    }

    fn prepare(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, MEDIA_TYPE_V3)
            .header(reqwest::header::USER_AGENT, USER_AGENT);

        match &self.credential {
            Some(credential) => builder.bearer_auth(&credential.token),
            None => builder,
        }
    }

    fn resolve(root: &str, path: &str) -> Result<Url, ClientError> {
        let invalid = |source| ClientError::InvalidUrl {
            url: format!("{root}{path}"),
            source,
        };
        let endpoint = Url::parse(root).map_err(invalid)?;
        let url = endpoint.join(path.trim_start_matches('/')).map_err(invalid)?;

        // Credentials are attached to every request; never let a path leave the endpoint.
        if url.origin() != endpoint.origin() || !url.path().starts_with(endpoint.path()) {
            return Err(ClientError::OutsideEndpoint {
                url: url.to_string(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(url)
    }
}
