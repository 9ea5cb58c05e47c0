use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("could not compile regular expression {pattern:?} for filtering releases: {source}")]
    Configuration {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    ClientConstruction(#[from] ClientError),

    #[error("{0}")]
    Cancelled(CancelReason),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failures while building the GitHub API client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {scheme:?} in {url:?}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("URL {url:?} is outside the API endpoint {endpoint:?}")]
    OutsideEndpoint { url: String, endpoint: String },

    #[error("HTTP client setup failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled,
    DeadlineExceeded,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("context canceled"),
            CancelReason::DeadlineExceeded => f.write_str("context deadline exceeded"),
        }
    }
}

impl UpdaterError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UpdaterError::Cancelled(_))
    }
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
