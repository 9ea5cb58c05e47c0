pub mod config;
pub mod filter;
pub mod validator;

pub use config::UpdaterConfig;
pub use filter::AssetFilters;
pub use validator::Validator;

use crate::context::ApiContext;
use crate::error::Result;
use crate::github::{Credential, Endpoint, GitHubClient};
use crate::logging::logger;
use reqwest::blocking::Client;
use std::fmt;
use std::sync::Arc;

/// Holds everything later self-update stages need: the GitHub API client,
/// the execution context its calls run under, the optional validator and
/// the compiled asset filters.
///
/// Immutable once built; share it by reference or clone it cheaply.
#[derive(Clone)]
pub struct Updater {
    api: GitHubClient,
    api_ctx: ApiContext,
    validator: Option<Arc<dyn Validator>>,
    filters: AssetFilters,
}

impl Updater {
    /// Creates a new updater. Nothing is sent over the network.
    ///
    /// The API token comes from the configuration or, failing that, from
    /// `$GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// * [`UpdaterError::Configuration`](crate::UpdaterError::Configuration)
    ///   if a filter is not a valid regular expression.
    /// * [`UpdaterError::ClientConstruction`](crate::UpdaterError::ClientConstruction)
    ///   if an enterprise URL is malformed or the HTTP client cannot be set up.
    pub fn new(ctx: ApiContext, config: UpdaterConfig) -> Result<Self> {
        let filters = AssetFilters::compile(config.filters.as_slice())?;

        let endpoint = config.endpoint();
        let http = match config.http_client {
            Some(client) => client,
            None => GitHubClient::build_http_client()?,
        };
        let api = GitHubClient::for_endpoint(&endpoint, http)?
            .with_credential(Credential::resolve(config.api_token.as_deref()));

        match api.endpoint() {
            Endpoint::Public => {
                log::debug!(logger: logger(), "Using GitHub API at {}", api.base_url());
            }
            Endpoint::Enterprise { base, upload } => {
                log::debug!(
                    logger: logger(),
                    "Using GitHub Enterprise API at {} (uploads: {})",
                    base,
                    upload
                );
            }
        }
        if !filters.is_empty() {
            log::debug!(logger: logger(), "Compiled {} asset filter(s)", filters.len());
        }

        Ok(Self {
            api,
            api_ctx: ctx,
            validator: config.validator,
            filters,
        })
    }

    /// An updater for github.com with a background context, no validator and
    /// no filters. `$GITHUB_TOKEN` is used if set.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, like
    /// [`reqwest::blocking::Client::new`]. Use [`Updater::new`] to get that
    /// failure as an error instead.
    pub fn default_updater() -> Self {
        let api = GitHubClient::new(Client::new()).with_credential(Credential::resolve(None));
        Self {
            api,
            api_ctx: ApiContext::background(),
            validator: None,
            filters: AssetFilters::default(),
        }
    }

    pub fn api(&self) -> &GitHubClient {
        &self.api
    }

    pub fn context(&self) -> &ApiContext {
        &self.api_ctx
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        self.validator.as_deref()
    }

    pub fn filters(&self) -> &AssetFilters {
        &self.filters
    }

    pub fn matches_filters(&self, asset_name: &str) -> bool {
        self.filters.matches(asset_name)
    }

    /// Runs the configured validator, if any, over a downloaded artifact.
    pub fn validate(&self, artifact: &[u8]) -> Result<()> {
        match &self.validator {
            Some(validator) => validator.validate(artifact),
            None => Ok(()),
        }
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::default_updater()
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("api", &self.api)
            .field("api_ctx", &self.api_ctx)
            .field("validator", &self.validator.is_some())
            .field("filters", &self.filters)
            .finish()
    }
}
