//! Bootstrap layer for self-updating binaries released on GitHub.
//!
//! [`Updater::new`] turns an [`UpdaterConfig`] into a ready-to-use
//! [`Updater`]: an API client for github.com or a GitHub Enterprise
//! instance, the [`ApiContext`] its calls run under, an optional
//! [`Validator`] and the compiled asset filters.
//!
//! ```no_run
//! use gh_selfupdate::{ApiContext, Updater, UpdaterConfig};
//!
//! let config = UpdaterConfig::new()
//!     .with_enterprise_base_url("https://ghe.example.com/api/v3/")
//!     .with_filter("linux-amd64");
//! let updater = Updater::new(ApiContext::background(), config)?;
//! assert!(updater.matches_filters("tool-linux-amd64.tar.gz"));
//! # Ok::<(), gh_selfupdate::UpdaterError>(())
//! ```
//!
//! Diagnostics are off by default; see [`enable_log`].

pub mod context;
pub mod error;
pub mod github;
pub mod logging;
pub mod updater;

pub use context::ApiContext;
pub use error::{CancelReason, ClientError, Result, UpdaterError};
pub use github::{Endpoint, GitHubClient};
pub use logging::{disable_log, enable_log, is_log_enabled};
pub use updater::{AssetFilters, Updater, UpdaterConfig, Validator};
