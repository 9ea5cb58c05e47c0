//! GitHub API client construction for github.com and GitHub Enterprise.

pub mod client;
pub mod endpoint;

pub use client::{Credential, GitHubClient, TOKEN_ENV, TokenSource};
pub use endpoint::{Endpoint, PUBLIC_API_URL, PUBLIC_UPLOAD_URL};
