use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gh-selfupdate",
    about = "Inspect how a self-updating binary would reach its GitHub releases",
    version,
    author
)]
pub struct Cli {
    /// Print library diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the updater context and show the resolved endpoints and filters
    Inspect {
        #[command(flatten)]
        updater: UpdaterArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which asset names are selected by the configured filters
    Match {
        #[command(flatten)]
        updater: UpdaterArgs,

        /// Asset file names to test
        #[arg(value_name = "ASSET", required = true)]
        assets: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct UpdaterArgs {
    /// TOML file with updater settings; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GitHub Enterprise API base URL (e.g. https://ghe.example.com/api/v3/)
    #[arg(long, value_name = "URL")]
    pub enterprise_base_url: Option<String>,

    /// GitHub Enterprise upload URL (defaults to the base URL)
    #[arg(long, value_name = "URL")]
    pub enterprise_upload_url: Option<String>,

    /// Regular expression selecting release assets (repeatable)
    #[arg(short, long = "filter", value_name = "REGEX")]
    pub filters: Vec<String>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
