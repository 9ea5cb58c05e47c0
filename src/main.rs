mod cli;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        gh_selfupdate::enable_log();
    }

    let result = match &cli.command {
        Commands::Inspect { updater, json } => workflow::execute_inspect(updater, *json),
        Commands::Match { updater, assets } => workflow::execute_match(updater, assets),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
