use crate::cli::UpdaterArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use gh_selfupdate::github::TokenSource;
use gh_selfupdate::{ApiContext, Endpoint, Updater, UpdaterConfig};
use serde_json::json;
use std::time::Duration;

/// Build the updater context and report how it resolved
pub fn execute_inspect(args: &UpdaterArgs, as_json: bool) -> Result<()> {
    let updater = build_updater(args)?;
    let api = updater.api();

    let credential = match api.token_source() {
        Some(TokenSource::Config) => Some("config"),
        Some(TokenSource::Environment) => Some("environment"),
        None => None,
    };
    let filters: Vec<&str> = updater
        .filters()
        .patterns()
        .iter()
        .map(|re| re.as_str())
        .collect();

    if as_json {
        let endpoint = if api.endpoint().is_enterprise() {
            "enterprise"
        } else {
            "public"
        };
        let report = json!({
            "endpoint": endpoint,
            "base_url": api.base_url(),
            "upload_url": api.upload_url(),
            "credential": credential,
            "filters": filters,
            "timeout_secs": updater.context().remaining().map(|d| d.as_secs()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let kind = match api.endpoint() {
        Endpoint::Public => "GitHub (public)",
        Endpoint::Enterprise { .. } => "GitHub Enterprise",
    };
    println!("{}", "Updater context".cyan().bold());
    println!("   Endpoint:   {}", kind.bright_cyan());
    println!("   API URL:    {}", api.base_url());
    println!("   Upload URL: {}", api.upload_url());
    match credential {
        Some(source) => println!("   Token:      {}", format!("from {source}").green()),
        None => println!("   Token:      {}", "none (unauthenticated)".yellow()),
    }

    if filters.is_empty() {
        println!("   Filters:    {}", "none (every asset matches)".dimmed());
    } else {
        println!("   Filters:");
        for filter in filters {
            println!("   • {}", filter);
        }
    }

    Ok(())
}

/// Check asset names against the configured filters
pub fn execute_match(args: &UpdaterArgs, assets: &[String]) -> Result<()> {
    let updater = build_updater(args)?;

    let mut selected = 0;
    for asset in assets {
        if updater.matches_filters(asset) {
            selected += 1;
            println!("{} {}", "✓".green(), asset);
        } else {
            println!("{} {}", "✗".red(), asset.dimmed());
        }
    }

    println!(
        "\n{} of {} asset(s) selected",
        selected.to_string().bold(),
        assets.len()
    );
    if selected > 1 && !updater.filters().is_empty() {
        println!(
            "{}",
            "Warning: filters should select exactly one asset per release".yellow()
        );
    }

    Ok(())
}

fn build_updater(args: &UpdaterArgs) -> Result<Updater> {
    let ctx = match args.timeout {
        Some(secs) => ApiContext::background().with_timeout(Duration::from_secs(secs)),
        None => ApiContext::background(),
    };

    let updater = Updater::new(ctx, resolve_config(args)?)?;
    updater.context().check()?;
    Ok(updater)
}

fn resolve_config(args: &UpdaterArgs) -> Result<UpdaterConfig> {
    let base = match &args.config {
        Some(path) => UpdaterConfig::from_path(path).with_context(|| {
            format!("Failed to load updater configuration from {}", path.display())
        })?,
        None => UpdaterConfig::new(),
    };

    let mut overrides = UpdaterConfig::new().with_filters(args.filters.iter().cloned());
    overrides.enterprise_base_url = args.enterprise_base_url.clone();
    overrides.enterprise_upload_url = args.enterprise_upload_url.clone();

    Ok(base.merge(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("update.toml");
        fs::write(
            &path,
            "enterprise_base_url = \"https://old.example.com/api/v3/\"\nfilters = [\"linux\"]\n",
        )
        .unwrap();

        let args = UpdaterArgs {
            config: Some(path),
            enterprise_base_url: Some("https://ghe.example.com/api/v3/".to_string()),
            filters: vec!["amd64".to_string()],
            ..Default::default()
        };
        let config = resolve_config(&args).unwrap();

        assert_eq!(
            config.enterprise_base_url.as_deref(),
            Some("https://ghe.example.com/api/v3/")
        );
        assert_eq!(config.filters, vec!["linux", "amd64"]);
    }

    #[test]
    fn bad_filter_flag_is_reported() {
        let args = UpdaterArgs {
            filters: vec!["(".to_string()],
            ..Default::default()
        };
        let err = build_updater(&args).unwrap_err();
        assert!(err.to_string().contains(r#""(""#));
    }

    #[test]
    fn expired_timeout_is_cancelled() {
        let args = UpdaterArgs {
            timeout: Some(0),
            ..Default::default()
        };
        let err = build_updater(&args).unwrap_err();
        let err = err.downcast::<gh_selfupdate::UpdaterError>().unwrap();
        assert!(err.is_cancelled());
    }
}
