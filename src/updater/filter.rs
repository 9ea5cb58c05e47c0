use crate::error::{Result, UpdaterError};
use regex::Regex;

/// Compiled asset-name filters.
///
/// Used to pick one asset out of a release that ships several for the same
/// platform. An asset is selected if it matches any filter; with no filters
/// every asset passes.
#[derive(Debug, Clone, Default)]
pub struct AssetFilters {
    patterns: Vec<Regex>,
}

impl AssetFilters {
    /// Compiles all patterns in order. Fails on the first invalid one and
    /// returns nothing else.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| UpdaterError::Configuration {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn matches(&self, asset_name: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|re| re.is_match(asset_name))
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_in_input_order() {
        let filters = AssetFilters::compile(&["^app-linux", "amd64", r"\.tar\.gz$"]).unwrap();
        let sources: Vec<&str> = filters.patterns().iter().map(Regex::as_str).collect();
        assert_eq!(sources, vec!["^app-linux", "amd64", r"\.tar\.gz$"]);
        assert_eq!(filters.len(), 3);
    }

    #[test]
    fn invalid_pattern_fails_whole_list() {
        let err = AssetFilters::compile(&["^ok$", "(", "also-ok"]).unwrap_err();
        match err {
            UpdaterError::Configuration { pattern, .. } => assert_eq!(pattern, "("),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_message_names_pattern() {
        let err = AssetFilters::compile(&["("]).unwrap_err();
        let message = err.to_string();
        assert!(
            message.starts_with(
                r#"could not compile regular expression "(" for filtering releases: "#
            ),
            "{message}"
        );
    }

    #[test]
    fn empty_filters_accept_everything() {
        let filters = AssetFilters::compile::<&str>(&[]).unwrap();
        assert!(filters.is_empty());
        assert!(filters.matches("tool_darwin_arm64.zip"));
    }

    #[test]
    fn any_matching_filter_selects_asset() {
        let filters = AssetFilters::compile(&["musl", "gnu"]).unwrap();
        assert!(filters.matches("tool-x86_64-unknown-linux-musl.tar.gz"));
        assert!(filters.matches("tool-x86_64-unknown-linux-gnu.tar.gz"));
        assert!(!filters.matches("tool-x86_64-pc-windows-msvc.zip"));
    }
}
