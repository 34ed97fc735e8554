//! Layered configuration: defaults, then an optional TOML file, then
//! `NEBULA_INTROSPECT_*` environment variables.

use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use nebula_expression::CompletionConfig;
use serde::{Deserialize, Serialize};

/// Environment prefix; nested keys are separated by `__`, e.g.
/// `NEBULA_INTROSPECT_COMPLETION__MAX_SUGGESTIONS=10`.
pub const ENV_PREFIX: &str = "NEBULA_INTROSPECT_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub completion: CompletionConfig,
}

impl CliConfig {
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            anyhow::ensure!(file.exists(), "config file {} does not exist", file.display());
            figment = figment.merge(Toml::file(file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.completion.max_suggestions, 50);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("introspect.toml");
        std::fs::write(&path, "[completion]\nmax_suggestions = 3\ninclude_methods = false\n").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.completion.max_suggestions, 3);
        assert!(!config.completion.include_methods);
        assert!(!config.completion.case_sensitive);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(CliConfig::load(Some(Path::new("/nonexistent/introspect.toml"))).is_err());
    }
}
