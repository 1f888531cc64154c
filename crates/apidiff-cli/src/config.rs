//! `apidiff.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use apidiff_engine::EngineConfig;
use apidiff_scan::ScanConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "apidiff.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub engine: EngineConfig,
    pub scan: ScanConfig,
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("invalid configuration")?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else `./apidiff.toml` if it exists, else
    /// the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("in {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn tables_override_defaults() {
        let config = FileConfig::parse(
            r#"
            [engine]
            max_permission_variables = 16

            [scan]
            extensions = ["json", "ast"]
            follow_links = true
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.max_permission_variables, 16);
        assert_eq!(config.scan.extensions, vec!["json", "ast"]);
        assert!(config.scan.follow_links);
        assert!(config.scan.skip_identical);
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[scan]\nskip_identical = false\n").unwrap();
        let config = FileConfig::load(Some(&path)).unwrap();
        assert!(!config.scan.skip_identical);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(FileConfig::parse("[engine]\nmax_permission_variables = \"many\"").is_err());
    }

    #[test]
    fn oversized_permission_ceiling_is_rejected() {
        let err = FileConfig::parse("[engine]\nmax_permission_variables = 63").unwrap_err();
        assert!(err.to_string().contains("exceeds the limit of 24"));
    }
}
