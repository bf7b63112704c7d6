use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "tidemark.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Site layout and dev-server settings.
///
/// Every field has a default matching the conventional layout, so a
/// missing or partial `tidemark.toml` just means the defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Markdown posts, served under `/p/`.
    pub posts_dir: PathBuf,
    /// Static assets, copied/served at the site root.
    pub public_dir: PathBuf,
    /// Build output directory.
    pub output_dir: PathBuf,
    /// HTML shell every post is spliced into.
    pub template: PathBuf,
    /// Dev-server port.
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            public_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("dist"),
            template: PathBuf::from("index.html"),
            port: 3000,
        }
    }
}

impl SiteConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: SiteConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand tilde and shell variables in user-supplied paths
        config.posts_dir = Self::expand_path(&config.posts_dir).unwrap_or(config.posts_dir);
        config.public_dir = Self::expand_path(&config.public_dir).unwrap_or(config.public_dir);
        config.output_dir = Self::expand_path(&config.output_dir).unwrap_or(config.output_dir);
        config.template = Self::expand_path(&config.template).unwrap_or(config.template);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(CONFIG_FILE)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, PathBuf::from("posts"));
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.template, PathBuf::from("index.html"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded = SiteConfig::load_from_path(dir.path().join("nope.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "port = 8080\n").unwrap();

        let config = SiteConfig::load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.posts_dir, PathBuf::from("posts"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "port = \"not a number").unwrap();

        let result = SiteConfig::load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn toml_round_trip() {
        let original = SiteConfig {
            posts_dir: PathBuf::from("writing"),
            port: 4000,
            ..SiteConfig::default()
        };
        let toml_str = toml::to_string(&original).unwrap();
        let parsed: SiteConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.posts_dir, original.posts_dir);
        assert_eq!(parsed.port, original.port);
    }

    #[test]
    fn tilde_paths_are_expanded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "posts_dir = \"~/blog/posts\"\n").unwrap();

        let config = SiteConfig::load_from_path(&path).unwrap().unwrap();
        assert!(!config.posts_dir.to_string_lossy().starts_with('~'));
    }
}
