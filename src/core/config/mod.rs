//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! git-ff has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$GIT_FF_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/git-ff/config.toml`
//! 3. `~/.git-ff/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-dir>/git-ff/config.toml`. Loading never writes anything.
//!
//! # Example
//!
//! ```no_run
//! use git_ff::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("Progress: {}", config.progress());
//! println!("Abbrev: {}", config.abbrev());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Default abbreviation length for object ids in messages.
pub const DEFAULT_ABBREV: usize = 7;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically: repo config overrides
/// global config, which overrides the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// If `git_dir` is provided, also loads the repository config.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let candidates = global_candidates(
            std::env::var_os("GIT_FF_CONFIG").map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );
        let global_path = candidates.into_iter().find(|p| p.exists());

        Self::load_from(global_path.as_deref(), git_dir)
    }

    /// Load configuration from an explicit global file and git directory.
    pub fn load_from(global_path: Option<&Path>, git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let global: GlobalConfig = match global_path {
            Some(path) => read_config(path)?,
            None => GlobalConfig::default(),
        };
        global.validate()?;

        let repo_path = git_dir
            .map(Self::repo_config_path)
            .filter(|p| p.exists());
        let repo = match &repo_path {
            Some(path) => {
                let repo: RepoConfig = read_config(path)?;
                repo.validate()?;
                Some(repo)
            }
            None => None,
        };

        Ok(Config {
            global,
            repo,
            global_path: global_path.map(Path::to_path_buf),
            repo_path,
        })
    }

    /// Get the path of the repo config inside a git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("git-ff/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Whether checkout progress should be rendered.
    ///
    /// Defaults to `true` if not configured.
    pub fn progress(&self) -> bool {
        self.repo
            .as_ref()
            .and_then(|r| r.progress)
            .or(self.global.progress)
            .unwrap_or(true)
    }

    /// Length of abbreviated object ids in messages.
    ///
    /// Defaults to [`DEFAULT_ABBREV`] if not configured.
    pub fn abbrev(&self) -> usize {
        self.repo
            .as_ref()
            .and_then(|r| r.abbrev)
            .or(self.global.abbrev)
            .unwrap_or(DEFAULT_ABBREV)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Global config locations in search order.
fn global_candidates(
    explicit: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(3);
    candidates.extend(explicit);
    candidates.extend(xdg_config_home.map(|xdg| xdg.join("git-ff/config.toml")));
    candidates.extend(home.map(|home| home.join(".git-ff/config.toml")));
    candidates
}

/// Read and parse a config file.
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_repo_config(git_dir: &Path, contents: &str) {
        let path = Config::repo_config_path(git_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn defaults_without_files() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(None, Some(temp.path())).unwrap();

        assert!(config.progress());
        assert_eq!(config.abbrev(), DEFAULT_ABBREV);
        assert!(config.repo.is_none());
        assert!(config.global_config_loaded_from().is_none());
        assert!(config.repo_config_loaded_from().is_none());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "progress = false\nabbrev = 12\n").unwrap();

        let config = Config::load_from(Some(&path), None).unwrap();

        assert!(!config.progress());
        assert_eq!(config.abbrev(), 12);
        assert_eq!(config.global_config_loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn repo_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        fs::write(&global, "progress = false\nabbrev = 12\n").unwrap();
        let git_dir = temp.path().join(".git");
        write_repo_config(&git_dir, "progress = true\n");

        let config = Config::load_from(Some(&global), Some(&git_dir)).unwrap();

        assert!(config.progress());
        // Not set in repo scope, falls back to global
        assert_eq!(config.abbrev(), 12);
        assert!(config.repo_config_loaded_from().is_some());
    }

    #[test]
    fn invalid_repo_value_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "abbrev = 100\n");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "progress = true\nunknown_field = true\n");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn global_search_order() {
        let candidates = global_candidates(
            Some(PathBuf::from("/explicit.toml")),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/me")),
        );
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/explicit.toml"),
                PathBuf::from("/xdg/git-ff/config.toml"),
                PathBuf::from("/home/me/.git-ff/config.toml"),
            ]
        );

        let home_only = global_candidates(None, None, Some(PathBuf::from("/home/me")));
        assert_eq!(home_only, vec![PathBuf::from("/home/me/.git-ff/config.toml")]);
    }
}
