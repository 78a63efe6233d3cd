//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GIT_FF_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/git-ff/config.toml`
//! 3. `~/.git-ff/config.toml`
//!
//! # Repo Config
//!
//! Located at `<git-dir>/git-ff/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing, so a typo in a config file
//! fails the run instead of being silently ignored.

use serde::Deserialize;

use super::ConfigError;

/// Shortest abbreviation accepted for object ids in messages.
pub const MIN_ABBREV: usize = 4;

/// Longest abbreviation accepted (a full SHA-1).
pub const MAX_ABBREV: usize = 40;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// progress = true
/// abbrev = 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Show checkout progress when the active branch is updated
    pub progress: Option<bool>,

    /// Length of abbreviated object ids in messages
    pub abbrev: Option<usize>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_abbrev(self.abbrev)
    }
}

/// Repository configuration. Every key overrides its global counterpart.
///
/// # Example
///
/// ```toml
/// progress = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Show checkout progress when the active branch is updated
    pub progress: Option<bool>,

    /// Length of abbreviated object ids in messages
    pub abbrev: Option<usize>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_abbrev(self.abbrev)
    }
}

fn validate_abbrev(abbrev: Option<usize>) -> Result<(), ConfigError> {
    match abbrev {
        Some(len) if !(MIN_ABBREV..=MAX_ABBREV).contains(&len) => {
            Err(ConfigError::InvalidValue(format!(
                "abbrev must be between {} and {}, got {}",
                MIN_ABBREV, MAX_ABBREV, len
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.progress.is_none());
            assert!(config.abbrev.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn parses_all_keys() {
            let config: GlobalConfig = toml::from_str("progress = false\nabbrev = 12").unwrap();
            assert_eq!(config.progress, Some(false));
            assert_eq!(config.abbrev, Some(12));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn abbrev_out_of_range() {
            let too_short = GlobalConfig {
                abbrev: Some(2),
                ..Default::default()
            };
            assert!(too_short.validate().is_err());

            let too_long = GlobalConfig {
                abbrev: Some(41),
                ..Default::default()
            };
            assert!(too_long.validate().is_err());
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn abbrev_bounds_inclusive() {
            for len in [MIN_ABBREV, MAX_ABBREV] {
                let config = RepoConfig {
                    abbrev: Some(len),
                    ..Default::default()
                };
                assert!(config.validate().is_ok());
            }
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                progress = true
                trunk = "main"
            "#;

            let result: Result<RepoConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }

        #[test]
        fn reject_wrong_type() {
            let result: Result<RepoConfig, _> = toml::from_str("progress = \"yes\"");
            assert!(result.is_err());
        }
    }
}
